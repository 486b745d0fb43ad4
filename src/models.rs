//! These models represent the objects passed between the host framework and
//! a model provider: normalized conversation items going in, and response
//! envelopes coming back out. The host converts its own message formats into
//! these with to/from helpers before a provider ever sees them.
pub mod content;
pub mod message;
pub mod response;
pub mod role;
