use thiserror::Error;

/// Errors originating in the providers themselves, as opposed to failures
/// bubbled up unchanged from an injected reply provider.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("standard input closed before a reply was entered")]
    InputClosed,

    #[error("failed to read reply from standard input: {0}")]
    Input(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
