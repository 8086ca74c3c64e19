use thiserror::Error;

/// Errors raised while compressing or decompressing a stream.
#[derive(Error, Debug)]
pub enum RleError {
    /// Read or write failure on either stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Compressed input that cannot be decoded
    #[error("malformed stream at byte {offset}: {reason}")]
    MalformedStream { offset: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, RleError>;

impl RleError {
    pub(crate) fn malformed(offset: u64, reason: impl Into<String>) -> Self {
        RleError::MalformedStream {
            offset,
            reason: reason.into(),
        }
    }
}
