use std::io;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// CLI Error types
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ts_config::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] ts_transport::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Interrupted")]
    Cancelled,
}

impl Error {
    /// The process exit code for this error.
    pub(crate) const fn exit_code(&self) -> u8 {
        match self {
            Self::Cancelled => 130,
            Self::Config(_) => 2,
            Self::Transport(_) | Self::Io(_) => 1,
        }
    }
}
