/// Fatal startup and terminal failures.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal I/O failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The log file could not be opened.
    #[error("failed to start logging to {path}: {source}")]
    Logging {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The audio output could not be opened.
    #[cfg_attr(not(feature = "audio"), allow(dead_code))]
    #[error("audio output unavailable: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
