use thiserror::Error;

/// Errors of writing dumps and loading dump config
#[derive(Debug, Error)]
pub enum DumpError {
    /// Dump file could not be opened or written
    #[error("failed to write dump: {0}")]
    Io(#[from] std::io::Error),
    /// Dump config is not valid
    #[error("invalid dump config: {0}")]
    Config(String),
}
