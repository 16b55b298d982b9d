use thiserror::Error;

/// Errors that can occur during virtual file system operations.
#[derive(Error, Debug)]
pub enum VfsError {
    /// The requested path was not found in the provider.
    #[error("not found: {0}")]
    NotFound(String),
    /// An IO error occurred while accessing a provider.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// The path is invalid (empty, contains `..`, or other normalization failure).
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// No provider is mounted at the given source name.
    #[error("no such source: {0}")]
    NoSuchSource(String),
    /// A create-only write found an existing file.
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// The provider does not support write operations.
    #[error("provider is read-only")]
    ReadOnly,
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => VfsError::NotFound(err.to_string()),
            std::io::ErrorKind::AlreadyExists => VfsError::AlreadyExists(err.to_string()),
            _ => VfsError::Io(err),
        }
    }
}
