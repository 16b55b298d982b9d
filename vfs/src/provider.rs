use crate::VfsError;

/// Trait for virtual file system backends.
///
/// Providers implement blocking byte-level I/O. Every call completes before
/// it returns.
///
/// # Read vs Write
///
/// All providers must implement read operations (`read`, `exists`, `is_dir`,
/// `list_dir`). Write operations have default implementations that return
/// [`VfsError::ReadOnly`]. Providers that support writes override them.
///
/// # Path Contract
///
/// Paths passed to provider methods are already normalized by the
/// [`Vfs`](crate::Vfs) router and relative to the provider's root. The empty
/// path names the root itself.
pub trait VfsProvider: Send + Sync + 'static {
    /// Read the entire contents of a file.
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &str) -> Result<bool, VfsError>;

    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &str) -> Result<bool, VfsError>;

    /// Names of the immediate children of a directory, sorted.
    ///
    /// Returns an empty vec for non-existent directories.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError>;

    /// Write data to a file, creating or overwriting it.
    fn write(&self, _path: &str, _data: Vec<u8>) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly)
    }

    /// Write data to a file that must not exist yet.
    ///
    /// Fails with [`VfsError::AlreadyExists`] instead of overwriting.
    fn write_new(&self, _path: &str, _data: Vec<u8>) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly)
    }

    /// Create a directory and any missing parents.
    fn create_dir(&self, _path: &str) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly)
    }
}
