//! Virtual file system for editor assets.
//!
//! Provides one synchronous API for reading and writing asset files across
//! storage backends through the [`VfsProvider`] trait and the [`Vfs`] router.
//!
//! All operations block and complete before returning. Editor commands run
//! on the editor thread from start to finish, so there is no async layer.
//!
//! # Providers
//!
//! - [`MemoryProvider`]: in-memory storage for tests and embedded assets
//! - [`FileSystemProvider`]: native filesystem access (native only)
//!
//! # Paths
//!
//! VFS paths use forward slashes, are relative, and may not contain `..`.
//! The first segment selects a mounted source; see [`Vfs`]. The [`path`]
//! module also has the string helpers editor code uses to split and join
//! asset paths.

mod error;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
mod filesystem;
mod memory;
pub mod path;
mod provider;
mod vfs;

pub use error::VfsError;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
pub use filesystem::FileSystemProvider;
pub use memory::MemoryProvider;
pub use provider::VfsProvider;
pub use vfs::Vfs;
