//! Virtual file system for Terminal-D.
//!
//! A static tree of directories and files keyed by path segment, plus the
//! stack-based normalizer that `cd`, `ls` and `cat` resolve paths with.

mod demo;
mod path;
mod tree;

pub use demo::demo_tree;
pub use path::{ROOT, VfsPath};
pub use tree::{Node, VirtualFs};

/// Path resolution failures. Each variant carries the path as typed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VfsError {
    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("{0}: Not a directory")]
    NotADirectory(String),

    #[error("{0}: Is a directory")]
    IsADirectory(String),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VfsError>;

impl From<VfsError> for termd_types::TermError {
    fn from(e: VfsError) -> Self {
        termd_types::TermError::Vfs(e.to_string())
    }
}
