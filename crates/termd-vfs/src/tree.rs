//! Static in-memory directory tree.
//!
//! Directories map path segments to child nodes; files hold their content as
//! preformatted text. The tree is built once and never mutated afterwards.

use std::collections::BTreeMap;

use crate::path::VfsPath;
use crate::{Result, VfsError};

/// A node in the virtual tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir(BTreeMap<String, Node>),
    File(String),
}

impl Node {
    /// Build a directory from `(name, node)` pairs.
    pub fn dir<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, Node)>,
        S: Into<String>,
    {
        Node::Dir(
            children
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// Build a file node.
    pub fn file(content: impl Into<String>) -> Self {
        Node::File(content.into())
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir(_))
    }
}

/// The virtual file system: a single immutable tree rooted at `~`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualFs {
    root: Node,
}

impl VirtualFs {
    /// Wrap a root node. A file root is replaced by an empty directory.
    pub fn new(root: Node) -> Self {
        let root = if root.is_dir() {
            root
        } else {
            Node::Dir(BTreeMap::new())
        };
        Self { root }
    }

    /// Walk the tree to the node at `path`.
    pub fn lookup(&self, path: &VfsPath) -> Option<&Node> {
        let mut node = &self.root;
        for segment in path.segments() {
            match node {
                Node::Dir(children) => node = children.get(segment)?,
                Node::File(_) => return None,
            }
        }
        Some(node)
    }

    /// Check that `path` names a directory. `shown` is the path as the user
    /// typed it, used in error messages.
    pub fn ensure_dir(&self, path: &VfsPath, shown: &str) -> Result<()> {
        match self.lookup(path) {
            Some(Node::Dir(_)) => Ok(()),
            Some(Node::File(_)) => Err(VfsError::NotADirectory(shown.to_string())),
            None => Err(VfsError::NotFound(shown.to_string())),
        }
    }

    /// Immediate child names of the directory at `path`, in sorted order.
    pub fn list(&self, path: &VfsPath, shown: &str) -> Result<Vec<&str>> {
        match self.lookup(path) {
            Some(Node::Dir(children)) => Ok(children.keys().map(String::as_str).collect()),
            Some(Node::File(_)) => Err(VfsError::NotADirectory(shown.to_string())),
            None => Err(VfsError::NotFound(shown.to_string())),
        }
    }

    /// Content of the file at `path`.
    pub fn read(&self, path: &VfsPath, shown: &str) -> Result<&str> {
        match self.lookup(path) {
            Some(Node::File(content)) => Ok(content),
            Some(Node::Dir(_)) => Err(VfsError::IsADirectory(shown.to_string())),
            None => Err(VfsError::NotFound(shown.to_string())),
        }
    }
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new(Node::Dir(BTreeMap::new()))
    }
}
