//! Stack-based path normalization.
//!
//! Paths are kept as a list of segments below the root (`~`). Resolution
//! never climbs above the root: a `..` at the root is a no-op.

use std::fmt;

/// Display name of the root directory.
pub const ROOT: &str = "~";

/// A normalized absolute path into the virtual tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VfsPath {
    segments: Vec<String>,
}

impl VfsPath {
    /// The root directory.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments below the root, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, or `~` for the root.
    pub fn name(&self) -> &str {
        self.segments.last().map_or(ROOT, String::as_str)
    }

    /// Resolve `input` against this path.
    ///
    /// A leading `/` or a `~` segment restarts from the root, `.` is skipped
    /// and `..` pops one segment. Empty input resolves to `self`.
    pub fn resolve(&self, input: &str) -> Self {
        let input = input.trim();
        let mut stack = if input.starts_with('/') {
            Vec::new()
        } else {
            self.segments.clone()
        };

        for segment in input.split('/') {
            match segment {
                "" | "." => {},
                ROOT => stack.clear(),
                ".." => {
                    stack.pop();
                },
                name => stack.push(name.to_string()),
            }
        }

        Self { segments: stack }
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT)?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
