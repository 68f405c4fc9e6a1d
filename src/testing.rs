//! Testing utilities for replacr
//!
//! This module provides a `TestTree` fixture: a temporary directory that
//! cleans itself up on drop, with helpers to create and read files by
//! relative path.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory tree for file-based tests
///
/// # Panics
/// Helper methods panic on I/O failures; they are meant for tests only.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create an empty tree in a fresh temporary directory
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Root of the tree
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path for `rel` inside the tree (the file need not exist)
    #[must_use]
    pub fn path(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Create a file with `content`, creating parent directories as needed
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn file(&self, rel: impl AsRef<Path>, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Read a file inside the tree
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        fs::read_to_string(self.path(rel)).expect("Failed to read test file")
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_basic() {
        let tree = TestTree::new();
        let path = tree.file("a/b/c.txt", "hello");
        assert!(path.exists());
        assert_eq!(tree.read("a/b/c.txt"), "hello");
    }

    #[test]
    fn test_tree_cleanup() {
        let root = {
            let tree = TestTree::new();
            tree.file("x.txt", "x");
            tree.root().to_path_buf()
        };
        assert!(!root.exists());
    }
}
