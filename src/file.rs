//! File handles and hydrated file contexts
//!
//! Locators may return filenames only or filenames with content already
//! attached; the engine hydrates handles into [`FileContext`] values before
//! dispatching checks, so rules always see both filename and content.

use std::io;
use std::path::PathBuf;

/// A file produced by a locator, content optionally pre-loaded.
#[derive(Debug, Clone)]
pub struct FileHandle {
    /// Path to the file (absolute, or relative to the workspace root)
    pub filename: PathBuf,

    /// Pre-loaded content, if the locator had it on hand
    pub content: Option<String>,
}

impl FileHandle {
    /// A handle whose content will be read from disk on hydration
    pub fn lazy(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            content: None,
        }
    }

    /// A handle with content already attached
    pub fn with_content(filename: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: Some(content.into()),
        }
    }

    /// Turn this handle into a [`FileContext`], reading from disk if the
    /// content was not pre-loaded.
    pub async fn hydrate(self) -> io::Result<FileContext> {
        let content = match self.content {
            Some(content) => content,
            None => tokio::fs::read_to_string(&self.filename).await?,
        };
        Ok(FileContext {
            filename: self.filename,
            content,
        })
    }
}

/// A file with its content loaded, as seen by checks.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// Path to the file
    pub filename: PathBuf,

    /// Full file content
    pub content: String,
}
