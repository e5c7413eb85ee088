use std::path::{Path, PathBuf};

use eyre::Result;

use crate::is_generated;

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was left alone (hand-written content at the target path)
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite
    Always,
    /// Overwrite only files that carry the generated-code marker
    #[default]
    IfGenerated,
}

/// A file to be generated
#[derive(Debug)]
pub struct File {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl File {
    /// Create a new file with the given path and content (default: overwrite generated files only)
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::default(),
        }
    }

    pub fn overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file according to its overwrite rule
    pub fn write(&self) -> Result<WriteResult> {
        if self.overwrite == Overwrite::IfGenerated && self.exists() {
            let existing = std::fs::read_to_string(&self.path)?;
            if !is_generated(&existing) {
                tracing::warn!(
                    path = %self.path.display(),
                    "refusing to overwrite a file without the generated-code marker"
                );
                return Ok(WriteResult::Skipped);
            }
        }

        write_file(&self.path, &self.content)?;
        tracing::debug!(path = %self.path.display(), bytes = self.content.len(), "wrote file");
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
