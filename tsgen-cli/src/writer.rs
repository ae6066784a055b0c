//! File writer for generated declaration files.
//!
//! Each class becomes `<output>/<ClassName>.<extension>`. Dry-run mode
//! renders everything but leaves the file system untouched.

use crate::error::{CliResult, WriteError};
use std::path::{Path, PathBuf};

/// Result of a write operation.
#[derive(Debug)]
pub enum WriteResult {
    /// File was written.
    Written {
        /// Path to the written file.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// Dry run - content was not written.
    DryRun {
        /// Content that would have been written.
        content: String,
        /// Path where content would have been written.
        path: PathBuf,
    },
}

/// Declaration file writer with dry-run support.
#[derive(Debug)]
pub struct FileWriter {
    dry_run: bool,

    /// Extension of generated files, without the dot.
    extension: String,
}

impl FileWriter {
    /// Create a writer for `.ts` files.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            extension: "ts".to_string(),
        }
    }

    /// Set the extension of generated files.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of the declaration file for `name` under `output_dir`.
    pub fn target_path(&self, output_dir: &Path, name: &str) -> PathBuf {
        output_dir.join(format!("{name}.{}", self.extension))
    }

    /// Write the declaration of `name` into `output_dir`.
    pub fn write_declaration(
        &self,
        output_dir: &Path,
        name: &str,
        content: &str,
    ) -> CliResult<WriteResult> {
        self.write(&self.target_path(output_dir, name), content)
    }

    /// Write content to a file, creating parent directories.
    ///
    /// In dry-run mode, returns the content without writing.
    pub fn write(&self, path: &Path, content: &str) -> CliResult<WriteResult> {
        if self.dry_run {
            return Ok(WriteResult::DryRun {
                content: content.to_string(),
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        std::fs::write(path, content).map_err(|e| WriteError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote declaration");

        Ok(WriteResult::Written {
            path: path.to_path_buf(),
            bytes: content.len(),
        })
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl WriteResult {
    /// Get the path associated with this result.
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path, .. } | WriteResult::DryRun { path, .. } => path,
        }
    }

    /// Check if the file was actually written.
    pub fn was_written(&self) -> bool {
        matches!(self, WriteResult::Written { .. })
    }

    /// Number of bytes written (0 for dry-run).
    pub fn bytes(&self) -> usize {
        match self {
            WriteResult::Written { bytes, .. } => *bytes,
            WriteResult::DryRun { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ORDER_TS: &str = "export interface Order {\n  id: number;\n}\n";

    #[test]
    fn test_write_declaration() {
        let dir = TempDir::new().unwrap();

        let writer = FileWriter::new(false);
        let result = writer
            .write_declaration(dir.path(), "Order", ORDER_TS)
            .unwrap();

        let path = dir.path().join("Order.ts");
        assert!(result.was_written());
        assert_eq!(result.path(), path.as_path());
        assert_eq!(result.bytes(), ORDER_TS.len());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ORDER_TS);
    }

    #[test]
    fn test_custom_extension() {
        let writer = FileWriter::new(false).with_extension("d.ts");
        assert_eq!(
            writer.target_path(Path::new("/out"), "Order"),
            PathBuf::from("/out/Order.d.ts")
        );
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models/generated/Order.ts");

        let result = FileWriter::new(false).write(&path, ORDER_TS).unwrap();

        assert!(matches!(result, WriteResult::Written { .. }));
        assert!(path.exists());
    }

    #[test]
    fn test_later_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let writer = FileWriter::new(false);

        writer.write_declaration(dir.path(), "Order", "first").unwrap();
        writer.write_declaration(dir.path(), "Order", "second").unwrap();

        let content = std::fs::read_to_string(dir.path().join("Order.ts")).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();

        let writer = FileWriter::new(true);
        assert!(writer.is_dry_run());
        let result = writer
            .write_declaration(dir.path(), "Order", ORDER_TS)
            .unwrap();

        assert!(!result.was_written());
        assert_eq!(result.bytes(), 0);
        assert!(!dir.path().join("Order.ts").exists());

        match result {
            WriteResult::DryRun { content, path } => {
                assert_eq!(content, ORDER_TS);
                assert_eq!(path, dir.path().join("Order.ts"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
