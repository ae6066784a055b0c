//! Discovery of the PHP sources under an input directory.
//!
//! Files are found with the `ignore` walker, so `.gitignore` rules apply, and
//! come back in path order. An input directory without PHP files is not an
//! error; the caller decides whether that is worth a warning.

use crate::error::{CliResult, ScanError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Extension of scanned source files.
pub const SOURCE_EXTENSION: &str = "php";

/// A PHP file read from disk.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,

    /// Path relative to the input directory; filters match against it.
    pub relative_path: PathBuf,

    pub content: String,
}

impl SourceFile {
    fn read(path: PathBuf, relative_path: PathBuf) -> Result<Self, ScanError> {
        let content = std::fs::read_to_string(&path).map_err(|source| ScanError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            relative_path,
            content,
        })
    }
}

/// Collects the PHP sources of one input directory.
#[derive(Debug)]
pub struct SourceScanner {
    root: PathBuf,
    filter: Option<glob::Pattern>,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: None,
        }
    }

    /// Keep only files whose relative path matches the glob `pattern`.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, ScanError> {
        let pattern = glob::Pattern::new(pattern)
            .map_err(|e| ScanError::invalid_pattern(pattern, e.to_string()))?;
        self.filter = Some(pattern);
        Ok(self)
    }

    /// Read every selected PHP file, ordered by path. The result may be empty.
    pub fn scan(&self) -> CliResult<Vec<SourceFile>> {
        if !self.root.is_dir() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(ScanError::Walk)?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if let Some(relative_path) = self.select(entry.path()) {
                files.push(SourceFile::read(entry.into_path(), relative_path)?);
            }
        }

        tracing::debug!(root = %self.root.display(), count = files.len(), "scanned PHP sources");
        Ok(files)
    }

    /// The relative path of `path` when it is a PHP file passing the filter.
    fn select(&self, path: &Path) -> Option<PathBuf> {
        if !is_source_file(path) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        match &self.filter {
            Some(pattern) if !pattern.matches_path(relative) => None,
            _ => Some(relative.to_path_buf()),
        }
    }
}

/// Whether the path has the PHP source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
