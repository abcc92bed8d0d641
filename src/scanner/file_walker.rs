use crate::config::ScanConfig;
use crate::error::{DirToolsError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// A regular file found during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

impl FileEntry {
    pub fn new<P: Into<PathBuf>>(path: P, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// An entry that could not be read and was left out of the totals.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

impl From<SkippedEntry> for DirToolsError {
    fn from(entry: SkippedEntry) -> Self {
        DirToolsError::EntryEnumeration {
            path: entry.path,
            message: entry.reason,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    pub root: PathBuf,
    pub entries: Vec<FileEntry>,
    pub skipped: Vec<SkippedEntry>,
}

impl WalkOutcome {
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

pub struct FileWalker {
    follow_links: bool,
    max_depth: Option<usize>,
}

impl FileWalker {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            follow_links: config.follow_links,
            max_depth: config.max_depth,
        }
    }

    /// Checks that `root` is an existing directory and returns it as an absolute path.
    pub fn resolve_root(root: &Path) -> Result<PathBuf> {
        if !root.exists() {
            return Err(DirToolsError::PathNotFound {
                path: root.to_path_buf(),
            });
        }

        if !root.is_dir() {
            return Err(DirToolsError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        Ok(std::path::absolute(root)?)
    }

    pub fn walk(
        &self,
        root: &Path,
        progress_callback: Option<&dyn Fn(&FileEntry)>,
    ) -> Result<WalkOutcome> {
        self.walk_matching(root, &|_| true, progress_callback)
    }

    /// Walks `root` recursively, keeping regular files for which `keep` returns true.
    ///
    /// Unreadable entries never abort the walk; they are collected in
    /// [`WalkOutcome::skipped`] and traced at debug level.
    pub fn walk_matching(
        &self,
        root: &Path,
        keep: &dyn Fn(&Path) -> bool,
        progress_callback: Option<&dyn Fn(&FileEntry)>,
    ) -> Result<WalkOutcome> {
        let root = Self::resolve_root(root)?;
        info!(root = %root.display(), follow_links = self.follow_links, "walking directory");

        let mut walker = WalkDir::new(&root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut outcome = WalkOutcome {
            root: root.clone(),
            ..WalkOutcome::default()
        };

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root.as_path()).to_path_buf();
                    debug!(path = %path.display(), error = %err, "skipping unreadable entry");
                    outcome.skipped.push(SkippedEntry {
                        path,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() || !keep(entry.path()) {
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => {
                    let file = FileEntry::new(entry.into_path(), metadata.len());
                    if let Some(callback) = progress_callback {
                        callback(&file);
                    }
                    outcome.entries.push(file);
                }
                Err(err) => {
                    debug!(path = %entry.path().display(), error = %err, "skipping unreadable file");
                    outcome.skipped.push(SkippedEntry {
                        path: entry.into_path(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            files = outcome.entries.len(),
            skipped = outcome.skipped.len(),
            "walk complete"
        );

        Ok(outcome)
    }
}

impl Default for FileWalker {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}
