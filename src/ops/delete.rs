use crate::config::ManifestConfig;
use crate::error::{DirToolsError, Result};
use crate::ops::manifest::ManifestPathMatcher;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

#[derive(Debug, Clone)]
pub struct DeleteOptions {
    pub manifest: PathBuf,
}

impl DeleteOptions {
    pub fn new<P: Into<PathBuf>>(manifest: P) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }
}

/// Result of acting on one manifest line. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeletionOutcome {
    Deleted { line: usize, path: PathBuf },
    Failed { line: usize, path: PathBuf, error: String },
}

impl DeletionOutcome {
    pub fn path(&self) -> &Path {
        match self {
            DeletionOutcome::Deleted { path, .. } | DeletionOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteReport {
    pub manifest: PathBuf,
    pub outcomes: Vec<DeletionOutcome>,
    pub skipped_lines: usize,
}

impl DeleteReport {
    pub fn deleted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_deleted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.deleted_count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Deleted {} file(s), {} failure(s), {} line(s) skipped",
            self.deleted_count(),
            self.failed_count(),
            self.skipped_lines
        )
    }
}

pub struct ManifestDeleter {
    matcher: ManifestPathMatcher,
}

impl ManifestDeleter {
    pub fn new(config: &ManifestConfig) -> Result<Self> {
        Ok(Self {
            matcher: ManifestPathMatcher::new(config.path_pattern)?,
        })
    }

    /// Deletes every file named by a path-shaped line of the manifest.
    ///
    /// A failed deletion is recorded and the run moves on to the next line;
    /// only a missing or unreadable manifest aborts. `outcome_callback` sees
    /// each outcome as soon as it happens.
    pub fn run(
        &self,
        options: &DeleteOptions,
        outcome_callback: Option<&dyn Fn(&DeletionOutcome)>,
    ) -> Result<DeleteReport> {
        let manifest = &options.manifest;
        if !manifest.exists() {
            return Err(DirToolsError::PathNotFound {
                path: manifest.clone(),
            });
        }

        info!(manifest = %manifest.display(), "processing manifest");
        let reader = BufReader::new(File::open(manifest)?);

        let mut report = DeleteReport {
            manifest: manifest.clone(),
            outcomes: Vec::new(),
            skipped_lines: 0,
        };

        for (index, raw_line) in reader.split(b'\n').enumerate() {
            let raw_line = raw_line?;
            let line = String::from_utf8_lossy(&raw_line);
            let line = line.strip_suffix('\r').unwrap_or(&*line);

            if !self.matcher.looks_like_absolute_path(line) {
                trace!(line = index + 1, "skipping non-path line");
                report.skipped_lines += 1;
                continue;
            }

            let outcome = match delete_listed_file(index + 1, Path::new(line)) {
                Ok(path) => DeletionOutcome::Deleted {
                    line: index + 1,
                    path,
                },
                Err(DirToolsError::EntryDeletion { line, path, source }) => {
                    DeletionOutcome::Failed {
                        line,
                        path,
                        error: source.to_string(),
                    }
                }
                Err(other) => return Err(other),
            };
            debug!(
                path = %outcome.path().display(),
                deleted = outcome.is_deleted(),
                "manifest entry processed"
            );

            if let Some(callback) = outcome_callback {
                callback(&outcome);
            }
            report.outcomes.push(outcome);
        }

        info!(
            deleted = report.deleted_count(),
            failed = report.failed_count(),
            skipped = report.skipped_lines,
            "manifest processed"
        );

        Ok(report)
    }
}

fn delete_listed_file(line: usize, path: &Path) -> Result<PathBuf> {
    let attempt = || -> io::Result<()> {
        if fs::symlink_metadata(path)?.is_dir() {
            return Err(io::Error::other("path is a directory"));
        }
        fs::remove_file(path)
    };

    attempt().map_err(|source| DirToolsError::EntryDeletion {
        line,
        path: path.to_path_buf(),
        source,
    })?;

    Ok(path.to_path_buf())
}
