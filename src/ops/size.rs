use crate::config::ScanConfig;
use crate::error::Result;
use crate::scanner::{FileEntry, FileWalker, SkippedEntry};
use crate::units;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SizeOptions {
    pub root: PathBuf,
}

impl SizeOptions {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub root: PathBuf,
    pub total_bytes: u64,
    pub total_mb: f64,
    pub file_count: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl SizeReport {
    pub fn summary(&self) -> String {
        format!("Folder size: {}", units::format_mb(self.total_bytes))
    }
}

pub struct SizeAggregator {
    walker: FileWalker,
}

impl SizeAggregator {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            walker: FileWalker::new(config),
        }
    }

    pub fn run(
        &self,
        options: &SizeOptions,
        progress_callback: Option<&dyn Fn(&FileEntry)>,
    ) -> Result<SizeReport> {
        let outcome = self.walker.walk(&options.root, progress_callback)?;
        let total_bytes = outcome.total_bytes();

        Ok(SizeReport {
            root: outcome.root,
            total_bytes,
            total_mb: units::to_mb(total_bytes),
            file_count: outcome.entries.len(),
            skipped: outcome.skipped,
        })
    }
}
