use crate::config::ScanConfig;
use crate::error::{DirToolsError, Result};
use crate::ops::manifest;
use crate::scanner::{validate_extension, ExtensionMatcher, FileEntry, FileWalker, SkippedEntry};
use crate::units;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct FindOptions {
    pub root: PathBuf,
    pub extension: String,
    /// Manifest destination; results go to the console when absent.
    pub output: Option<PathBuf>,
}

impl FindOptions {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(root: P, extension: S) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            output: None,
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: Option<P>) -> Self {
        self.output = output.map(Into::into);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FindReport {
    pub root: PathBuf,
    pub extension: String,
    pub files: Vec<FileEntry>,
    pub total_bytes: u64,
    pub total_kb: f64,
    pub skipped: Vec<SkippedEntry>,
}

impl FindReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Header in the exact manifest format.
    pub fn header(&self) -> String {
        manifest::format_header(self.total_bytes, self.file_count())
    }

    /// Header split for terminal display, where a bare carriage return would
    /// overwrite the line.
    pub fn header_lines(&self) -> Vec<String> {
        vec![
            format!("size: {},", units::format_kb(self.total_bytes)),
            format!("files: {}", self.file_count()),
            manifest::HEADER_RULE.to_string(),
        ]
    }

    /// Writes the header and absolute paths to `path`, replacing any existing file.
    pub fn write_manifest(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| DirToolsError::export_failed(path, e))?;
        let paths: Vec<&Path> = self.files.iter().map(|f| f.path.as_path()).collect();

        let omitted = manifest::write_manifest(BufWriter::new(file), &self.header(), &paths)
            .map_err(|e| DirToolsError::export_failed(path, e))?;
        if omitted > 0 {
            warn!(omitted, manifest = %path.display(), "some matches were not listed");
        }
        Ok(())
    }
}

pub struct ExtensionFinder {
    walker: FileWalker,
    matcher: ExtensionMatcher,
}

impl ExtensionFinder {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            walker: FileWalker::new(config),
            matcher: ExtensionMatcher::new(config),
        }
    }

    pub fn run(
        &self,
        options: &FindOptions,
        progress_callback: Option<&dyn Fn(&FileEntry)>,
    ) -> Result<FindReport> {
        let extension = validate_extension(&options.extension)?;

        let keep = |path: &Path| self.matcher.matches(path, &extension);
        let outcome = self
            .walker
            .walk_matching(&options.root, &keep, progress_callback)?;
        let total_bytes = outcome.total_bytes();

        Ok(FindReport {
            root: outcome.root,
            extension,
            files: outcome.entries,
            total_bytes,
            total_kb: units::to_kb(total_bytes),
            skipped: outcome.skipped,
        })
    }
}
