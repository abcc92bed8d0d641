use crate::config::ScanConfig;
use crate::error::{DirToolsError, Result};
use crate::scanner::{ExtensionMatcher, FileEntry, FileWalker, SkippedEntry};
use crate::units;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "Name,FileCount,TotalSizeMB";

const NO_EXTENSION_LABEL: &str = "(none)";

#[derive(Debug, Clone)]
pub struct GroupOptions {
    pub root: PathBuf,
    /// CSV destination; the table goes to the console when absent.
    pub export: Option<PathBuf>,
}

impl GroupOptions {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            export: None,
        }
    }

    pub fn with_export<P: Into<PathBuf>>(mut self, export: Option<P>) -> Self {
        self.export = export.map(Into::into);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionGroup {
    pub extension: String,
    pub file_count: u64,
    pub total_size: u64,
}

impl ExtensionGroup {
    pub fn display_name(&self) -> &str {
        if self.extension.is_empty() {
            NO_EXTENSION_LABEL
        } else {
            &self.extension
        }
    }

    pub fn total_size_mb(&self) -> String {
        units::format_mb(self.total_size)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    file_count: u64,
    total_size_mb: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub root: PathBuf,
    pub groups: Vec<ExtensionGroup>,
    pub total_bytes: u64,
    pub skipped: Vec<SkippedEntry>,
}

impl GroupReport {
    /// Fixed-width table for console output.
    pub fn render_table(&self) -> String {
        let name_width = self
            .groups
            .iter()
            .map(|g| g.display_name().chars().count())
            .chain(std::iter::once("Name".len()))
            .max()
            .unwrap_or(4);

        let mut table = format!(
            "{:<name_width$}  {:>9}  {:>14}\n",
            "Name", "FileCount", "TotalSizeMB"
        );
        table.push_str(&format!(
            "{:<name_width$}  {:>9}  {:>14}\n",
            "-".repeat(name_width),
            "-".repeat(9),
            "-".repeat(14)
        ));

        for group in &self.groups {
            table.push_str(&format!(
                "{:<name_width$}  {:>9}  {:>14}\n",
                group.display_name(),
                group.file_count,
                group.total_size_mb()
            ));
        }

        table
    }

    /// Writes the header row and one quoted row per group.
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", CSV_HEADER)?;

        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_writer(writer);

        for group in &self.groups {
            csv_writer.serialize(CsvRow {
                name: &group.extension,
                file_count: group.file_count,
                total_size_mb: group.total_size_mb(),
            })?;
        }

        csv_writer.flush()
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| DirToolsError::export_failed(path, e))?;
        self.write_csv(BufWriter::new(file))
            .map_err(|e| DirToolsError::export_failed(path, e))
    }
}

/// Partitions files by extension key, sorted by total size descending and
/// then by extension ascending.
pub fn group_entries(entries: &[FileEntry], matcher: &ExtensionMatcher) -> Vec<ExtensionGroup> {
    let mut map: HashMap<String, ExtensionGroup> = HashMap::new();

    for entry in entries {
        let key = matcher.group_key(&entry.path);
        let group = map.entry(key.clone()).or_insert_with(|| ExtensionGroup {
            extension: key,
            file_count: 0,
            total_size: 0,
        });
        group.file_count += 1;
        group.total_size += entry.size;
    }

    let mut groups: Vec<ExtensionGroup> = map.into_values().collect();
    groups.sort_by(|a, b| {
        b.total_size
            .cmp(&a.total_size)
            .then_with(|| a.extension.cmp(&b.extension))
    });
    groups
}

pub struct ExtensionGrouper {
    walker: FileWalker,
    matcher: ExtensionMatcher,
}

impl ExtensionGrouper {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            walker: FileWalker::new(config),
            matcher: ExtensionMatcher::new(config),
        }
    }

    pub fn run(
        &self,
        options: &GroupOptions,
        progress_callback: Option<&dyn Fn(&FileEntry)>,
    ) -> Result<GroupReport> {
        let outcome = self.walker.walk(&options.root, progress_callback)?;
        let groups = group_entries(&outcome.entries, &self.matcher);

        Ok(GroupReport {
            total_bytes: outcome.total_bytes(),
            root: outcome.root,
            groups,
            skipped: outcome.skipped,
        })
    }
}
