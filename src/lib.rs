pub mod cli;
pub mod config;
pub mod error;
pub mod ops;
pub mod scanner;
pub mod ui;
pub mod units;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CliOverrides, Config, ManifestConfig, OutputConfig, PathPattern, ScanConfig};
pub use error::{DirToolsError, Result, UserFriendlyError};

// Core functionality re-exports
pub use ops::{
    DeleteOptions, DeleteReport, DeletionOutcome, ExtensionFinder, ExtensionGroup,
    ExtensionGrouper, FindOptions, FindReport, GroupOptions, GroupReport, ManifestDeleter,
    ManifestPathMatcher, SizeAggregator, SizeOptions, SizeReport,
};
pub use scanner::{ExtensionMatcher, FileEntry, FileWalker, SkippedEntry};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use indicatif::ProgressBar;
use std::path::Path;

/// Main library interface: runs each operation and renders its report.
pub struct DirTools {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl DirTools {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress =
            config.output.show_progress && !quiet && output_mode == OutputMode::Human;
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create a DirTools instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;

        Ok(Self::new(
            config,
            cli_args.output_format.into(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Total size of a folder
    pub fn folder_size(&self, options: &SizeOptions) -> Result<SizeReport> {
        self.output_formatter.start_operation(&format!(
            "Measuring {}",
            options.root.display()
        ));

        let spinner = self.progress_manager.create_walk_spinner("Measuring");
        let report = {
            let callback = walk_callback(&spinner);
            SizeAggregator::new(&self.config.scan).run(options, Some(&callback))
        };
        ui::progress::finish_and_clear(&spinner);
        let report = report?;

        self.progress_manager
            .suspend(|| self.output_formatter.print_size_report(&report));
        Ok(report)
    }

    /// Size and count per extension, printed or exported as CSV
    pub fn group_by_extension(&self, options: &GroupOptions) -> Result<GroupReport> {
        self.output_formatter.start_operation(&format!(
            "Grouping files under {} by extension",
            options.root.display()
        ));

        let spinner = self.progress_manager.create_walk_spinner("Grouping");
        let report = {
            let callback = walk_callback(&spinner);
            ExtensionGrouper::new(&self.config.scan).run(options, Some(&callback))
        };
        ui::progress::finish_and_clear(&spinner);
        let report = report?;

        match options.export.as_deref() {
            Some(path) => {
                if let Err(e) = report.export_csv(path) {
                    // The table still reaches the console.
                    self.output_formatter.print_group_report(&report);
                    return Err(e);
                }
                self.output_formatter.print_export_confirmation(
                    &format!("{} extension groups", report.groups.len()),
                    path,
                );
            }
            None => self.output_formatter.print_group_report(&report),
        }

        Ok(report)
    }

    /// Files with a given extension, printed or written as a manifest
    pub fn find_by_extension(&self, options: &FindOptions) -> Result<FindReport> {
        self.output_formatter.start_operation(&format!(
            "Searching {} for .{} files",
            options.root.display(),
            options.extension.trim_start_matches('.')
        ));

        let spinner = self.progress_manager.create_walk_spinner("Searching");
        let report = {
            let callback = walk_callback(&spinner);
            ExtensionFinder::new(&self.config.scan).run(options, Some(&callback))
        };
        ui::progress::finish_and_clear(&spinner);
        let report = report?;

        match options.output.as_deref() {
            Some(path) => {
                if let Err(e) = report.write_manifest(path) {
                    self.output_formatter.print_find_report(&report);
                    return Err(e);
                }
                self.output_formatter.print_export_confirmation(
                    &format!(
                        "{} .{} file paths ({})",
                        report.file_count(),
                        report.extension,
                        units::format_kb(report.total_bytes)
                    ),
                    path,
                );
            }
            None => self.output_formatter.print_find_report(&report),
        }

        Ok(report)
    }

    /// Delete the files listed in a manifest
    pub fn delete_from_manifest(&self, options: &DeleteOptions) -> Result<DeleteReport> {
        self.output_formatter.start_operation(&format!(
            "Deleting files listed in {}",
            options.manifest.display()
        ));

        let deleter = ManifestDeleter::new(&self.config.manifest)?;
        let spinner = self.progress_manager.create_line_spinner("Deleting");
        let report = {
            let callback = |outcome: &DeletionOutcome| {
                spinner.inc(1);
                self.progress_manager
                    .suspend(|| self.output_formatter.print_deletion_outcome(outcome));
            };
            deleter.run(options, Some(&callback))
        };
        ui::progress::finish_and_clear(&spinner);
        let report = report?;

        self.output_formatter.print_delete_report(&report);
        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &DirToolsError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

fn walk_callback(spinner: &ProgressBar) -> impl Fn(&FileEntry) + '_ {
    move |_: &FileEntry| spinner.inc(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_tools() -> DirTools {
        DirTools::new(Config::default(), OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_progress_disabled_outside_human_mode() {
        let tools = quiet_tools();
        assert!(!tools.progress_manager.is_enabled());
        assert!(!tools.config.scan.follow_links);
    }

    #[test]
    fn test_size_equals_sum_of_groups() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        fs::write(temp_dir.path().join("a.txt"), vec![0u8; 1000]).unwrap();
        fs::write(temp_dir.path().join("nested").join("b.bin"), vec![0u8; 2500]).unwrap();
        fs::write(temp_dir.path().join("nested").join("README"), vec![0u8; 42]).unwrap();

        let tools = quiet_tools();
        let size = tools.folder_size(&SizeOptions::new(temp_dir.path())).unwrap();
        let groups = tools
            .group_by_extension(&GroupOptions::new(temp_dir.path()))
            .unwrap();

        let grouped: u64 = groups.groups.iter().map(|g| g.total_size).sum();
        assert_eq!(size.total_bytes, 3542);
        assert_eq!(grouped, size.total_bytes);
    }

    #[test]
    fn test_group_export_writes_csv() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data");
        fs::create_dir(&data).unwrap();
        fs::write(data.join("a.txt"), "abc").unwrap();
        let export = temp_dir.path().join("groups.csv");

        let tools = quiet_tools();
        tools
            .group_by_extension(&GroupOptions::new(&data).with_export(Some(&export)))
            .unwrap();

        let csv = fs::read_to_string(&export).unwrap();
        assert!(csv.starts_with("Name,FileCount,TotalSizeMB\n"));
        assert!(csv.contains("\".txt\",1,\"0.00 MB\""));
    }

    #[test]
    fn test_find_then_delete_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("data");
        fs::create_dir_all(data.join("sub")).unwrap();
        fs::write(data.join("one.tmp"), "1").unwrap();
        fs::write(data.join("sub").join("two.tmp"), "22").unwrap();
        fs::write(data.join("three.tmp"), "333").unwrap();
        fs::write(data.join("keep.txt"), "keep").unwrap();
        let manifest = temp_dir.path().join("manifest.txt");

        let tools = quiet_tools();
        let found = tools
            .find_by_extension(&FindOptions::new(&data, "tmp").with_output(Some(&manifest)))
            .unwrap();
        assert_eq!(found.file_count(), 3);

        // Removed out-of-band between the two runs.
        fs::remove_file(data.join("three.tmp")).unwrap();

        let report = tools
            .delete_from_manifest(&DeleteOptions::new(&manifest))
            .unwrap();

        assert_eq!(report.deleted_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_lines, 2);
        assert!(!data.join("one.tmp").exists());
        assert!(!data.join("sub").join("two.tmp").exists());
        assert!(data.join("keep.txt").exists());
    }

    #[test]
    fn test_missing_root_reported() {
        let tools = quiet_tools();
        let result = tools.folder_size(&SizeOptions::new("/definitely/missing/path"));
        assert!(matches!(result, Err(DirToolsError::PathNotFound { .. })));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        DirTools::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[scan]"));
        assert!(content.contains("[manifest]"));
        assert!(content.contains("[output]"));
    }
}
