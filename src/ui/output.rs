use crate::error::{DirToolsError, UserFriendlyError};
use crate::ops::{DeleteReport, DeletionOutcome, FindReport, GroupReport, SizeReport};
use crate::scanner::SkippedEntry;
use console::{style, Emoji, Term};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static TRASH: Emoji = Emoji("🗑️  ", "- ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Success, message),
                OutputMode::Json => self.print_json_message("success", message),
                OutputMode::Plain => println!("SUCCESS: {}", message),
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Warning, message),
            OutputMode::Json => self.print_json_message("warning", message),
            OutputMode::Plain => println!("WARNING: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    /// Status line announcing an operation. Goes to stderr so stdout carries
    /// only the report.
    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        eprintln!("> {}", operation);
                    }
                }
                OutputMode::Json => eprintln!(
                    "{}",
                    serde_json::json!({
                        "type": "message",
                        "level": "operation_start",
                        "message": operation,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    })
                ),
                OutputMode::Plain => eprintln!("STARTING: {}", operation),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &DirToolsError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    // Reports
    pub fn print_size_report(&self, report: &SizeReport) {
        if self.mode == OutputMode::Json {
            return self.print_json_report(report);
        }

        self.print_skipped(&report.skipped);
        self.debug(&format!(
            "{} files, {} bytes under {}",
            report.file_count,
            report.total_bytes,
            report.root.display()
        ));

        if self.use_colors {
            println!(
                "{} {}",
                style("Folder size:").bold(),
                style(format!("{:.2} MB", report.total_mb)).cyan().bold()
            );
        } else {
            println!("{}", report.summary());
        }
    }

    pub fn print_group_report(&self, report: &GroupReport) {
        if self.mode == OutputMode::Json {
            return self.print_json_report(report);
        }

        self.print_skipped(&report.skipped);

        let table = report.render_table();
        if self.use_colors {
            let mut lines = table.lines();
            if let Some(header) = lines.next() {
                println!("{}", style(header).bold());
            }
            for line in lines {
                println!("{}", line);
            }
        } else {
            print!("{}", table);
        }

        if report.groups.is_empty() {
            println!("No files under {}", report.root.display());
        }
    }

    pub fn print_find_report(&self, report: &FindReport) {
        if self.mode == OutputMode::Json {
            return self.print_json_report(report);
        }

        self.print_skipped(&report.skipped);

        for line in report.header_lines() {
            if self.use_colors {
                println!("{}", style(line).bold());
            } else {
                println!("{}", line);
            }
        }
        for file in &report.files {
            println!("{}", file.display_path());
        }
    }

    pub fn print_export_confirmation(&self, what: &str, path: &Path) {
        if self.mode == OutputMode::Json {
            self.print_json_object(&serde_json::json!({
                "type": "export",
                "what": what,
                "path": path,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }));
        } else {
            self.success(&format!("Exported {} to {}", what, path.display()));
        }
    }

    /// One status line per processed manifest entry.
    pub fn print_deletion_outcome(&self, outcome: &DeletionOutcome) {
        if self.mode == OutputMode::Json {
            return;
        }

        match outcome {
            DeletionOutcome::Deleted { path, .. } => match self.mode {
                OutputMode::Human if self.use_colors => {
                    println!("{}{}", TRASH, style(path.display()).dim())
                }
                OutputMode::Plain => println!("DELETED: {}", path.display()),
                _ => println!("Deleted {}", path.display()),
            },
            DeletionOutcome::Failed { line, path, error } => self.warning(&format!(
                "Line {}: could not delete {}: {}",
                line,
                path.display(),
                error
            )),
        }
    }

    pub fn print_delete_report(&self, report: &DeleteReport) {
        if self.mode == OutputMode::Json {
            return self.print_json_report(report);
        }

        if report.has_failures() {
            self.warning(&report.summary());
        } else {
            self.success(&report.summary());
        }
    }

    /// Entries the walk could not read; only shown with `-v`.
    pub fn print_skipped(&self, skipped: &[SkippedEntry]) {
        if skipped.is_empty() {
            return;
        }

        self.info(&format!("{} unreadable entries skipped", skipped.len()));
        for entry in skipped {
            self.debug(&DirToolsError::from(entry.clone()).to_string());
        }
    }

    pub fn print_json_report<T: Serialize>(&self, report: &T) {
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        );
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        let value = serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        if level == "error" {
            eprintln!(
                "{}",
                serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
            );
        } else {
            self.print_json_object(&value);
        }
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_mode_has_no_colors() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert_eq!(formatter.mode, OutputMode::Plain);
        assert!(!formatter.use_colors);
        assert_eq!(formatter.verbose_level, 1);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(formatter.should_show_message(2));
        assert!(!formatter.should_show_message(3));

        let quiet_formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert!(!quiet_formatter.should_show_message(0));
        assert!(!quiet_formatter.should_show_message(1));
    }
}
