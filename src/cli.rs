use crate::config::{CliOverrides, Config, PathPattern};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dirtools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folder size, extension breakdown and manifest-driven cleanup")]
#[command(
    long_about = "dirtools walks a directory tree to report its total size, break it down by \
                  file extension, list files with a given extension, or delete the files named \
                  in a manifest."
)]
#[command(after_help = "EXAMPLES:\n  \
    dirtools size ~/Downloads\n  \
    dirtools group ~/Projects --export sizes.csv\n  \
    dirtools find ~/Projects log --output logs.txt\n  \
    dirtools delete logs.txt\n  \
    dirtools init-config")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Follow symbolic links while walking
    #[arg(long, global = true)]
    pub follow_links: bool,

    /// Compare extensions without regard to ASCII case
    #[arg(long, global = true)]
    pub ignore_case: bool,

    /// Maximum directory depth to descend
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Which manifest lines are treated as paths
    #[arg(long, value_enum, global = true)]
    pub path_pattern: Option<PathPattern>,

    /// Disable the progress spinner
    #[arg(long, global = true)]
    pub no_progress: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Total size of every file under a folder, in MB
    Size {
        /// Folder to measure
        root: PathBuf,
    },

    /// Size and file count per extension, largest first
    Group {
        /// Folder to analyse
        root: PathBuf,

        /// Write the table as CSV instead of printing it
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// List files with a given extension, optionally as a manifest
    Find {
        /// Folder to search
        root: PathBuf,

        /// Extension without the dot, e.g. `log`
        extension: String,

        /// Write header and absolute paths to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete every file listed in a manifest
    Delete {
        /// Manifest file, one absolute path per line
        manifest: PathBuf,
    },

    /// Write a sample configuration file
    InitConfig {
        /// Destination (defaults to dirtools.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_follow_links(self.follow_links)
            .with_case_insensitive(self.ignore_case)
            .with_max_depth(self.max_depth)
            .with_path_pattern(self.path_pattern)
            .with_no_progress(self.no_progress)
    }
}
