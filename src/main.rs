use clap::Parser;
use dirtools::{
    Cli, Command, DeleteOptions, DirTools, DirToolsError, FindOptions, GroupOptions,
    OutputFormatter, OutputMode, SizeOptions, UserFriendlyError,
};
use std::path::Path;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    // Handle special commands first
    if let Command::InitConfig { path } = &cli.command {
        let path = path
            .as_deref()
            .unwrap_or_else(|| Path::new("dirtools.toml"));
        return handle_init_config(path);
    }

    let dirtools = match DirTools::from_cli(&cli) {
        Ok(dirtools) => dirtools,
        Err(e) => {
            print_startup_error(&e, cli.output_format.into());
            return exit_code(&e);
        }
    };

    let result = match &cli.command {
        Command::Size { root } => dirtools.folder_size(&SizeOptions::new(root)).map(|_| 0),
        Command::Group { root, export } => dirtools
            .group_by_extension(&GroupOptions::new(root).with_export(export.as_ref()))
            .map(|_| 0),
        Command::Find {
            root,
            extension,
            output,
        } => dirtools
            .find_by_extension(
                &FindOptions::new(root, extension.as_str()).with_output(output.as_ref()),
            )
            .map(|_| 0),
        Command::Delete { manifest } => dirtools
            .delete_from_manifest(&DeleteOptions::new(manifest))
            .map(|report| {
                if report.has_failures() {
                    2 // Completed with warnings
                } else {
                    0
                }
            }),
        Command::InitConfig { .. } => Ok(0),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            dirtools.handle_error(&e);
            exit_code(&e)
        }
    }
}

fn exit_code(error: &DirToolsError) -> i32 {
    match error {
        DirToolsError::PathNotFound { .. } | DirToolsError::NotADirectory { .. } => 3,
        DirToolsError::InvalidExtension { .. } => 4,
        DirToolsError::ExportWriteFailed { .. } => 5,
        DirToolsError::Config { .. } => 6,
        _ => 1, // General error
    }
}

fn handle_init_config(config_path: &Path) -> i32 {
    match DirTools::generate_sample_config(config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  dirtools --config {} size <folder>", config_path.display());
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            exit_code(&e)
        }
    }
}

fn print_startup_error(error: &DirToolsError, mode: OutputMode) {
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(cli: &Cli) {
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
