use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirToolsError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    ExportWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read {}: {message}", path.display())]
    EntryEnumeration { path: PathBuf, message: String },

    #[error("Line {line}: cannot delete {}: {source}", path.display())]
    EntryDeletion {
        line: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DirToolsError {
    pub fn export_failed<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        DirToolsError::ExportWriteFailed {
            path: path.into(),
            source,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for DirToolsError {
    fn user_message(&self) -> String {
        match self {
            DirToolsError::PathNotFound { path } => {
                format!("Path does not exist: {}", path.display())
            }
            DirToolsError::NotADirectory { path } => {
                format!("Expected a directory but found a file: {}", path.display())
            }
            DirToolsError::InvalidExtension { extension, reason } => {
                if extension.is_empty() {
                    format!("Invalid extension: {}", reason)
                } else {
                    format!("Invalid extension '{}': {}", extension, reason)
                }
            }
            DirToolsError::ExportWriteFailed { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            DirToolsError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            DirToolsError::PathNotFound { .. } => Some(
                "Check the spelling of the path, or pass an absolute path.".to_string(),
            ),
            DirToolsError::NotADirectory { .. } => Some(
                "Pass the folder that contains the files rather than a single file.".to_string(),
            ),
            DirToolsError::InvalidExtension { .. } => Some(
                "Pass the bare extension without wildcards, e.g. `txt` or `tar.gz`.".to_string(),
            ),
            DirToolsError::ExportWriteFailed { .. } => Some(
                "Make sure the destination folder exists and is writable, or omit the output path to print to the console.".to_string(),
            ),
            DirToolsError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with `dirtools init-config`.".to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for DirToolsError {
    fn from(error: toml::de::Error) -> Self {
        DirToolsError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirToolsError>;
