use crate::error::{DirToolsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub manifest: ManifestConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub follow_links: bool,
    pub case_insensitive: bool,
    /// Unlimited when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub path_pattern: PathPattern,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub show_progress: bool,
}

/// Which manifest lines count as absolute paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PathPattern {
    /// `C:\...` style: one uppercase ASCII letter, a colon, a separator
    DriveRoot,
    /// `/...` style
    Posix,
    /// Either of the above
    #[default]
    Any,
}

impl PathPattern {
    pub fn regex(self) -> &'static str {
        match self {
            PathPattern::DriveRoot => r"^[A-Z]:[\\/]",
            PathPattern::Posix => r"^/",
            PathPattern::Any => r"^(?:[A-Z]:[\\/]|/)",
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathPattern::DriveRoot => "drive-root",
            PathPattern::Posix => "posix",
            PathPattern::Any => "any",
        };
        f.write_str(name)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            case_insensitive: false,
            max_depth: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DirToolsError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DirToolsError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| DirToolsError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["dirtools.toml", ".dirtools.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if cli_args.follow_links {
            self.scan.follow_links = true;
        }

        if cli_args.case_insensitive {
            self.scan.case_insensitive = true;
        }

        if let Some(max_depth) = cli_args.max_depth {
            self.scan.max_depth = Some(max_depth);
        }

        if let Some(pattern) = cli_args.path_pattern {
            self.manifest.path_pattern = pattern;
        }

        if cli_args.no_progress {
            self.output.show_progress = false;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| DirToolsError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| DirToolsError::export_failed(path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.max_depth == Some(0) {
            return Err(DirToolsError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub follow_links: bool,
    pub case_insensitive: bool,
    pub max_depth: Option<usize>,
    pub path_pattern: Option<PathPattern>,
    pub no_progress: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_case_insensitive(mut self, ignore_case: bool) -> Self {
        self.case_insensitive = ignore_case;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_path_pattern(mut self, pattern: Option<PathPattern>) -> Self {
        self.path_pattern = pattern;
        self
    }

    pub fn with_no_progress(mut self, no_progress: bool) -> Self {
        self.no_progress = no_progress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.scan.follow_links);
        assert!(!config.scan.case_insensitive);
        assert_eq!(config.scan.max_depth, None);
        assert_eq!(config.manifest.path_pattern, PathPattern::Any);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.scan.max_depth = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dirtools.toml");

        let mut config = Config::default();
        config.scan.case_insensitive = true;
        config.manifest.path_pattern = PathPattern::DriveRoot;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.scan.case_insensitive);
        assert_eq!(loaded.manifest.path_pattern, PathPattern::DriveRoot);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[manifest]\npath_pattern = \"posix\"\n").unwrap();
        assert_eq!(config.manifest.path_pattern, PathPattern::Posix);
        assert!(!config.scan.follow_links);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/missing/dirtools.toml");
        assert!(matches!(result, Err(DirToolsError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_follow_links(true)
            .with_max_depth(Some(3))
            .with_path_pattern(Some(PathPattern::Posix))
            .with_no_progress(true);

        config.merge_with_cli_args(&overrides);

        assert!(config.scan.follow_links);
        assert!(!config.scan.case_insensitive);
        assert_eq!(config.scan.max_depth, Some(3));
        assert_eq!(config.manifest.path_pattern, PathPattern::Posix);
        assert!(!config.output.show_progress);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[manifest]"));
        assert!(sample.contains("[output]"));
        assert!(sample.contains("path_pattern = \"any\""));
    }
}
