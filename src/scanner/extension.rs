use crate::config::ScanConfig;
use crate::error::{DirToolsError, Result};
use std::path::Path;

/// Extension keys and suffix matching under one case policy.
///
/// Comparison is byte-exact unless `case_insensitive` is set, in which case
/// both sides are folded to ASCII lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionMatcher {
    case_insensitive: bool,
}

impl ExtensionMatcher {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            case_insensitive: config.case_insensitive,
        }
    }

    /// Grouping key for a file: its last extension with the leading dot
    /// (`".txt"`), or the empty string when the file has none.
    pub fn group_key(&self, path: &Path) -> String {
        match path.extension() {
            Some(ext) => self.fold(&format!(".{}", ext.to_string_lossy())),
            None => String::new(),
        }
    }

    /// True when the file name ends with `.<extension>`.
    pub fn matches(&self, path: &Path, extension: &str) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = self.fold(&name.to_string_lossy());
        let suffix = self.fold(&format!(".{}", extension));
        name.ends_with(&suffix)
    }

    fn fold(&self, value: &str) -> String {
        if self.case_insensitive {
            value.to_ascii_lowercase()
        } else {
            value.to_string()
        }
    }
}

/// Normalizes a user-supplied extension: one leading dot is dropped, and the
/// remainder must be a non-empty literal without separators or wildcards.
pub fn validate_extension(raw: &str) -> Result<String> {
    let invalid = |reason: &str| DirToolsError::InvalidExtension {
        extension: raw.to_string(),
        reason: reason.to_string(),
    };

    let extension = raw.trim();
    let extension = extension.strip_prefix('.').unwrap_or(extension);

    if extension.is_empty() {
        return Err(invalid("extension must not be empty"));
    }

    if extension.contains(['/', '\\']) {
        return Err(invalid("extension must not contain path separators"));
    }

    if extension.contains(['*', '?']) {
        return Err(invalid("wildcards are not supported"));
    }

    if extension.chars().any(char::is_whitespace) {
        return Err(invalid("extension must not contain whitespace"));
    }

    Ok(extension.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insensitive() -> ExtensionMatcher {
        ExtensionMatcher::new(&ScanConfig {
            case_insensitive: true,
            ..ScanConfig::default()
        })
    }

    #[test]
    fn test_group_keys() {
        let matcher = ExtensionMatcher::default();
        assert_eq!(matcher.group_key(Path::new("notes.txt")), ".txt");
        assert_eq!(matcher.group_key(Path::new("archive.tar.gz")), ".gz");
        assert_eq!(matcher.group_key(Path::new("Makefile")), "");
        assert_eq!(matcher.group_key(Path::new(".bashrc")), "");
        assert_eq!(matcher.group_key(Path::new("PHOTO.JPG")), ".JPG");
    }

    #[test]
    fn test_case_insensitive_group_keys() {
        assert_eq!(insensitive().group_key(Path::new("PHOTO.JPG")), ".jpg");
    }

    #[test]
    fn test_suffix_matching() {
        let matcher = ExtensionMatcher::default();
        assert!(matcher.matches(Path::new("/data/a.txt"), "txt"));
        assert!(matcher.matches(Path::new("/data/archive.tar.gz"), "gz"));
        assert!(matcher.matches(Path::new("/data/archive.tar.gz"), "tar.gz"));
        assert!(!matcher.matches(Path::new("/data/a.txt.bak"), "txt"));
        assert!(!matcher.matches(Path::new("/data/atxt"), "txt"));
        assert!(!matcher.matches(Path::new("/data/A.TXT"), "txt"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let matcher = insensitive();
        assert!(matcher.matches(Path::new("/data/A.TXT"), "txt"));
        assert!(matcher.matches(Path::new("/data/a.txt"), "TXT"));
    }

    #[test]
    fn test_validate_extension() {
        assert_eq!(validate_extension("txt").unwrap(), "txt");
        assert_eq!(validate_extension(".log").unwrap(), "log");
        assert_eq!(validate_extension("tar.gz").unwrap(), "tar.gz");

        for bad in ["", ".", "  ", "a/b", "a\\b", "*.txt", "t?t", "my ext"] {
            assert!(
                matches!(
                    validate_extension(bad),
                    Err(DirToolsError::InvalidExtension { .. })
                ),
                "Should reject: {:?}",
                bad
            );
        }
    }
}
