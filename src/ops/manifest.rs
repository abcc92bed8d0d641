//! The manifest file shared by `find` (writer) and `delete` (reader).
//!
//! A manifest starts with a header block and then lists one absolute path per
//! line. The reader only acts on lines accepted by
//! [`ManifestPathMatcher::looks_like_absolute_path`], so the header and any
//! comments are inert.

use crate::config::PathPattern;
use crate::error::{DirToolsError, Result};
use crate::units;
use regex::Regex;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

pub const HEADER_RULE: &str = "---";

/// `size: <N.NN> KB,<CR>files: <count><CR><LF>---`
pub fn format_header(total_bytes: u64, file_count: usize) -> String {
    format!(
        "size: {:.2} KB,\rfiles: {}\r\n{}",
        units::to_kb(total_bytes),
        file_count,
        HEADER_RULE
    )
}

/// True when `path` can be written as a single manifest line and read back
/// unchanged: valid UTF-8 with no line terminators.
pub fn is_listable(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|text| !text.contains(['\n', '\r']))
}

/// Writes `header` followed by one path per line and returns how many paths
/// were left out because they are not listable.
pub fn write_manifest<W, P>(mut writer: W, header: &str, paths: &[P]) -> io::Result<usize>
where
    W: Write,
    P: AsRef<Path>,
{
    writeln!(writer, "{}", header)?;

    let mut omitted = 0;
    for path in paths {
        let path = path.as_ref();
        match path.to_str() {
            Some(text) if is_listable(path) => writeln!(writer, "{}", text)?,
            _ => {
                warn!(path = ?path, "path cannot be listed in a manifest, omitting");
                omitted += 1;
            }
        }
    }

    writer.flush()?;
    Ok(omitted)
}

pub struct ManifestPathMatcher {
    pattern: Regex,
}

impl ManifestPathMatcher {
    pub fn new(pattern: PathPattern) -> Result<Self> {
        let pattern = Regex::new(pattern.regex()).map_err(|e| DirToolsError::Config {
            message: format!("Invalid manifest path pattern '{}': {}", pattern, e),
        })?;
        Ok(Self { pattern })
    }

    pub fn looks_like_absolute_path(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}
