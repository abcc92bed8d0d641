pub mod extension;
pub mod file_walker;

pub use extension::{validate_extension, ExtensionMatcher};
pub use file_walker::{FileEntry, FileWalker, SkippedEntry, WalkOutcome};
