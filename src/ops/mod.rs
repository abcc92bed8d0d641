pub mod delete;
pub mod find;
pub mod group;
pub mod manifest;
pub mod size;

pub use delete::{DeleteOptions, DeleteReport, DeletionOutcome, ManifestDeleter};
pub use find::{ExtensionFinder, FindOptions, FindReport};
pub use group::{ExtensionGroup, ExtensionGrouper, GroupOptions, GroupReport};
pub use manifest::ManifestPathMatcher;
pub use size::{SizeAggregator, SizeOptions, SizeReport};
