pub mod column;
pub mod competitor_key;
pub mod entry;
pub mod fields;
pub mod group;

pub use column::{CellFormatter, ColumnDescriptor, ColumnSet};
pub use competitor_key::CompetitorKey;
pub use entry::CanonicalEntry;
pub use fields::FieldAlias;
pub use group::CompetitorGroup;

/// Sentinel duration for lap and gap times that could not be parsed.
///
/// Shared by the time parser and the ranking engine so malformed timings
/// always sort after every real time.
pub const MAX_DURATION: u64 = u64::MAX;
