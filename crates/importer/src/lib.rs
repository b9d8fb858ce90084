pub mod canonical;
pub mod error;
pub mod extractors;
pub mod sources;
pub mod traits;

pub use canonical::validator::{LeaderboardValidator, ValidationReport};
pub use error::{ImporterError, Result};
pub use extractors::extract_leaderboard;
pub use sources::{DirectorySource, FileSource, LoadedLeaderboard, discover_json_files, load_file};
pub use traits::LeaderboardSource;
