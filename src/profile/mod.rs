pub mod aggregate;
pub mod url;
pub mod walker;

pub use aggregate::{assemble_profile, SummaryAccumulator};
pub use url::{canonicalize, ReferenceError};
pub use walker::{walk_records, RecordFetcher, WalkOutcome, MAX_RECORDS_PER_PROFILE};
