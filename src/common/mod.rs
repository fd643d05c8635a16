pub mod logging;
pub mod output;
pub mod progress;
pub mod types;
pub mod utils;

pub use logging::*;
pub use output::{write_diagnostics, write_profile_table, write_summary_table};
pub use types::*;
pub use utils::*;

#[allow(unused_imports)]
pub use progress::create_count_progress_bar;
