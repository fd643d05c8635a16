pub mod classifier;
pub mod keywords;
pub mod window;

pub use classifier::{classify_record, ClassifyError};
pub use window::{parse_record_date, window_position, DateWindow};
