mod timestamp;

pub use timestamp::{epoch_seconds, normalize, TIMESTAMP_FORMAT};

pub type AccountId = String;
pub type RowIndex = u64;
pub type EpochSeconds = i64;
pub type Timestamp = chrono::NaiveDateTime;
