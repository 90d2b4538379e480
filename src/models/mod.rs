mod errors;
mod records;
mod transaction;

pub use errors::{RecordError, Unprocessable};
pub use records::{EnrichedRecord, FeaturizedRecord, NormalizedRecord};
pub use transaction::TransactionRecord;
