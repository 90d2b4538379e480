mod partition_storage;

use crate::models::EnrichedRecord;
use crate::types::AccountId;

pub use partition_storage::PartitionStorage;

pub trait Storage: Send + Sync + 'static {
    fn load(&self, account_id: &str) -> Option<Vec<EnrichedRecord>>;
    fn save(&self, account_id: AccountId, records: Vec<EnrichedRecord>);
}
