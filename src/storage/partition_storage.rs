use crate::models::EnrichedRecord;
use crate::storage::Storage;
use crate::types::AccountId;
use dashmap::DashMap;

/// Concurrent store of enriched partitions, written once per partition by its actor.
pub struct PartitionStorage {
    partitions: DashMap<AccountId, Vec<EnrichedRecord>>
}

impl PartitionStorage {
    pub fn new() -> Self {
        Self {
            partitions: DashMap::new()
        }
    }

    /// Empties the store and returns every record in input row order.
    pub fn drain_ordered(&self) -> Vec<EnrichedRecord> {
        let accounts: Vec<AccountId> = self.partitions.iter().map(|entry| entry.key().clone()).collect();

        let mut records: Vec<EnrichedRecord> = accounts.iter()
            .filter_map(|account_id| self.load(account_id))
            .flatten()
            .collect();

        records.sort_by_key(EnrichedRecord::row);
        records
    }
}

impl Storage for PartitionStorage {
    fn load(&self, account_id: &str) -> Option<Vec<EnrichedRecord>> {
        self.partitions.remove(account_id).map(|(_, records)| records)
    }

    fn save(&self, account_id: AccountId, records: Vec<EnrichedRecord>) {
        self.partitions.insert(account_id, records);
    }
}
