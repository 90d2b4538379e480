use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::aggregation::WindowedAggregator;
use crate::models::FeaturizedRecord;
use crate::storage::Storage;
use crate::types::AccountId;

/// Owns one sender partition for the duration of a run.
///
/// Records are buffered privately until the input channel closes; only then is the whole
/// partition materialized and scanned, so the result does not depend on arrival order.
pub struct PartitionActor {
    sender: mpsc::UnboundedSender<FeaturizedRecord>,
    handle: JoinHandle<()>
}

impl PartitionActor {
    /// Spawns a new actor for the given sender account.
    pub fn new<S: Storage>(account_id: AccountId, storage: Arc<S>, aggregator: WindowedAggregator) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<FeaturizedRecord>();

        let handle = spawn(async move {
            let mut partition = Vec::new();

            while let Some(record) = receiver.recv().await {
                partition.push(record);
            }

            let enriched = aggregator.enrich_partition(partition);

            debug!("Partition for sender [{account_id}] enriched with [{}] records", enriched.len());

            storage.save(account_id, enriched);
        });

        Self { sender, handle }
    }

    /// Queues a record for this partition. Returns `false` if the actor has already stopped.
    pub fn accept(&self, record: FeaturizedRecord) -> bool {
        self.sender.send(record).is_ok()
    }

    /// Closes the input and waits until the partition has been scanned and saved.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
