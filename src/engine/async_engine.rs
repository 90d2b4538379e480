use crate::actors::PartitionActor;
use crate::config::PipelineConfig;
use crate::models::{TransactionRecord, Unprocessable};
use crate::pipeline::{Enrichment, Pipeline};
use crate::storage::PartitionStorage;
use crate::types::{AccountId, RowIndex};
use anyhow::{anyhow, bail, Context};
use csv::ReaderBuilder;
use futures::future::join_all;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, info, warn};

/// Execution context of an enrichment run.
///
/// Owns the worker coordination: one blocking CSV reader, one actor per sender account
/// and the shared result store. The transforms it drives know nothing about it.
pub struct AsyncEngine {
    pipeline: Arc<Pipeline>,
    storage: Arc<PartitionStorage>,
    backpressure: usize
}

impl AsyncEngine {
    /// Creates a new engine instance with the provided policy and storage.
    pub fn new(config: &PipelineConfig, storage: Arc<PartitionStorage>) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new(config)),
            storage,
            backpressure: 256
        }
    }

    /// Bounds the number of parsed rows waiting between the reader and the router.
    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Orchestrates the end-to-end enrichment of a CSV file.
    ///
    /// # Errors
    /// Fails if the input cannot be opened or a partition actor dies before saving its result.
    pub async fn run(&self, path: &Path) -> anyhow::Result<Enrichment> {
        let (sender, receiver) = mpsc::channel::<(RowIndex, TransactionRecord)>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_path_buf(), sender);
        let processing_result = self.process_transactions(receiver).await;

        csv_handle.await
            .map_err(|error| anyhow!("CSV reader task failed: {error}"))??;

        let unprocessable = processing_result?;

        Ok(Enrichment {
            records: self.storage.drain_ordered(),
            unprocessable
        })
    }

    fn spawn_csv_reader(&self, path: PathBuf, sender: mpsc::Sender<(RowIndex, TransactionRecord)>) -> JoinHandle<anyhow::Result<()>> {
        spawn_blocking(move || {
            let file = File::open(&path)
                .with_context(|| format!("Error opening CSV at path: {}", path.display()))?;

            // Fields are passed through untrimmed; only Date and Time are trimmed when parsed
            let mut reader = ReaderBuilder::new()
                .flexible(true)
                .from_reader(BufReader::new(file));

            let mut accepted = 0u64;
            let mut malformed = 0u64;

            for (row, result) in (0..).zip(reader.deserialize::<TransactionRecord>()) {
                match result {
                    Ok(record) => {
                        if sender.blocking_send((row, record)).is_err() {
                            break;
                        }
                        accepted += 1;
                    }
                    Err(error) => {
                        malformed += 1;
                        error!("CSV deserialization error at row [{row}]: {error}");
                    }
                }
            }

            info!("Read [{accepted}] rows from {} ([{malformed}] malformed rows skipped)", path.display());

            Ok(())
        })
    }

    async fn process_transactions(&self, mut receiver: mpsc::Receiver<(RowIndex, TransactionRecord)>) -> anyhow::Result<Vec<Unprocessable>> {
        let aggregator = self.pipeline.aggregator();
        let mut actors = HashMap::<AccountId, PartitionActor>::new();
        let mut unprocessable = Vec::new();

        // Row-local stages run as rows arrive; the shuffle routes each sender to exactly one actor.
        while let Some((row, record)) = receiver.recv().await {
            let featurized = match self.pipeline.prepare(row, record) {
                Ok(featurized) => featurized,
                Err(rejected) => {
                    warn!("{rejected}");
                    unprocessable.push(rejected);
                    continue;
                }
            };

            let actor = actors.entry(featurized.sender_account().to_string()).or_insert_with_key(|account_id| {
                PartitionActor::new(account_id.clone(), self.storage.clone(), aggregator)
            });

            if !actor.accept(featurized) {
                bail!("Partition actor could not accept row [{row}]");
            }
        }

        info!("Input drained, waiting on [{}] partitions", actors.len());

        // Barrier: every partition must be fully materialized and scanned before results are read
        let despawns = actors.into_values().map(|actor| actor.despawn());
        let failures = join_all(despawns).await.into_iter().filter_map(Result::err).count();

        if failures > 0 {
            bail!("[{failures}] partition actors did not despawn gracefully");
        }

        Ok(unprocessable)
    }
}
