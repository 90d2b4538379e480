use std::collections::HashMap;

use tracing::trace;

use crate::models::{EnrichedRecord, FeaturizedRecord};
use crate::types::{AccountId, EpochSeconds};

/// Computes the trailing range-window count of every record, per sender account.
#[derive(Debug, Clone, Copy)]
pub struct WindowedAggregator {
    window_seconds: EpochSeconds
}

impl WindowedAggregator {
    pub fn new(window_seconds: EpochSeconds) -> Self {
        Self { window_seconds }
    }

    /// Partitions the records by sender account and enriches each partition.
    ///
    /// The output has the same cardinality as the input and is ordered by row.
    pub fn compute_rolling_counts(&self, records: Vec<FeaturizedRecord>) -> Vec<EnrichedRecord> {
        let mut partitions = HashMap::<AccountId, Vec<FeaturizedRecord>>::new();

        for record in records {
            partitions.entry(record.sender_account().to_string())
                .or_default()
                .push(record);
        }

        let mut enriched: Vec<EnrichedRecord> = partitions.into_values()
            .flat_map(|partition| self.enrich_partition(partition))
            .collect();

        enriched.sort_by_key(EnrichedRecord::row);
        enriched
    }

    /// Enriches a single, fully materialized partition.
    ///
    /// Records without a timestamp take no part in the window and come back with a null
    /// count. The rest are sorted by time (row as tie-breaker) and scanned once.
    pub fn enrich_partition(&self, records: Vec<FeaturizedRecord>) -> Vec<EnrichedRecord> {
        debug_assert!(records.windows(2).all(|pair| pair[0].sender_account() == pair[1].sender_account()));

        let mut enriched = Vec::with_capacity(records.len());
        let mut timed = Vec::with_capacity(records.len());

        for record in records {
            match record.normalized.epoch_seconds() {
                Some(seconds) => timed.push((seconds, record)),
                None => enriched.push(EnrichedRecord {
                    featurized: record,
                    sender_txn_count_24h: None
                })
            }
        }

        timed.sort_by_key(|(seconds, record)| (*seconds, record.row()));

        let timestamps: Vec<EpochSeconds> = timed.iter().map(|(seconds, _)| *seconds).collect();
        let counts = rolling_counts(&timestamps, self.window_seconds);

        trace!("Partition scanned: {} timed, {} untimed", timed.len(), enriched.len());

        enriched.extend(timed.into_iter().zip(counts).map(|((_, featurized), count)| EnrichedRecord {
            featurized,
            sender_txn_count_24h: Some(count)
        }));

        enriched
    }
}

/// For each timestamp `t` of an ascending slice, counts the entries within `[t - window, t]`.
///
/// Entries equal to `t` all count, including those sorted after it, so every member of a
/// run of duplicates gets the same value. The lower bound only ever moves forward, which
/// keeps the scan linear.
pub fn rolling_counts(sorted: &[EpochSeconds], window: EpochSeconds) -> Vec<u64> {
    debug_assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));

    let mut counts = Vec::with_capacity(sorted.len());
    let mut lower = 0;
    let mut start = 0;

    while start < sorted.len() {
        let current = sorted[start];
        let end = start + sorted[start..].iter().take_while(|&&seconds| seconds == current).count();
        let floor = current.saturating_sub(window);

        while sorted[lower] < floor {
            lower += 1;
        }

        let count = (end - lower) as u64;
        counts.extend(std::iter::repeat_n(count, end - start));
        start = end;
    }

    counts
}
