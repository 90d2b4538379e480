use super::{rolling_counts, WindowedAggregator};

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use chrono::DateTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::models::{EnrichedRecord, FeaturizedRecord, NormalizedRecord, TransactionRecord};
use crate::types::{EpochSeconds, RowIndex};

const DAY: EpochSeconds = 86_400;

fn create_featurized(row: RowIndex, account: &str, seconds: Option<EpochSeconds>) -> Result<FeaturizedRecord> {
    let transaction_timestamp = match seconds {
        Some(seconds) => Some(DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| anyhow!("Timestamp out of range"))?
            .naive_utc()),
        None => None
    };

    let record = TransactionRecord {
        time: None,
        date: None,
        sender_account: Some(account.to_string()),
        receiver_account: None,
        amount: Some(Decimal::from(100)),
        payment_currency: None,
        received_currency: None,
        sender_bank_location: None,
        receiver_bank_location: None,
        payment_type: None,
        is_laundering: None,
        laundering_type: None
    };

    Ok(FeaturizedRecord {
        normalized: NormalizedRecord {
            row,
            sender_account: account.to_string(),
            record,
            transaction_timestamp
        },
        transaction_hour: None,
        transaction_dow: None,
        is_structuring_amount: false,
        is_sender_high_risk: false
    })
}

fn counts_by_row(enriched: &[EnrichedRecord]) -> Vec<Option<u64>> {
    enriched.iter().map(|record| record.sender_txn_count_24h).collect()
}

fn naive_counts(timestamps: &[EpochSeconds], window: EpochSeconds) -> Vec<u64> {
    timestamps.iter()
        .map(|&current| timestamps.iter().filter(|&&other| current - window <= other && other <= current).count() as u64)
        .collect()
}

#[test]
fn test_trailing_window_scenario_includes_record_exactly_one_window_back() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);
    let records = vec![
        create_featurized(0, "ACC1", Some(0))?,
        create_featurized(1, "ACC1", Some(3_600))?,
        create_featurized(2, "ACC1", Some(90_000))?,
    ];

    let enriched = aggregator.compute_rolling_counts(records);

    assert_eq!(counts_by_row(&enriched), vec![Some(1), Some(2), Some(2)]);

    Ok(())
}

#[test]
fn test_duplicate_timestamps_count_each_other() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);
    let records = vec![
        create_featurized(0, "ACC2", Some(1_000))?,
        create_featurized(1, "ACC2", Some(1_000))?,
    ];

    let enriched = aggregator.compute_rolling_counts(records);

    assert_eq!(counts_by_row(&enriched), vec![Some(2), Some(2)]);

    Ok(())
}

#[test]
fn test_window_boundary_is_inclusive_and_one_second_past_is_excluded() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);

    let inside = aggregator.compute_rolling_counts(vec![
        create_featurized(0, "ACC1", Some(0))?,
        create_featurized(1, "ACC1", Some(DAY))?,
    ]);
    assert_eq!(counts_by_row(&inside), vec![Some(1), Some(2)]);

    let outside = aggregator.compute_rolling_counts(vec![
        create_featurized(0, "ACC1", Some(0))?,
        create_featurized(1, "ACC1", Some(DAY + 1))?,
    ]);
    assert_eq!(counts_by_row(&outside), vec![Some(1), Some(1)]);

    Ok(())
}

#[test]
fn test_window_never_crosses_partitions() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);
    let records = vec![
        create_featurized(0, "ACC1", Some(100))?,
        create_featurized(1, "ACC2", Some(100))?,
        create_featurized(2, "ACC1", Some(200))?,
        create_featurized(3, "ACC3", Some(50))?,
        create_featurized(4, "ACC2", Some(300))?,
    ];

    let enriched = aggregator.compute_rolling_counts(records);

    assert_eq!(counts_by_row(&enriched), vec![Some(1), Some(1), Some(2), Some(1), Some(2)]);

    Ok(())
}

#[test]
fn test_untimed_records_pass_through_without_contributing() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);
    let records = vec![
        create_featurized(0, "ACC1", None)?,
        create_featurized(1, "ACC1", Some(10))?,
        create_featurized(2, "ACC1", None)?,
        create_featurized(3, "ACC1", Some(20))?,
        create_featurized(4, "ACC9", None)?,
    ];

    let enriched = aggregator.compute_rolling_counts(records);

    assert_eq!(enriched.len(), 5);
    assert_eq!(counts_by_row(&enriched), vec![None, Some(1), None, Some(2), None]);

    Ok(())
}

#[test]
fn test_output_follows_input_rows_regardless_of_time_order() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);
    let records = vec![
        create_featurized(0, "ACC1", Some(5_000))?,
        create_featurized(1, "ACC1", Some(1_000))?,
        create_featurized(2, "ACC1", Some(3_000))?,
    ];

    let enriched = aggregator.compute_rolling_counts(records);
    let rows: Vec<RowIndex> = enriched.iter().map(EnrichedRecord::row).collect();

    assert_eq!(rows, vec![0, 1, 2]);
    assert_eq!(counts_by_row(&enriched), vec![Some(3), Some(1), Some(2)]);

    Ok(())
}

#[test]
fn test_empty_input_yields_empty_output() {
    let aggregator = WindowedAggregator::new(DAY);

    assert!(aggregator.compute_rolling_counts(Vec::new()).is_empty());
    assert!(rolling_counts(&[], DAY).is_empty());
}

#[test]
fn test_rolling_counts_handles_extreme_timestamps() {
    let counts = rolling_counts(&[EpochSeconds::MIN, EpochSeconds::MIN, 0], DAY);

    assert_eq!(counts, vec![2, 2, 1]);
}

#[test]
fn test_rolling_counts_match_pairwise_reference() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let length = rng.gen_range(0..60);
        let spread = rng.gen_range(1..(5 * DAY));
        let mut timestamps: Vec<EpochSeconds> = (0..length).map(|_| rng.gen_range(0..spread)).collect();
        timestamps.sort_unstable();

        assert_eq!(rolling_counts(&timestamps, DAY), naive_counts(&timestamps, DAY));
    }
}

#[test]
fn test_aggregation_is_identical_to_pairwise_reference_per_partition() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let accounts = ["A", "B", "C", "D"];
    let mut records = Vec::new();
    let mut timeline = HashMap::<&str, Vec<EpochSeconds>>::new();

    for row in 0..500 {
        let account = accounts[rng.gen_range(0..accounts.len())];
        let seconds = if rng.gen_bool(0.05) { None } else { Some(rng.gen_range(0..(10 * DAY)) / 600 * 600) };

        if let Some(seconds) = seconds {
            timeline.entry(account).or_default().push(seconds);
        }

        records.push(create_featurized(row, account, seconds)?);
    }

    let enriched = WindowedAggregator::new(DAY).compute_rolling_counts(records);

    assert_eq!(enriched.len(), 500);

    for record in &enriched {
        let expected = record.featurized.normalized.epoch_seconds().map(|current| {
            timeline[record.sender_account()].iter()
                .filter(|&&other| current - DAY <= other && other <= current)
                .count() as u64
        });

        assert_eq!(record.sender_txn_count_24h, expected, "row {}", record.row());

        if expected.is_some() {
            assert!(record.sender_txn_count_24h >= Some(1));
        }
    }

    Ok(())
}

#[test]
fn test_aggregation_is_independent_of_input_order() -> Result<()> {
    let aggregator = WindowedAggregator::new(DAY);
    let forward: Vec<FeaturizedRecord> = (0..50)
        .map(|row| create_featurized(row, if row % 3 == 0 { "X" } else { "Y" }, Some((row as EpochSeconds * 7_919) % (3 * DAY))))
        .collect::<Result<_>>()?;
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(aggregator.compute_rolling_counts(forward), aggregator.compute_rolling_counts(reversed));

    Ok(())
}
