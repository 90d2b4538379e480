use crate::models::{RecordError, TransactionRecord, Unprocessable};
use crate::types::{epoch_seconds, normalize, AccountId, EpochSeconds, RowIndex, Timestamp};

/// A raw record that has been assigned a partition and a combined timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    /// Position of the row in the input, used to restore input order on output.
    pub row: RowIndex,
    pub sender_account: AccountId,
    pub record: TransactionRecord,
    /// `None` when either `Date` or `Time` failed to parse.
    pub transaction_timestamp: Option<Timestamp>
}

impl NormalizedRecord {
    /// Normalizes the timestamp of a raw record.
    ///
    /// # Errors
    /// Hands the record back as `Unprocessable` when it has no sender, since it cannot be
    /// assigned to any window partition. A bad timestamp is not an error.
    pub fn try_new(row: RowIndex, record: TransactionRecord) -> Result<Self, Unprocessable> {
        let Some(sender_account) = record.partition_key().map(str::to_string) else {
            return Err(Unprocessable::new(row, record, RecordError::missing_sender_account(row)))
        };

        let transaction_timestamp = normalize(record.date.as_deref(), record.time.as_deref());

        Ok(Self {
            row,
            sender_account,
            record,
            transaction_timestamp
        })
    }

    pub fn epoch_seconds(&self) -> Option<EpochSeconds> {
        self.transaction_timestamp.as_ref().map(epoch_seconds)
    }
}

/// A normalized record plus its row-local risk features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturizedRecord {
    pub normalized: NormalizedRecord,
    /// Hour of day, 0-23.
    pub transaction_hour: Option<u32>,
    /// Day of week, 1 = Sunday through 7 = Saturday.
    pub transaction_dow: Option<u32>,
    pub is_structuring_amount: bool,
    pub is_sender_high_risk: bool
}

impl FeaturizedRecord {
    pub fn row(&self) -> RowIndex {
        self.normalized.row
    }

    pub fn sender_account(&self) -> &str {
        &self.normalized.sender_account
    }
}

/// The final output unit: a featurized record plus its trailing-window count.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub featurized: FeaturizedRecord,
    /// Number of same-sender records inside the trailing window, this one included.
    /// `None` when the record has no timestamp.
    pub sender_txn_count_24h: Option<u64>
}

impl EnrichedRecord {
    pub fn row(&self) -> RowIndex {
        self.featurized.row()
    }

    pub fn sender_account(&self) -> &str {
        self.featurized.sender_account()
    }

    pub fn record(&self) -> &TransactionRecord {
        &self.featurized.normalized.record
    }

    pub fn transaction_timestamp(&self) -> Option<&Timestamp> {
        self.featurized.normalized.transaction_timestamp.as_ref()
    }
}
