use thiserror::Error;

use crate::models::TransactionRecord;
use crate::types::RowIndex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Sender account is missing for row [{row}], record cannot be partitioned")]
    MissingSenderAccount {
        row: RowIndex
    }
}

impl RecordError {
    pub fn missing_sender_account(row: RowIndex) -> Self {
        Self::MissingSenderAccount { row }
    }
}

/// A row routed to the side output instead of the enriched dataset.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Row [{row}] is unprocessable: {reason}")]
pub struct Unprocessable {
    pub row: RowIndex,
    pub record: TransactionRecord,
    pub reason: RecordError
}

impl Unprocessable {
    pub fn new(row: RowIndex, record: TransactionRecord, reason: RecordError) -> Self {
        Self { row, record, reason }
    }
}
