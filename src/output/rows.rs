use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{EnrichedRecord, Unprocessable};
use crate::types::{RowIndex, TIMESTAMP_FORMAT};

pub const ENRICHED_HEADER: [&str; 18] = [
    "Time", "Date", "Sender_account", "Receiver_account", "Amount", "Payment_currency",
    "Received_currency", "Sender_bank_location", "Receiver_bank_location", "Payment_type",
    "Is_laundering", "Laundering_type", "transaction_timestamp", "transaction_hour",
    "transaction_dow", "is_structuring_amount", "is_sender_high_risk", "sender_txn_count_24h"
];

pub const UNPROCESSABLE_HEADER: [&str; 14] = [
    "row", "reason", "Time", "Date", "Sender_account", "Receiver_account", "Amount",
    "Payment_currency", "Received_currency", "Sender_bank_location", "Receiver_bank_location",
    "Payment_type", "Is_laundering", "Laundering_type"
];

// Field order must follow ENRICHED_HEADER
#[derive(Serialize)]
pub struct EnrichedRow<'a> {
    time: Option<&'a str>,
    date: Option<&'a str>,
    sender_account: Option<&'a str>,
    receiver_account: Option<&'a str>,
    amount: Option<Decimal>,
    payment_currency: Option<&'a str>,
    received_currency: Option<&'a str>,
    sender_bank_location: Option<&'a str>,
    receiver_bank_location: Option<&'a str>,
    payment_type: Option<&'a str>,
    is_laundering: Option<u8>,
    laundering_type: Option<&'a str>,
    transaction_timestamp: Option<String>,
    transaction_hour: Option<u32>,
    transaction_dow: Option<u32>,
    is_structuring_amount: bool,
    is_sender_high_risk: bool,
    sender_txn_count_24h: Option<u64>
}

impl<'a> From<&'a EnrichedRecord> for EnrichedRow<'a> {
    fn from(enriched: &'a EnrichedRecord) -> Self {
        let record = enriched.record();
        let featurized = &enriched.featurized;

        Self {
            time: record.time.as_deref(),
            date: record.date.as_deref(),
            sender_account: record.sender_account.as_deref(),
            receiver_account: record.receiver_account.as_deref(),
            amount: record.amount,
            payment_currency: record.payment_currency.as_deref(),
            received_currency: record.received_currency.as_deref(),
            sender_bank_location: record.sender_bank_location.as_deref(),
            receiver_bank_location: record.receiver_bank_location.as_deref(),
            payment_type: record.payment_type.as_deref(),
            is_laundering: record.is_laundering,
            laundering_type: record.laundering_type.as_deref(),
            transaction_timestamp: enriched.transaction_timestamp()
                .map(|timestamp| timestamp.format(TIMESTAMP_FORMAT).to_string()),
            transaction_hour: featurized.transaction_hour,
            transaction_dow: featurized.transaction_dow,
            is_structuring_amount: featurized.is_structuring_amount,
            is_sender_high_risk: featurized.is_sender_high_risk,
            sender_txn_count_24h: enriched.sender_txn_count_24h
        }
    }
}

// Field order must follow UNPROCESSABLE_HEADER
#[derive(Serialize)]
pub struct UnprocessableRow<'a> {
    row: RowIndex,
    reason: String,
    time: Option<&'a str>,
    date: Option<&'a str>,
    sender_account: Option<&'a str>,
    receiver_account: Option<&'a str>,
    amount: Option<Decimal>,
    payment_currency: Option<&'a str>,
    received_currency: Option<&'a str>,
    sender_bank_location: Option<&'a str>,
    receiver_bank_location: Option<&'a str>,
    payment_type: Option<&'a str>,
    is_laundering: Option<u8>,
    laundering_type: Option<&'a str>
}

impl<'a> From<&'a Unprocessable> for UnprocessableRow<'a> {
    fn from(rejected: &'a Unprocessable) -> Self {
        let record = &rejected.record;

        Self {
            row: rejected.row,
            reason: rejected.reason.to_string(),
            time: record.time.as_deref(),
            date: record.date.as_deref(),
            sender_account: record.sender_account.as_deref(),
            receiver_account: record.receiver_account.as_deref(),
            amount: record.amount,
            payment_currency: record.payment_currency.as_deref(),
            received_currency: record.received_currency.as_deref(),
            sender_bank_location: record.sender_bank_location.as_deref(),
            receiver_bank_location: record.receiver_bank_location.as_deref(),
            payment_type: record.payment_type.as_deref(),
            is_laundering: record.is_laundering,
            laundering_type: record.laundering_type.as_deref()
        }
    }
}
