use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::AccountId;

/// Represents a single row of the raw transaction CSV (SAML-D column layout).
///
/// The schema is declared rather than inferred. `Date` and `Time` stay as text so that
/// malformed values survive ingestion and degrade to a null timestamp later on.
/// `Sender_account` is optional here because a row without one must be reported,
/// not rejected by the reader.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Time")]
    pub time: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    /// Partition key for the rolling aggregates.
    #[serde(rename = "Sender_account")]
    pub sender_account: Option<AccountId>,
    #[serde(rename = "Receiver_account")]
    pub receiver_account: Option<AccountId>,
    /// Parsed from text so the scale written on input survives to the output.
    /// A blank amount keeps the row; it only disables the structuring flag.
    #[serde(rename = "Amount", with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    #[serde(rename = "Payment_currency")]
    pub payment_currency: Option<String>,
    #[serde(rename = "Received_currency")]
    pub received_currency: Option<String>,
    /// Jurisdiction code of the sending bank, e.g. `GBR` or `IRN`.
    #[serde(rename = "Sender_bank_location")]
    pub sender_bank_location: Option<String>,
    #[serde(rename = "Receiver_bank_location")]
    pub receiver_bank_location: Option<String>,
    #[serde(rename = "Payment_type")]
    pub payment_type: Option<String>,
    #[serde(rename = "Is_laundering")]
    pub is_laundering: Option<u8>,
    #[serde(rename = "Laundering_type")]
    pub laundering_type: Option<String>
}

impl TransactionRecord {
    /// Returns the sender account exactly as read, unless it is absent or empty.
    pub fn partition_key(&self) -> Option<&str> {
        self.sender_account.as_deref()
            .filter(|account| !account.is_empty())
    }
}
