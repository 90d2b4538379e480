use std::collections::BTreeSet;

use chrono::{Datelike, Timelike};
use rust_decimal::Decimal;

use crate::config::PipelineConfig;
use crate::models::{FeaturizedRecord, NormalizedRecord};

/// Derives the row-local risk features of a record.
///
/// Holds only the policy it was built from; every derivation is a pure function of the
/// record it is given.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    high_risk_jurisdictions: BTreeSet<String>,
    structuring_lower: Decimal,
    structuring_upper: Decimal
}

impl FeatureExtractor {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            high_risk_jurisdictions: config.high_risk_jurisdictions.clone(),
            structuring_lower: config.structuring_lower,
            structuring_upper: config.structuring_upper
        }
    }

    pub fn derive(&self, normalized: NormalizedRecord) -> FeaturizedRecord {
        let timestamp = normalized.transaction_timestamp.as_ref();
        let transaction_hour = timestamp.map(|timestamp| timestamp.hour());
        let transaction_dow = timestamp.map(|timestamp| timestamp.weekday().number_from_sunday());
        let is_structuring_amount = normalized.record.amount.is_some_and(|amount| self.is_structuring_amount(amount));
        let is_sender_high_risk = self.is_high_risk(normalized.record.sender_bank_location.as_deref());

        FeaturizedRecord {
            normalized,
            transaction_hour,
            transaction_dow,
            is_structuring_amount,
            is_sender_high_risk
        }
    }

    /// Amounts strictly inside the band; both bounds are excluded.
    pub fn is_structuring_amount(&self, amount: Decimal) -> bool {
        self.structuring_lower < amount && amount < self.structuring_upper
    }

    pub fn is_high_risk(&self, jurisdiction: Option<&str>) -> bool {
        jurisdiction.is_some_and(|code| self.high_risk_jurisdictions.contains(code))
    }
}
