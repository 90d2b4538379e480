
use crate::aggregation::WindowedAggregator;
use crate::config::PipelineConfig;
use crate::features::FeatureExtractor;
use crate::models::{EnrichedRecord, FeaturizedRecord, NormalizedRecord, TransactionRecord, Unprocessable};
use crate::types::RowIndex;

/// Result of enriching a batch: the enriched dataset plus the rows that could not be partitioned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub records: Vec<EnrichedRecord>,
    pub unprocessable: Vec<Unprocessable>
}

/// Composes normalization, feature extraction and windowed aggregation, in that order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    extractor: FeatureExtractor,
    aggregator: WindowedAggregator
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(config),
            aggregator: WindowedAggregator::new(config.window_seconds)
        }
    }

    pub fn aggregator(&self) -> WindowedAggregator {
        self.aggregator
    }

    /// Runs the row-local stages on one record.
    pub fn prepare(&self, row: RowIndex, record: TransactionRecord) -> Result<FeaturizedRecord, Unprocessable> {
        NormalizedRecord::try_new(row, record).map(|normalized| self.extractor.derive(normalized))
    }

    /// Enriches a finite batch, numbering rows in iteration order.
    pub fn enrich<I>(&self, rows: I) -> Enrichment
    where
        I: IntoIterator<Item = TransactionRecord>
    {
        let mut featurized = Vec::new();
        let mut unprocessable = Vec::new();

        for (row, record) in (0..).zip(rows) {
            match self.prepare(row, record) {
                Ok(record) => featurized.push(record),
                Err(rejected) => unprocessable.push(rejected)
            }
        }

        Enrichment {
            records: self.aggregator.compute_rolling_counts(featurized),
            unprocessable
        }
    }
}
