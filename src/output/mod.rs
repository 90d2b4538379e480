mod rows;

use std::io::Write;

use anyhow::Result;
use csv::WriterBuilder;

use crate::models::{EnrichedRecord, Unprocessable};

use rows::{EnrichedRow, UnprocessableRow, ENRICHED_HEADER, UNPROCESSABLE_HEADER};

/// Writes the enriched dataset as CSV: original columns first, then the derived ones.
///
/// The header is always written, so an empty batch still yields a readable file.
pub fn write_enriched<W: Write>(writer: W, records: &[EnrichedRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(ENRICHED_HEADER)?;

    for record in records {
        writer.serialize(EnrichedRow::from(record))?;
    }

    writer.flush()?;

    Ok(())
}

/// Writes the side output of rows that could not be partitioned.
pub fn write_unprocessable<W: Write>(writer: W, rows: &[Unprocessable]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(UNPROCESSABLE_HEADER)?;

    for rejected in rows {
        writer.serialize(UnprocessableRow::from(rejected))?;
    }

    writer.flush()?;

    Ok(())
}
