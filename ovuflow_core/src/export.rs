//! CSV export of hormone series.
//!
//! Rows carry the per-day levels plus overlay flags so a plotting tool can
//! draw the ovulation marker and fertile bands without recomputing them.

use crate::hormones::{HormoneSample, HormoneSeries};
use crate::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    day: u32,
    estrogen: f64,
    progesterone: f64,
    lh: f64,
    ovulation: bool,
    fertile: bool,
}

impl CsvRow {
    fn new(sample: &HormoneSample, series: &HormoneSeries) -> Self {
        let day = i64::from(sample.day);
        CsvRow {
            day: sample.day,
            estrogen: sample.estrogen,
            progesterone: sample.progesterone,
            lh: sample.lh,
            ovulation: day == series.ovulation_day(),
            fertile: series.is_fertile_day(day),
        }
    }
}

/// Write the series as CSV (with header) to any writer
pub fn write_series_csv<W: Write>(series: &HormoneSeries, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for sample in &series.samples {
        writer.serialize(CsvRow::new(sample, series))?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the series to a CSV file, creating parent directories
pub fn export_series_csv(series: &HormoneSeries, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_series_csv(series, &file)?;
    file.sync_all()?;

    tracing::info!("Exported {} hormone samples to {:?}", series.samples.len(), path);
    Ok(series.samples.len())
}
