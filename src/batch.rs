//! Batch snapping of many cursor positions
//!
//! Requests come in as CSV rows, are resolved in parallel with rayon and are written back as
//! CSV with a short statistics header.

use std::io::{Read, Write};
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SnapConfig;
use crate::error::{Error, Result};
use crate::snap::{SnapMode, Snapper};
use crate::types::Point;

/// One input row. Empty penultimate columns select the single-anchor fallback.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnapRequest {
    pub last_x: f64,
    pub last_y: f64,
    #[serde(default)]
    pub penultimate_x: Option<f64>,
    #[serde(default)]
    pub penultimate_y: Option<f64>,
    pub cursor_x: f64,
    pub cursor_y: f64,
    #[serde(default)]
    pub name: Option<String>,
}

impl SnapRequest {
    /// Anchors in drawing order: penultimate (if any), then last
    pub fn anchors(&self) -> Vec<Point> {
        let last = Point::new(self.last_x, self.last_y);
        match (self.penultimate_x, self.penultimate_y) {
            (Some(x), Some(y)) => vec![Point::new(x, y), last],
            _ => vec![last],
        }
    }

    pub fn cursor(&self) -> Point {
        Point::new(self.cursor_x, self.cursor_y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Fallback,
    Perpendicular,
    Failed,
}

impl From<SnapMode> for RowStatus {
    fn from(mode: SnapMode) -> Self {
        match mode {
            SnapMode::Fallback => RowStatus::Fallback,
            SnapMode::Perpendicular => RowStatus::Perpendicular,
        }
    }
}

/// One output row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapRow {
    pub name: String,
    pub mode: RowStatus,
    pub snapped_x: Option<f64>,
    pub snapped_y: Option<f64>,
    pub azimuth: Option<f64>,
}

/// Results of a batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub rows: Vec<SnapRow>,
    /// Rows that could not be parsed
    pub skipped: usize,
    pub execution_time_ms: f64,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.rows.len() + self.skipped
    }

    pub fn successful(&self) -> usize {
        self.rows.iter().filter(|row| row.mode != RowStatus::Failed).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }

    /// Writes the statistics header followed by the result rows
    pub fn write_csv<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "# Statistics")?;
        writeln!(writer, "# Total rows: {}", self.total())?;
        writeln!(writer, "# Successful: {}", self.successful())?;
        writeln!(writer, "# Failed: {}", self.failed())?;
        writeln!(writer, "# Execution time: {:.2} ms", self.execution_time_ms)?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Parses request rows, returning them with the number of rows that failed to parse
pub fn read_requests<R: Read>(reader: R) -> (Vec<SnapRequest>, usize) {
    let mut csv_reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut requests = Vec::new();
    let mut skipped = 0;

    for (index, result) in csv_reader.deserialize::<SnapRequest>().enumerate() {
        match result {
            Ok(request) => requests.push(request),
            Err(e) => {
                warn!("Skipping row {}: {}", index + 1, e);
                skipped += 1;
            }
        }
    }

    (requests, skipped)
}

/// Resolves all requests in parallel, one snapper per worker thread
pub fn resolve_requests(config: &SnapConfig, requests: &[SnapRequest]) -> Vec<SnapRow> {
    requests
        .par_iter()
        .enumerate()
        .map_init(
            || Snapper::from_config(config),
            |snapper, (index, request)| {
                let name = request.name.clone().unwrap_or_else(|| (index + 1).to_string());

                let outcome = match snapper {
                    Ok(snapper) => snapper.snap(&request.anchors(), request.cursor()),
                    Err(e) => Err(Error::Config(e.to_string())),
                };

                match outcome {
                    Ok(outcome) => SnapRow {
                        name,
                        mode: outcome.mode.into(),
                        snapped_x: Some(outcome.path[1].x),
                        snapped_y: Some(outcome.path[1].y),
                        azimuth: outcome.azimuth,
                    },
                    Err(e) => {
                        warn!("Row {} failed: {}", name, e);
                        SnapRow {
                            name,
                            mode: RowStatus::Failed,
                            snapped_x: None,
                            snapped_y: None,
                            azimuth: None,
                        }
                    }
                }
            },
        )
        .collect()
}

/// Reads, resolves and times a whole CSV batch
pub fn run_batch<R: Read>(config: &SnapConfig, input: R) -> BatchReport {
    let start = Instant::now();

    let (requests, skipped) = read_requests(input);
    let rows = resolve_requests(config, &requests);

    let report = BatchReport {
        rows,
        skipped,
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    info!(
        "Batch finished: {} rows, {} successful, {} failed in {:.2} ms",
        report.total(),
        report.successful(),
        report.failed(),
        report.execution_time_ms
    );

    report
}
