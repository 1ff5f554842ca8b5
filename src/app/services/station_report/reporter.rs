//! Report output

use crate::app::models::{ChargerReport, ChargerTotals, StationSummary, format_coordinate};
use crate::cli::args::OutputFormat;
use crate::{Error, Result};
use std::io::Write;

/// `id: 1 geo:(42.0,-71.0) num_chargers:5`
pub fn format_station_line(station: &StationSummary) -> String {
    format!(
        "id: {} geo:({},{}) num_chargers:{}",
        station.id,
        format_coordinate(station.latitude),
        format_coordinate(station.longitude),
        station.num_chargers
    )
}

/// `total_chargers:1 total_connections:5`
pub fn format_totals_line(totals: &ChargerTotals) -> String {
    format!(
        "total_chargers:{} total_connections:{}",
        totals.total_chargers, totals.total_connections
    )
}

/// Writes a [`ChargerReport`] to any output stream
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Write the full report and flush
    pub fn write_report(&mut self, report: &ChargerReport) -> Result<()> {
        match self.format {
            OutputFormat::Human => self.write_human(report)?,
            OutputFormat::Json => self.write_json(report)?,
        }

        self.out
            .flush()
            .map_err(|e| Error::io("Failed to flush report output", e))
    }

    fn write_human(&mut self, report: &ChargerReport) -> Result<()> {
        for station in &report.stations {
            writeln!(self.out, "{}", format_station_line(station))
                .map_err(|e| Error::io("Failed to write station line", e))?;
        }

        writeln!(self.out, "{}", format_totals_line(&report.totals))
            .map_err(|e| Error::io("Failed to write summary line", e))
    }

    fn write_json(&mut self, report: &ChargerReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report).map_err(|e| {
            if e.is_io() {
                Error::io("Failed to write report", e.into())
            } else {
                Error::parse("Failed to serialize report", Some(e))
            }
        })?;

        writeln!(self.out).map_err(|e| Error::io("Failed to write report", e))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
