//! Reports of station-days with a missing parameter.
//!
//! One line per missing date, numbered from 1: `3- 2020-01-04 (tmax)`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use super::StationSeries;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValueEntry {
    pub sequence_number: usize,
    pub date: NaiveDate,
    /// Which parameter was found missing, for multi-parameter series.
    pub parameter: Option<String>,
}

impl MissingValueEntry {
    pub fn to_line(&self) -> String {
        let date = self.date.format("%Y-%m-%d");
        match &self.parameter {
            Some(label) => format!("{}- {} ({})", self.sequence_number, date, label),
            None => format!("{}- {}", self.sequence_number, date),
        }
    }
}

/// Lists the dates of `series` with at least one missing value, in date order.
///
/// `label_order` pairs a value index with its label; the first listed index
/// that is missing names the entry. A date missing several values therefore
/// carries only the first label. An empty `label_order` leaves entries unlabelled.
pub fn missing_entries(
    series: &StationSeries,
    label_order: &[(usize, &str)],
) -> Vec<MissingValueEntry> {
    series
        .records()
        .iter()
        .filter(|record| record.has_missing())
        .enumerate()
        .map(|(i, record)| {
            let parameter = label_order
                .iter()
                .find(|(idx, _)| record.values.get(*idx).is_some_and(|v| v.is_missing()))
                .or(label_order.last())
                .map(|(_, label)| label.to_string());

            MissingValueEntry {
                sequence_number: i + 1,
                date: record.date,
                parameter,
            }
        })
        .collect()
}

pub fn report_file_name(station_id: &str) -> String {
    format!("missed_values_{station_id}.csv")
}

/// Writes the report for `series` into `report_dir`.
///
/// Returns `None`, and removes any earlier report for the station, when no
/// value is missing.
pub fn write_missing_report(
    report_dir: &Path,
    series: &StationSeries,
    label_order: &[(usize, &str)],
) -> Result<Option<PathBuf>> {
    let path = report_dir.join(report_file_name(series.station_id()));
    let entries = missing_entries(series, label_order);

    if entries.is_empty() {
        if path.is_file() {
            tracing::debug!("Removing stale report {}", path.display());
            fs::remove_file(&path)?;
        }
        return Ok(None);
    }

    fs::create_dir_all(report_dir)?;
    let mut text = String::new();
    for entry in &entries {
        text.push_str(&entry.to_line());
        text.push('\n');
    }
    fs::write(&path, text)?;

    Ok(Some(path))
}

// -- Tests -------------------------------------------------------------------
