//! Per-station daily series, ready for rendering.

pub mod align;
pub mod missing;
pub mod writer;

use std::collections::{btree_map::Entry, BTreeMap};

use chrono::{Datelike, NaiveDate};

use crate::reading::{DailyObservation, Measurement, ObservationTable};

pub use align::outer_join;
pub use missing::write_missing_report;
pub use writer::write_series;

/// Parameter values of one station-day after alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    pub date: NaiveDate,
    pub values: Vec<Measurement>,
}

impl AlignedRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(Measurement::is_missing)
    }
}

/// A station's records, one per date, in ascending date order.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSeries {
    station_id: String,
    records: Vec<AlignedRecord>,
}

impl StationSeries {
    /// Builds a series from records keyed by date. The map order is the series order.
    pub fn from_dates(station_id: &str, records: BTreeMap<NaiveDate, Vec<Measurement>>) -> Self {
        let records = records
            .into_iter()
            .map(|(date, values)| AlignedRecord { date, values })
            .collect();

        StationSeries {
            station_id: station_id.to_string(),
            records,
        }
    }

    /// Single-parameter series. A date reported twice keeps its first row.
    pub fn from_observations(station_id: &str, observations: Vec<DailyObservation>) -> Self {
        let mut by_date = BTreeMap::new();
        let mut duplicates = 0;

        for obs in observations {
            match by_date.entry(obs.date) {
                Entry::Vacant(e) => {
                    e.insert(obs.values);
                }
                Entry::Occupied(_) => duplicates += 1,
            }
        }

        if duplicates > 0 {
            tracing::debug!("Station {}: ignored {} duplicate dates", station_id, duplicates);
        }

        StationSeries::from_dates(station_id, by_date)
    }

    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    pub fn records(&self) -> &[AlignedRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        let first = self.records.first()?;
        let last = self.records.last()?;

        Some((first.year(), last.year()))
    }

    /// Inclusive span of years, counting years without data. Zero for an empty series.
    pub fn years_difference(&self) -> i32 {
        self.year_range()
            .map_or(0, |(min_year, max_year)| max_year - min_year + 1)
    }

    /// `O{station}{minYear}{maxYear}`, with no separators.
    pub fn observed_name(&self) -> String {
        match self.year_range() {
            Some((min_year, max_year)) => format!("O{}{}{}", self.station_id, min_year, max_year),
            None => format!("O{}", self.station_id),
        }
    }
}

/// Splits a table by station id, keeping row order within each station.
///
/// Every station named in the table gets an entry, empty when none of its
/// rows carried a valid date.
pub fn group_by_station(table: ObservationTable) -> BTreeMap<String, Vec<DailyObservation>> {
    let mut groups: BTreeMap<String, Vec<DailyObservation>> = table
        .stations
        .into_iter()
        .map(|station| (station, Vec::new()))
        .collect();

    for obs in table.observations {
        groups.entry(obs.station_id.clone()).or_default().push(obs);
    }

    groups
}

// -- Tests -------------------------------------------------------------------
