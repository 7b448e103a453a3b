//! Daily observation tables (`;`-separated, one row per station-day).
//!
//! ```text
//! stn;time;tre200dn
//! ABO;19590101;-5.2
//! ABO;19590102;-
//! ```

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::Measurement;
use crate::{
    config::Config,
    error::{Error, Result},
};

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    pub station_id: String,
    pub date: NaiveDate,
    /// One entry per requested parameter column, in request order.
    pub values: Vec<Measurement>,
}

#[derive(Debug, Default)]
pub struct ObservationTable {
    pub observations: Vec<DailyObservation>,
    /// Every station named by a row, including rows dropped for their date.
    pub stations: BTreeSet<String>,
    /// Rows dropped because their date did not parse or their station is blank.
    pub dropped_rows: usize,
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Reads an observation table, keeping the given parameter columns.
///
/// Blank lines are removed first. The station of a row comes from the
/// station column, else from `fallback_station`; with neither, the station
/// column is reported missing. Rows with an unparseable date are dropped but
/// their station is still recorded. A missing time or parameter column is an
/// error.
pub fn read_observations(
    text: &str,
    columns: &[&str],
    config: &Config,
    fallback_station: Option<&str>,
) -> Result<ObservationTable> {
    let content = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let column_index = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                available: headers.join(", "),
            })
    };

    let time_idx = column_index(&config.time_column)?;
    let value_idx = columns
        .iter()
        .map(|&c| column_index(c))
        .collect::<Result<Vec<_>>>()?;
    let station_idx = headers.iter().position(|h| *h == config.station_column);
    if station_idx.is_none() && fallback_station.is_none() {
        column_index(&config.station_column)?;
    }

    let mut table = ObservationTable::default();

    for record in reader.records() {
        let record = record?;

        let station_id = station_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(fallback_station);
        let Some(station_id) = station_id.map(str::to_string) else {
            table.dropped_rows += 1;
            continue;
        };
        table.stations.insert(station_id.clone());

        let Some(date) = record.get(time_idx).and_then(parse_date) else {
            table.dropped_rows += 1;
            continue;
        };

        let values = value_idx
            .iter()
            .map(|&i| record.get(i).map_or(Measurement::Missing, Measurement::parse))
            .collect();

        table.observations.push(DailyObservation {
            station_id,
            date,
            values,
        });
    }

    if table.dropped_rows > 0 {
        tracing::debug!("Dropped {} rows without a usable date or station", table.dropped_rows);
    }

    Ok(table)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn values(table: &ObservationTable) -> Vec<Measurement> {
        table.observations.iter().map(|o| o.values[0]).collect()
    }

    #[test]
    fn should_normalise_wind_column() {
        let text = "\n\nstn;time;fkl010d0\nSMA;20200101;3.2\nSMA;20200102;\nSMA;20200103;abc\nSMA;20200104;4.1\n";
        let table = read_observations(text, &["fkl010d0"], &Config::default(), Some("XXX")).unwrap();

        assert_eq!(
            values(&table),
            vec![
                Measurement::Present(3.2),
                Measurement::Missing,
                Measurement::Missing,
                Measurement::Present(4.1),
            ]
        );
        assert_eq!(table.observations[0].station_id, "SMA");
        assert_eq!(
            table.observations[3].date,
            NaiveDate::from_ymd_opt(2020, 1, 4).unwrap()
        );
    }

    #[test]
    fn should_drop_unparseable_dates() {
        let text = "stn;time;tre200dn\nABO;20200230;1.0\nABO;2020-03-01;2.0\nABO;20201231;3.0\n";
        let table = read_observations(text, &["tre200dn"], &Config::default(), Some("ABO")).unwrap();

        assert_eq!(table.observations.len(), 1);
        assert_eq!(table.dropped_rows, 2);
        assert!(table.stations.contains("ABO"));
        assert_eq!(
            table.observations[0].date,
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()
        );
    }

    #[test]
    fn should_fall_back_to_file_station() {
        let text = "time;tre200dx\n20200101;7.5\n";
        let table = read_observations(text, &["tre200dx"], &Config::default(), Some("BAS")).unwrap();

        assert_eq!(table.observations[0].station_id, "BAS");
    }

    #[test]
    fn should_read_short_rows_as_missing() {
        let text = "stn;time;tre200dn\nABO;20200101\n";
        let table = read_observations(text, &["tre200dn"], &Config::default(), Some("ABO")).unwrap();

        assert_eq!(values(&table), vec![Measurement::Missing]);
    }

    #[test]
    fn should_fail_on_missing_column() {
        let text = "stn;time;tre200dx\nABO;20200101;1.0\n";
        let err = read_observations(text, &["tre200dn"], &Config::default(), Some("ABO")).unwrap_err();

        match err {
            Error::MissingColumn { column, available } => {
                assert_eq!(column, "tre200dn");
                assert_eq!(available, "stn, time, tre200dx");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_record_station_with_only_undated_rows() {
        let text = "stn;time;fkl010d0\nSMA;bad;1.0\nSMA;2020-01-01;2.0\nKLO;20200101;3.0\n";
        let table = read_observations(text, &["fkl010d0"], &Config::default(), None).unwrap();

        assert_eq!(table.observations.len(), 1);
        assert_eq!(
            table.stations.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["KLO", "SMA"]
        );
    }

    #[test]
    fn should_require_station_column_without_fallback() {
        let text = "time;fkl010d0\n20200101;1.0\n";
        let err = read_observations(text, &["fkl010d0"], &Config::default(), None).unwrap_err();

        assert!(matches!(err, Error::MissingColumn { ref column, .. } if column == "stn"));
    }
}
