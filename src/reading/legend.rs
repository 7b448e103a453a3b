//! Station metadata from MeteoSwiss legend files.
//!
//! The station table follows a line reading `Stations`, a column header and a
//! separator line, and runs until the first blank line:
//!
//! ```text
//! Stations
//! stn       Name          Parameter  Data source    Longitude/Latitude  Coordinates [km]  Elevation [m]
//! ------------------------------------------------------------------------------------------------------
//! ABO       Adelboden     tre200dn   MeteoSchweiz   7°34'/46°30'        609350/148984     1321
//! ```

use std::collections::{btree_map, BTreeMap};

use crate::error::{Error, Result};

const SECTION_HEADER: &str = "Stations";
// Column header and separator line
const LINES_AFTER_HEADER: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub name: String,
    /// Passed through verbatim to output files.
    pub longitude_latitude: String,
    /// Passed through verbatim to output files.
    pub elevation: String,
}

impl Station {
    /// Parses one whitespace-separated table row. Name tokens containing any of
    /// `name_noise` (case-insensitive) are dropped.
    pub fn from_line(line: &str, name_noise: &[String]) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(Error::MalformedLegendRow {
                row: line.trim().to_string(),
            });
        }

        let last = tokens.len() - 1;
        let coordinate_idx = coordinate_index(&tokens);
        let noise: Vec<String> = name_noise.iter().map(|k| k.to_lowercase()).collect();

        let name = tokens[1..coordinate_idx]
            .iter()
            .filter(|token| {
                let token = token.to_lowercase();
                !noise.iter().any(|k| token.contains(k.as_str()))
            })
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Station {
            id: tokens[0].to_string(),
            name,
            longitude_latitude: tokens[coordinate_idx].to_string(),
            elevation: tokens[last].to_string(),
        })
    }
}

// Full rows end `lon/lat grid elevation`; short rows end `lon/lat elevation`.
fn coordinate_index(tokens: &[&str]) -> usize {
    let n = tokens.len();
    let is_pair = |t: &str| t.contains('/');

    if n >= 4 && is_pair(tokens[n - 2]) && !is_pair(tokens[n - 3]) {
        n - 2
    } else {
        (n - 3).max(1)
    }
}

/// Parses the station table of a legend file. `source` names the file in errors.
pub fn parse_legend(text: &str, source: &str, name_noise: &[String]) -> Result<Vec<Station>> {
    let lines: Vec<&str> = text.lines().collect();

    let header = lines
        .iter()
        .position(|line| line.trim() == SECTION_HEADER)
        .ok_or_else(|| Error::MissingStationsSection {
            path: source.to_string(),
        })?;

    lines
        .iter()
        .skip(header + 1 + LINES_AFTER_HEADER)
        .take_while(|line| !line.trim().is_empty())
        .map(|line| Station::from_line(line, name_noise))
        .collect()
}

/// Stations of one run, keyed by id. Later entries replace earlier ones.
#[derive(Debug, Default)]
pub struct StationRegistry {
    stations: BTreeMap<String, Station>,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, stations: Vec<Station>) {
        for station in stations {
            self.stations.insert(station.id.clone(), station);
        }
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Station> {
        self.stations.values()
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const LEGEND: &str = "\
Legend

Parameter  Unit  Description
tre200dn   °C    Air temperature 2 m above ground; daily minimum

Stations
stn       Name                   Parameter  Data source    Longitude/Latitude  Coordinates [km]  Elevation [m]
--------------------------------------------------------------------------------------------------------------
ABO       Adelboden              tre200dn   MeteoSchweiz   7°34'/46°30'        609350/148984     1321
SMA       Zürich / Fluntern      fkl010d0   MeteoSchweiz   8°34'/47°23'        685117/248061     556

Data source  Institution
";

    #[test]
    fn should_process_line() {
        let s = Station::from_line("7812 Zurich Kloten 47.48/8.54 432", &[]).unwrap();

        assert_eq!(s.id, "7812");
        assert_eq!(s.name, "Zurich Kloten");
        assert_eq!(s.longitude_latitude, "47.48/8.54");
        assert_eq!(s.elevation, "432");
    }

    #[test]
    fn should_parse_stations_section() {
        let stations = parse_legend(LEGEND, "legend.txt", &[]).unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, "ABO");
        assert_eq!(stations[0].name, "Adelboden tre200dn MeteoSchweiz");
        assert_eq!(stations[0].longitude_latitude, "7°34'/46°30'");
        assert_eq!(stations[0].elevation, "1321");
        assert_eq!(stations[1].name, "Zürich / Fluntern fkl010d0 MeteoSchweiz");
        assert_eq!(stations[1].longitude_latitude, "8°34'/47°23'");
    }

    #[test]
    fn should_filter_name_noise() {
        let noise = vec![
            "fkl010d0".to_string(),
            "meteoschweiz".to_string(),
            "schweiz".to_string(),
            "meteo".to_string(),
        ];
        let stations = parse_legend(LEGEND, "legend.txt", &noise).unwrap();

        assert_eq!(stations[0].name, "Adelboden tre200dn");
        assert_eq!(stations[1].name, "Zürich / Fluntern");
    }

    #[test]
    fn should_fail_without_stations_section() {
        let err = parse_legend("Legend\n\nnothing here\n", "x_legend.txt", &[]).unwrap_err();

        assert!(matches!(err, Error::MissingStationsSection { ref path } if path == "x_legend.txt"));
        assert!(err.is_format_error());
    }

    #[test]
    fn should_stop_at_end_of_file() {
        let text = "Stations\nheader\n-----\nBAS Basel 7°35'/47°32' 610911/265600 316";
        let stations = parse_legend(text, "legend.txt", &[]).unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Basel");
    }

    #[test]
    fn should_reject_short_row() {
        let err = Station::from_line("ABO 1321", &[]).unwrap_err();
        assert!(matches!(err, Error::MalformedLegendRow { .. }));
    }

    #[test]
    fn should_overwrite_duplicate_ids() {
        let mut registry = StationRegistry::new();
        registry.extend(vec![Station::from_line("ABO Old 1/2 3/4 10", &[]).unwrap()]);
        registry.extend(vec![Station::from_line("ABO New 5/6 7/8 20", &[]).unwrap()]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("ABO").unwrap().name, "New");
        assert!(registry.get("BAS").is_none());
    }
}
