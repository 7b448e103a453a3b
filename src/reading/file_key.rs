//! Station and parameter encoded in a data file name.

use crate::config::FileKeyConfig;

/// Identifies the station and parameter of a data file, e.g.
/// `order_108241_ABO_tre200dn_1_data.txt` is station `ABO`, parameter `tre200dn`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataFileKey {
    pub station_id: String,
    pub parameter: String,
}

impl DataFileKey {
    /// Returns `None` when the name has too few underscore-separated tokens.
    pub fn from_file_name(file_name: &str, positions: &FileKeyConfig) -> Option<Self> {
        let parts: Vec<&str> = file_name.split('_').collect();

        let station_id = parts.get(positions.station_position)?;
        let parameter = parts.get(positions.parameter_position)?;
        if station_id.is_empty() || parameter.is_empty() {
            return None;
        }

        Some(DataFileKey {
            station_id: station_id.to_string(),
            parameter: parameter.to_string(),
        })
    }
}

// -- Tests -------------------------------------------------------------------
