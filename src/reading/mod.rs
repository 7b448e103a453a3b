pub mod daily;
pub mod file_key;
pub mod legend;

use std::fmt;

pub use daily::{read_observations, DailyObservation, ObservationTable};
pub use file_key::DataFileKey;
pub use legend::{parse_legend, Station, StationRegistry};

/// Literal written to output files in place of a missing measurement.
pub const MISSING_SENTINEL: f64 = -99.0;

/// One parameter value of a station-day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    Present(f64),
    Missing,
}

impl Measurement {
    /// Parses a raw cell. Blank, non-numeric, NaN and sentinel cells are all `Missing`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_nan() || v == MISSING_SENTINEL => Measurement::Missing,
            Ok(v) => Measurement::Present(v),
            Err(_) => Measurement::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Measurement::Missing)
    }

    /// The value as written to output files.
    pub fn output_value(&self) -> f64 {
        match self {
            Measurement::Present(v) => *v,
            Measurement::Missing => MISSING_SENTINEL,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.output_value())
    }
}

// -- Tests -------------------------------------------------------------------
