//! Fixed-width series files.
//!
//! ```text
//! OABO20202020.tmp:: tmp file for station OABO20202020
//! nbyr     tstep       lat       lon      elev
//! 1    0 7°34'/46°30' 1321
//! 2020    001   -5.200000   -99.000000
//! ```

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use super::StationSeries;
use crate::{error::Result, reading::Station};

const COLUMN_HEADER: &str = "nbyr     tstep       lat       lon      elev";
// Daily resolution
const TIME_STEP: u8 = 0;

pub fn file_name(series: &StationSeries, extension: &str) -> String {
    format!("{}.{}", series.observed_name(), extension)
}

pub fn render_series(series: &StationSeries, station: &Station, extension: &str) -> String {
    let observed_name = series.observed_name();
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{observed_name}.{extension}:: {extension} file for station {observed_name}"
    );
    out.push_str(COLUMN_HEADER);
    out.push('\n');
    let _ = writeln!(
        out,
        "{}    {} {} {}",
        series.years_difference(),
        TIME_STEP,
        station.longitude_latitude,
        station.elevation
    );

    for record in series.records() {
        let _ = write!(out, "{}    {:03}", record.year(), record.day_of_year());
        for value in &record.values {
            let _ = write!(out, "   {value}");
        }
        out.push('\n');
    }

    out
}

/// Writes the series into `output_dir`, replacing any previous file of the same name.
pub fn write_series(
    output_dir: &Path,
    series: &StationSeries,
    station: &Station,
    extension: &str,
) -> Result<PathBuf> {
    let path = output_dir.join(file_name(series, extension));
    fs::write(&path, render_series(series, station, extension))?;

    Ok(path)
}

// -- Tests -------------------------------------------------------------------
