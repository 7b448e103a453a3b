pub mod index;
pub mod stations;
pub mod temperature;
pub mod wind;

use std::{
    collections::{BTreeMap, HashSet},
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::Error,
    files::{list_files_with_suffix, read_text},
    reading::{parse_legend, DataFileKey, Station, StationRegistry},
    series::{write_missing_report, write_series, StationSeries},
};

pub use index::index;
pub use stations::stations;
pub use temperature::temperature;
pub use wind::wind;

/// Outcome of a series-building run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub series_written: usize,
    pub reports_written: usize,
    pub stations_skipped: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} series files written, {} missing-value reports, {} stations skipped",
            self.series_written, self.reports_written, self.stations_skipped
        )
    }
}

/// Merges every legend file of `input` into one registry.
pub fn load_registry(input: &Path, config: &Config, name_noise: &[String]) -> Result<StationRegistry> {
    let mut registry = StationRegistry::new();

    for path in list_files_with_suffix(input, &config.legend_suffix)? {
        let text = read_text(&path).with_context(|| format!("reading {}", path.display()))?;
        let stations = parse_legend(&text, &path.to_string_lossy(), name_noise)?;
        info!("Parsed legend file {} ({} stations)", path.display(), stations.len());
        registry.extend(stations);
    }

    if registry.is_empty() {
        return Err(Error::NoLegend {
            dir: input.to_path_buf(),
        }
        .into());
    }
    debug!("Station registry holds {} stations", registry.len());

    Ok(registry)
}

/// Data files of `input` keyed by station, then by parameter code.
pub fn group_data_files(
    input: &Path,
    config: &Config,
) -> Result<BTreeMap<String, BTreeMap<String, PathBuf>>> {
    let mut groups: BTreeMap<String, BTreeMap<String, PathBuf>> = BTreeMap::new();

    for path in list_files_with_suffix(input, &config.data_suffix)? {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

        match DataFileKey::from_file_name(name, &config.file_key) {
            Some(key) => {
                groups
                    .entry(key.station_id)
                    .or_default()
                    .insert(key.parameter, path);
            }
            None => warn!("Ignoring data file with unexpected name: {}", path.display()),
        }
    }

    Ok(groups)
}

/// Writes series files and missing-value reports for one run.
pub struct SeriesSink<'a> {
    output_dir: &'a Path,
    report_dir: PathBuf,
    extension: &'a str,
    label_order: &'a [(usize, &'a str)],
    written: HashSet<String>,
    summary: RunSummary,
}

impl<'a> SeriesSink<'a> {
    pub fn new(
        output_dir: &'a Path,
        config: &Config,
        extension: &'a str,
        label_order: &'a [(usize, &'a str)],
    ) -> Result<Self> {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("creating {}", output_dir.display()))?;

        Ok(SeriesSink {
            output_dir,
            report_dir: config.missing_values_path(output_dir),
            extension,
            label_order,
            written: HashSet::new(),
            summary: RunSummary::default(),
        })
    }

    /// Looks up the series' station and writes its files. Unknown stations are skipped.
    pub fn emit(&mut self, registry: &StationRegistry, series: &StationSeries) -> Result<()> {
        match registry.get(series.station_id()) {
            Some(station) => self.write(station, series),
            None => {
                warn!("Station {} not found in legend file, skipping", series.station_id());
                self.summary.stations_skipped += 1;
                Ok(())
            }
        }
    }

    fn write(&mut self, station: &Station, series: &StationSeries) -> Result<()> {
        let observed_name = series.observed_name();
        if !self.written.insert(observed_name.clone()) {
            warn!(
                "Output name {} produced twice in this run; station {} overwrites the earlier file",
                observed_name,
                station.id
            );
        }

        if series.is_empty() {
            debug!("Station {} has no dated rows, writing header only", station.id);
        }

        let path = write_series(self.output_dir, series, station, self.extension)
            .with_context(|| format!("writing series for station {}", station.id))?;
        info!("File created: {}", path.display());
        self.summary.series_written += 1;

        if let Some(report) = write_missing_report(&self.report_dir, series, self.label_order)
            .with_context(|| format!("writing missing-value report for station {}", station.id))?
        {
            info!("Missed values file created: {}", report.display());
            self.summary.reports_written += 1;
        }

        Ok(())
    }

    pub fn finish(self) -> RunSummary {
        self.summary
    }
}

// -- Tests -------------------------------------------------------------------
