//! Minimum/maximum temperature series.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use super::{group_data_files, load_registry, RunSummary, SeriesSink};
use crate::{
    cli::create_progress_bar,
    config::Config,
    files::read_text,
    reading::{read_observations, ObservationTable},
    series::{group_by_station, outer_join},
};

// Series values are [min, max]; the max column is checked first.
const MISSING_LABELS: [(usize, &str); 2] = [(1, "tmax"), (0, "tmin")];

pub fn temperature(input: &Path, output: &Path, config: &Config) -> Result<RunSummary> {
    let settings = &config.temperature;
    let registry = load_registry(input, config, &settings.name_noise)?;
    let data_files = group_data_files(input, config)?;

    let mut sink = SeriesSink::new(output, config, &settings.extension, &MISSING_LABELS)?;
    let pb = create_progress_bar(data_files.len() as u64, "Processing stations".to_string());

    for (station_key, files) in &data_files {
        pb.inc(1);

        let (Some(min_path), Some(max_path)) = (
            files.get(&settings.min_column),
            files.get(&settings.max_column),
        ) else {
            warn!("Station {} lacks a min or max data file, skipping", station_key);
            continue;
        };

        let min = load(min_path, &settings.min_column, config, station_key)?;
        let max = load(max_path, &settings.max_column, config, station_key)?;

        let mut min_groups = group_by_station(min);
        let mut max_groups = group_by_station(max);
        let mut station_ids: Vec<String> = min_groups.keys().chain(max_groups.keys()).cloned().collect();
        station_ids.sort();
        station_ids.dedup();

        for station_id in station_ids {
            let series = outer_join(
                &station_id,
                min_groups.remove(&station_id).unwrap_or_default(),
                max_groups.remove(&station_id).unwrap_or_default(),
            );
            sink.emit(&registry, &series)?;
        }
    }
    pb.finish_with_message("Temperature series complete");

    Ok(sink.finish())
}

fn load(path: &Path, column: &str, config: &Config, station_key: &str) -> Result<ObservationTable> {
    let text = read_text(path).with_context(|| format!("reading {}", path.display()))?;
    let table = read_observations(&text, &[column], config, Some(station_key))
        .with_context(|| format!("parsing {}", path.display()))?;

    Ok(table)
}

// -- Tests -------------------------------------------------------------------
