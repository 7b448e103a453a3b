//! Wind speed series, one per station found in the data files.

use std::path::Path;

use anyhow::{Context, Result};

use super::{load_registry, RunSummary, SeriesSink};
use crate::{
    cli::create_progress_bar,
    config::Config,
    files::{list_files_with_suffix, read_text},
    reading::{read_observations, DataFileKey},
    series::{group_by_station, StationSeries},
};

pub fn wind(input: &Path, output: &Path, config: &Config) -> Result<RunSummary> {
    let settings = &config.wind;
    let registry = load_registry(input, config, &settings.name_noise)?;
    let data_files = list_files_with_suffix(input, &config.data_suffix)?;

    let mut sink = SeriesSink::new(output, config, &settings.extension, &[])?;
    let pb = create_progress_bar(data_files.len() as u64, "Processing data files".to_string());

    for path in &data_files {
        pb.inc(1);

        // Rows name their own station; the file name only fills blanks.
        let fallback = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| DataFileKey::from_file_name(n, &config.file_key))
            .map(|key| key.station_id);

        let text = read_text(path).with_context(|| format!("reading {}", path.display()))?;
        let table = read_observations(
            &text,
            &[settings.column.as_str()],
            config,
            fallback.as_deref(),
        )
        .with_context(|| format!("parsing {}", path.display()))?;

        for (station_id, observations) in group_by_station(table) {
            let series = StationSeries::from_observations(&station_id, observations);
            sink.emit(&registry, &series)?;
        }
    }
    pb.finish_with_message("Wind series complete");

    Ok(sink.finish())
}

// -- Tests -------------------------------------------------------------------
