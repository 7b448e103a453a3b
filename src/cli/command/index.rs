//! The `{parameter}.cli` index listing the series files of an output directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::{config::Config, files::list_files_with_suffix};

pub fn index(output: &Path, parameter: &str, config: &Config) -> Result<String> {
    let description = describe(parameter, config);
    let files = series_file_names(output, parameter)?;
    let path = write_index(
        output,
        parameter,
        description,
        &config.author,
        Local::now().date_naive(),
        &files,
    )?;

    Ok(path.to_string_lossy().to_string())
}

fn describe<'a>(parameter: &str, config: &'a Config) -> &'a str {
    if parameter == config.temperature.extension {
        &config.temperature.description
    } else if parameter == config.wind.extension {
        &config.wind.description
    } else {
        "Climate"
    }
}

fn series_file_names(output: &Path, parameter: &str) -> Result<Vec<String>> {
    let files = list_files_with_suffix(output, &format!(".{parameter}"))
        .with_context(|| format!("listing {}", output.display()))?;

    Ok(files
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .map(str::to_string)
        .collect())
}

fn write_index(
    output: &Path,
    parameter: &str,
    description: &str,
    author: &str,
    written_on: NaiveDate,
    files: &[String],
) -> Result<PathBuf> {
    let path = output.join(format!("{parameter}.cli"));
    let header = format!(
        "{parameter}.cli: {description} file names - file written by {author} - {}",
        written_on.format("%b %Y")
    );

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record([header.as_str()])?;
    writer.write_record(["filename"])?;
    for file in files {
        writer.write_record([file.as_str()])?;
    }
    writer.flush()?;

    Ok(path)
}

// -- Tests -------------------------------------------------------------------
