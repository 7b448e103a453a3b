//! Errors raised while reading legend and observation files.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("legend file `{path}` does not contain a 'Stations' section")]
    MissingStationsSection { path: String },

    #[error("legend row has too few fields: `{row}`")]
    MalformedLegendRow { row: String },

    #[error("column '{column}' not found in data file. Available columns: {available}")]
    MissingColumn { column: String, available: String },

    #[error("no legend file found in `{}`", dir.display())]
    NoLegend { dir: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("cannot read config file `{}`: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// True for the errors that make an input file unusable and abort the batch.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Error::MissingStationsSection { .. }
                | Error::MalformedLegendRow { .. }
                | Error::MissingColumn { .. }
        )
    }
}
