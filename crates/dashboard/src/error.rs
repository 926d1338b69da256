use data_loader::DataLoadError;
use thiserror::Error;

/// Errors raised while selecting countries or exporting a view
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("The catalog has no countries")]
    EmptyCatalog,

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("Cannot compare {0} with itself")]
    SameCountry(String),

    #[error("No other country to compare with")]
    NothingToCompare,

    #[error("Export is only available for a single country with movies")]
    ExportUnavailable,

    #[error("Unknown command: {0} (type 'help')")]
    UnknownCommand(String),

    #[error("'{0}' needs a country name")]
    MissingCountry(&'static str),

    #[error("Export failed: {0}")]
    Export(#[from] DataLoadError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
