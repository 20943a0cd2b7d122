use thiserror::Error;

/// Errors surfaced by the forecast pipeline and the feedback store.
///
/// All variants are recoverable by the caller: the binary maps them to a log
/// line and a nonzero exit code, library callers decide whether to retry or
/// report. Internal numeric code (Poisson pmf, rounding) never fails on valid
/// input.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The stats provider has no data for the requested team/season.
    #[error("no statistics available for '{team}'")]
    DataUnavailable { team: String },

    /// Aggregation was asked to summarise an empty observation sequence.
    #[error("cannot aggregate an empty sequence of match observations")]
    InsufficientData,

    /// Malformed configuration or model parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The feedback store could not be read or written.
    #[error("feedback store unavailable: {0}")]
    StorageUnavailable(#[source] rusqlite::Error),

    /// Accuracy was requested before any feedback record exists.
    /// Distinct from zero accuracy so callers never divide by zero.
    #[error("no feedback records exist yet")]
    NoData,
}
