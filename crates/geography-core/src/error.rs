// crates/geography-core/src/error.rs

use crate::validate::ValidationError;
use thiserror::Error;

/// Errors surfaced by the library.
///
/// Row-scoped import failures, unresolved parent references included, are
/// *not* represented here: they are collected as
/// [`RowError`](crate::import::RowError) values inside an
/// [`ImportReport`](crate::import::ImportReport) so a single bad row never
/// aborts a pass. CSV failures that end a pass surface as `Source`.
/// Everything in this enum is either request-scoped (queries) or fatal to
/// the operation that produced it.
#[derive(Debug, Error)]
pub enum GeoError {
    /// A field or query parameter failed format/range checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Exact lookup found nothing, or a range query returned zero rows.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A range query matched more rows than the configured ceiling.
    #[error("Too many results (more than {limit}), narrow the filter")]
    TooManyResults { limit: usize },

    /// A CSV source could not be opened or its header could not be read.
    #[error("Source {location}: {message}")]
    Source { location: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "fetch")]
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl GeoError {
    pub(crate) fn unreadable(location: impl Into<String>, message: impl ToString) -> Self {
        GeoError::Source {
            location: location.into(),
            message: message.to_string(),
        }
    }

    /// `true` for failures caused by the caller's input (bad parameter,
    /// nothing matched, filter too wide) rather than by the system.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            GeoError::Validation(_) | GeoError::NotFound(_) | GeoError::TooManyResults { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
