//! Error types and the shared error handler.

use catalog_core::environment::Clock;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure of a backend fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Description of the failed response
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(message) | Self::Decode(message) => {
                format!("An error occurred: {message}")
            },
            Self::Backend { status, message } => {
                format!("Backend returned code {status}: {message}")
            },
        }
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Backend { .. } => "backend",
            Self::Decode(_) => "decode",
        }
    }
}

/// A recorded failure, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Formatted message
    pub message: String,
    /// When the failure was recorded
    pub at: DateTime<Utc>,
}

/// Holds the most recent failure message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    last: Option<ErrorRecord>,
}

impl ErrorSlot {
    /// The last recorded failure.
    #[must_use]
    pub const fn last(&self) -> Option<&ErrorRecord> {
        self.last.as_ref()
    }

    /// The last recorded message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.last.as_ref().map(|record| record.message.as_str())
    }

    fn record(&mut self, record: ErrorRecord) {
        self.last = Some(record);
    }
}

/// Turns failures into display messages.
///
/// Every failing view goes through [`ErrorHandler::handle`]. The handler
/// logs the failure, records its message in the [`ErrorSlot`], and hands
/// back an empty result so the caller stops that view and nothing else.
#[derive(Debug, Clone)]
pub struct ErrorHandler<C> {
    clock: C,
}

impl<C: Clock> ErrorHandler<C> {
    /// Create a handler stamping records with `clock`.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Record `error` in `slot` and return nothing.
    pub fn handle<T>(&self, slot: &mut ErrorSlot, error: &CatalogError) -> Option<T> {
        let message = error.user_message();
        tracing::error!(kind = error.kind(), %error, "{message}");
        metrics::counter!("catalog.errors.total", "kind" => error.kind()).increment(1);

        slot.record(ErrorRecord {
            message,
            at: self.clock.now(),
        });
        None
    }
}
