//! Error types for the Eventboard plugin.
//!
//! This module defines the centralized error type [`EventboardError`] and a type alias
//! [`Result`] used throughout the plugin. Errors produced by the API client are
//! returned to the event handler as values, which logs them and surfaces them in
//! the status line instead of letting them escape the update loop.

use thiserror::Error;

/// The main error type for Eventboard operations.
///
/// Variants split into two families:
/// - request failures ([`Transport`](Self::Transport), [`Api`](Self::Api),
///   [`Decode`](Self::Decode)) reported by the API client;
/// - local failures (invalid form input, configuration, theme).
///
/// # Examples
///
/// ```
/// use eventboard::EventboardError;
///
/// let err = EventboardError::Api { status: 400, message: "Invalid name".to_string() };
/// assert_eq!(err.to_string(), "API error (HTTP 400): Invalid name");
/// ```
#[derive(Debug, Error)]
pub enum EventboardError {
    /// The request never produced a usable API response.
    ///
    /// Covers host-side network failures (reported as an error status with a
    /// plain-text body) and failure responses whose body is not JSON.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status and a structured message.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from `{ "error": { "message": ... } }`.
        message: String,
    },

    /// A success response whose body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The date entered in the form could not be normalized.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// A host response arrived with a context map we did not produce.
    #[error("Request context error: {0}")]
    Context(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EventboardError {
    /// Short form suitable for the one-line status bar.
    ///
    /// API errors show only the server's message; everything else uses the
    /// full `Display` text.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A specialized `Result` type for Eventboard operations.
pub type Result<T> = std::result::Result<T, EventboardError>;
