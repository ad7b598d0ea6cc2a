//! Error types for the Cohort server binary.
//!
//! [`StartupError`] wraps every failure mode during startup and serving so
//! `main` can propagate with `?`.

/// Top-level error for the Cohort server binary.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The log filter could not be built from the configured level.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: cohort_api::ServerError,
    },
}
