//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output
//! - JSON-formatted log files with daily or hourly rotation
//! - HTTP request tracing through `tower_http`
//!
//! # Example
//!
//! ```no_run
//! use rws_mock::logging::init_logging;
//! use rws_mock::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Mock server starting");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an accepted ODM upload
///
/// # Example
///
/// ```no_run
/// use rws_mock::log_import_accepted;
///
/// log_import_accepted!("4821", 512);
/// ```
#[macro_export]
macro_rules! log_import_accepted {
    ($reference_number:expr, $body_len:expr) => {
        tracing::info!(
            reference_number = %$reference_number,
            body_len = $body_len,
            "ODM import accepted"
        );
    };
}

/// Log a rejected ODM upload
///
/// # Example
///
/// ```no_run
/// use rws_mock::log_import_rejected;
///
/// log_import_rejected!("RWS00003", 12);
/// ```
#[macro_export]
macro_rules! log_import_rejected {
    ($reason_code:expr, $body_len:expr) => {
        tracing::warn!(
            reason_code = %$reason_code,
            body_len = $body_len,
            "ODM import rejected"
        );
    };
}

/// Log a read request that arrived without a required parameter
///
/// # Example
///
/// ```no_run
/// use rws_mock::log_missing_parameter;
///
/// log_missing_parameter!("ClinicalDatasets", "studyoid");
/// ```
#[macro_export]
macro_rules! log_missing_parameter {
    ($dataset:expr, $parameter:expr) => {
        tracing::warn!(
            dataset = %$dataset,
            parameter = $parameter,
            "Required parameter missing"
        );
    };
}

/// Log a request turned away by the authentication stub
///
/// # Example
///
/// ```no_run
/// use rws_mock::log_auth_rejected;
///
/// log_auth_rejected!("GET", "/RaveWebServices/version");
/// ```
#[macro_export]
macro_rules! log_auth_rejected {
    ($method:expr, $path:expr) => {
        tracing::warn!(
            method = %$method,
            path = %$path,
            "Authentication required"
        );
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
