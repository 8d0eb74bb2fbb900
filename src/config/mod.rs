//! Configuration management for the mock service.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The mock uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RWS_MOCK_<SECTION>_<KEY>` environment overrides
//! - Defaults for every setting (an empty file yields the built-in mock catalog)
//! - Validation of scalar settings on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rws_mock::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rws-mock.toml")?;
//!
//! println!("Listening on {}", config.server.bind_addr());
//! println!("ODM version: {}", config.odm.version);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Bind address and request body limit
//! - [`RwsConfig`] - Reported RWS version
//! - [`AuthConfig`] - Basic and MAuth stub settings
//! - [`OdmConfig`] - Namespaces, studies and the event/form/item-group/item catalog
//! - [`ResponsesConfig`] - Envelope placeholders and the reason-code table
//! - [`CacheConfig`] - Cache-flush acknowledgement
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! port = 3000
//!
//! [odm.default_study]
//! study_name = "Mock Study"
//! study_description = "Mock study metadata"
//! protocol_name = "MOCK-001"
//!
//! [[odm.test_studies]]
//! study_oid = "STUDY001"
//! study_name = "Study One"
//! study_description = "First study"
//! protocol_name = "P-001"
//!
//! [[auth.test_credentials]]
//! username = "tester"
//! password = "${RWS_MOCK_TEST_PASSWORD}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, AuthConfig, BasicAuthConfig, CacheConfig, ErrorCodeConfig, FormConfig,
    ItemConfig, ItemGroupConfig, LoggingConfig, MAuthConfig, MockConfig, NamespaceConfig,
    OdmConfig, ResponsesConfig, RwsConfig, ServerConfig, StudyConfig, StudyEventConfig,
    TestCredential, TestStudyConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
