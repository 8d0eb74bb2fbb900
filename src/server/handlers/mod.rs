//! HTTP handlers
//!
//! - [`system`] - Service info, health, version, cache flush
//! - [`datasets`] - ODM and CSV dataset reads
//! - [`clinical_data`] - ODM imports

pub mod clinical_data;
pub mod datasets;
pub mod system;
