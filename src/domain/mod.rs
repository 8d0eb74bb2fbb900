//! Domain models and types for the mock service.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The ODM catalog** ([`OdmCatalog`]) and its definitions ([`StudyRecord`],
//!   [`StudyEventDef`], [`FormDef`], [`ItemGroupDef`], [`ItemDef`])
//! - **Response envelopes** ([`ResponseEnvelope`]) and the RWS reason codes
//! - **Strongly-typed identifiers** ([`StudyOid`])
//! - **Error types** ([`MockError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use rws_mock::domain::OdmCatalog;
//!
//! let catalog = OdmCatalog::default();
//! let study = catalog.resolve_study("ANY-STUDY");
//! assert_eq!(study.name, "Mock Study");
//! ```

pub mod catalog;
pub mod envelope;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use catalog::{
    FormDef, ItemDef, ItemGroupDef, OdmCatalog, ReasonCodeEntry, ResponsePlaceholders,
    StudyEventDef, StudyRecord, UnresolvedReference,
};
pub use envelope::{reason_codes, ResponseEnvelope};
pub use errors::MockError;
pub use ids::StudyOid;
pub use result::Result;
