//! ODM document builders
//!
//! Both builders borrow the shared [`OdmCatalog`](crate::domain::OdmCatalog) and are
//! cheap to construct per request.
//!
//! - [`metadata`] - Study metadata (`ClinicalDatasets`)
//! - [`envelope`] - Clinical-data envelopes and `Response` documents

pub mod envelope;
pub mod metadata;

pub use envelope::{ClinicalEnvelopeBuilder, ENVELOPE_FILE_OID_PREFIX, METADATA_VERSION_OID};
pub use metadata::{MetadataDocumentBuilder, METADATA_FILE_OID_PREFIX};
