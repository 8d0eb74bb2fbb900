//! Core document engine for the mock service.
//!
//! Everything here is synchronous and stateless: each operation is a pure function of
//! its inputs and the shared [`OdmCatalog`](crate::domain::OdmCatalog).
//!
//! # Modules
//!
//! - [`document`] - Ordered XML node tree, serialization, and document stamps
//! - [`builders`] - Metadata, clinical-data envelope, and `Response` builders
//! - [`validation`] - Two-stage structural gate for uploads
//! - [`csv`] - Header-only CSV datasets
//!
//! # Request Flow
//!
//! 1. **Read**: resolve the study OID and call a builder directly
//! 2. **Import**: run the upload through [`validation::InboundDocumentValidator`]
//! 3. **Respond**: render the success or error `Response`
//!
//! # Example
//!
//! ```rust
//! use rws_mock::core::builders::MetadataDocumentBuilder;
//! use rws_mock::domain::OdmCatalog;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = OdmCatalog::default();
//! let xml = MetadataDocumentBuilder::new(&catalog)
//!     .build("STUDY123", None)
//!     .to_xml()?;
//!
//! assert!(xml.contains("<Study OID=\"STUDY123\">"));
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod csv;
pub mod document;
pub mod validation;
