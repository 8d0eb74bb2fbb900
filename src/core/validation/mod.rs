//! Structural gate for uploaded ODM documents
//!
//! The checks are literal substring tests, not XML parsing. A body such as
//! `<?xml version="1.0"?><Other/>` passes the structure stage, and the attribute
//! stage accepts `ODMVersion` and `FileType` on any element.
//!
//! # Example
//!
//! ```rust
//! use rws_mock::core::validation::{ImportState, InboundDocumentValidator, ValidationProfile};
//!
//! let state = InboundDocumentValidator::evaluate(
//!     r#"<ODM ODMVersion="1.3" FileType="Snapshot"></ODM>"#,
//!     ValidationProfile::Full,
//! );
//! assert_eq!(state, ImportState::Accepted);
//! ```

pub mod state;
pub mod validator;

pub use state::{ImportState, Rejection, ValidationProfile};
pub use validator::InboundDocumentValidator;
