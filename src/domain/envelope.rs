//! Transaction-result envelope values
//!
//! A [`ResponseEnvelope`] is the transient answer to an import request (or to a
//! request rejected with a reason code). It is never stored. The two shapes are
//! separate variants, so a success can never carry a reason code and an error can
//! never carry a caller's reference number.

use super::catalog::ResponsePlaceholders;

/// Reason codes emitted by the mock
pub mod reason_codes {
    /// Read endpoint called without `studyoid`
    pub const MISSING_STUDY_OID: &str = "RWS00001";
    /// Upload fails the structural presence check
    pub const INVALID_ODM_STRUCTURE: &str = "RWS00003";
    /// Upload lacks `ODMVersion` or `FileType`
    pub const MISSING_ODM_ATTRIBUTES: &str = "RWS00004";
}

/// Outcome of a transaction, before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEnvelope {
    Success {
        reference_number: String,
        inbound_file_oid: String,
    },
    Error {
        /// Always the catalog's error placeholder
        reference_number: String,
        is_transaction_successful: String,
        reason_code: String,
        error_description: String,
    },
}

impl ResponseEnvelope {
    /// Success envelope; `reference_number` falls back to the catalog default
    pub fn success(placeholders: &ResponsePlaceholders, reference_number: Option<&str>) -> Self {
        Self::Success {
            reference_number: reference_number
                .unwrap_or(&placeholders.success_reference_number)
                .to_string(),
            inbound_file_oid: placeholders.inbound_file_oid.clone(),
        }
    }

    /// Error envelope; the reference number never echoes request context
    pub fn error(
        placeholders: &ResponsePlaceholders,
        reason_code: &str,
        error_description: &str,
        success_flag_override: Option<&str>,
    ) -> Self {
        Self::Error {
            reference_number: placeholders.error_reference_number.clone(),
            is_transaction_successful: success_flag_override
                .unwrap_or(&placeholders.error_success_flag)
                .to_string(),
            reason_code: reason_code.to_string(),
            error_description: error_description.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn reference_number(&self) -> &str {
        match self {
            Self::Success {
                reference_number, ..
            }
            | Self::Error {
                reference_number, ..
            } => reference_number,
        }
    }

    /// Reason code of an error envelope
    pub fn reason_code(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { reason_code, .. } => Some(reason_code),
        }
    }
}
