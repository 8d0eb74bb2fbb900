//! Per-request import state machine
//!
//! ```text
//! ReceivedRaw --(structure fails)--> Rejected(InvalidStructure)
//! ReceivedRaw --(structure ok)-----> StructurallyValid
//! StructurallyValid --(attributes fail)--> Rejected(MissingAttributes)
//! StructurallyValid --(attributes ok)----> Accepted
//! ```
//!
//! `Accepted` and `Rejected` are terminal. Nothing is remembered across requests.

use super::validator::InboundDocumentValidator;
use crate::domain::reason_codes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stages an import endpoint runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationProfile {
    /// Structure, then required attributes
    #[default]
    Full,
    /// Structure only
    StructureOnly,
}

/// Why an upload was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InvalidStructure,
    MissingAttributes,
}

impl Rejection {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidStructure => reason_codes::INVALID_ODM_STRUCTURE,
            Self::MissingAttributes => reason_codes::MISSING_ODM_ATTRIBUTES,
        }
    }

    /// Description used when the reason-code table has no entry
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::InvalidStructure => "Invalid ODM XML. Must contain <ODM> root element",
            Self::MissingAttributes => "ODM XML must include ODMVersion and FileType attributes",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason_code(), self.default_description())
    }
}

/// Import request state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    ReceivedRaw,
    StructurallyValid,
    Accepted,
    Rejected(Rejection),
}

impl ImportState {
    /// Performs one transition; terminal states return themselves
    pub fn advance(self, body: &str, profile: ValidationProfile) -> Self {
        match self {
            Self::ReceivedRaw => {
                if InboundDocumentValidator::has_valid_structure(body) {
                    Self::StructurallyValid
                } else {
                    Self::Rejected(Rejection::InvalidStructure)
                }
            }
            Self::StructurallyValid => match profile {
                ValidationProfile::StructureOnly => Self::Accepted,
                ValidationProfile::Full => {
                    if InboundDocumentValidator::has_required_attributes(body) {
                        Self::Accepted
                    } else {
                        Self::Rejected(Rejection::MissingAttributes)
                    }
                }
            },
            terminal @ (Self::Accepted | Self::Rejected(_)) => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected(_))
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(rejection) => Some(*rejection),
            _ => None,
        }
    }
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReceivedRaw => write!(f, "received_raw"),
            Self::StructurallyValid => write!(f, "structurally_valid"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected(rejection) => write!(f, "rejected({})", rejection.reason_code()),
        }
    }
}
