//! Domain identifier types with validation
//!
//! Newtype wrappers for identifiers arriving on the request boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Study OID newtype wrapper
///
/// The `studyoid` query parameter of the dataset endpoints. Any non-empty string is
/// accepted and echoed back verbatim; it does not need to exist in the catalog.
///
/// # Examples
///
/// ```
/// use rws_mock::domain::ids::StudyOid;
/// use std::str::FromStr;
///
/// let oid = StudyOid::from_str("Mediflex(Prod)").unwrap();
/// assert_eq!(oid.as_str(), "Mediflex(Prod)");
/// assert!(StudyOid::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudyOid(String);

impl StudyOid {
    /// Creates a new StudyOid, rejecting the empty string
    pub fn new(oid: impl Into<String>) -> Result<Self, String> {
        let oid = oid.into();
        if oid.is_empty() {
            return Err("Study OID cannot be empty".to_string());
        }
        Ok(Self(oid))
    }

    /// Builds a StudyOid from an optional query parameter
    ///
    /// Returns `None` when the parameter is absent or empty.
    pub fn from_param(param: Option<&str>) -> Option<Self> {
        param.and_then(|value| Self::new(value).ok())
    }

    /// Returns the study OID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StudyOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudyOid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for StudyOid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
