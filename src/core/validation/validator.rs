//! Substring checks over raw upload text

use super::state::{ImportState, ValidationProfile};

const STRUCTURE_MARKERS: [&str; 2] = ["<ODM", "<?xml"];
const REQUIRED_ATTRIBUTES: [&str; 2] = ["ODMVersion", "FileType"];

/// Two-stage gate for uploaded documents
///
/// Both checks are total: any input, however malformed, yields a boolean.
pub struct InboundDocumentValidator;

impl InboundDocumentValidator {
    /// True if the body contains `<ODM` or `<?xml` anywhere
    pub fn has_valid_structure(body: &str) -> bool {
        STRUCTURE_MARKERS.iter().any(|marker| body.contains(marker))
    }

    /// True if the body contains both `ODMVersion` and `FileType` anywhere
    pub fn has_required_attributes(body: &str) -> bool {
        REQUIRED_ATTRIBUTES.iter().all(|attr| body.contains(attr))
    }

    /// Runs the state machine from `ReceivedRaw` to a terminal state
    pub fn evaluate(body: &str, profile: ValidationProfile) -> ImportState {
        let mut state = ImportState::ReceivedRaw;
        while !state.is_terminal() {
            state = state.advance(body, profile);
        }
        state
    }
}
