//! Table-driven tests for the upload gate

use rws_mock::core::validation::{
    ImportState, InboundDocumentValidator, Rejection, ValidationProfile,
};
use test_case::test_case;

#[test_case("", false ; "empty body")]
#[test_case("<ODM/>", true ; "bare odm")]
#[test_case("<?xml version=\"1.0\"?><Other/>", true ; "declaration only")]
#[test_case("<Invalid>XML</Invalid>", false ; "other root")]
#[test_case("plain text mentioning ODM", false ; "no markup")]
#[test_case("<odm/>", false ; "case sensitive")]
fn test_structure_check(body: &str, expected: bool) {
    assert_eq!(InboundDocumentValidator::has_valid_structure(body), expected);
}

#[test_case("<ODM ODMVersion=\"1.3\"/>", false ; "version only")]
#[test_case("<ODM FileType=\"Snapshot\"/>", false ; "file type only")]
#[test_case("<ODM ODMVersion=\"1.3\" FileType=\"Snapshot\"/>", true ; "both on root")]
#[test_case("<ODM><!-- ODMVersion FileType --></ODM>", true ; "anywhere in body")]
fn test_attribute_check(body: &str, expected: bool) {
    assert_eq!(
        InboundDocumentValidator::has_required_attributes(body),
        expected
    );
}

#[test_case(
    "<ODM ODMVersion=\"1.3\" FileType=\"Snapshot\"><ClinicalData/></ODM>",
    ValidationProfile::Full,
    ImportState::Accepted
    ; "full accepted"
)]
#[test_case(
    "<Invalid>XML</Invalid>",
    ValidationProfile::Full,
    ImportState::Rejected(Rejection::InvalidStructure)
    ; "full bad structure"
)]
#[test_case(
    "<ODM><ClinicalData/></ODM>",
    ValidationProfile::Full,
    ImportState::Rejected(Rejection::MissingAttributes)
    ; "full missing attributes"
)]
#[test_case(
    "<ODM><ClinicalData/></ODM>",
    ValidationProfile::StructureOnly,
    ImportState::Accepted
    ; "structure only ignores attributes"
)]
#[test_case(
    "<Invalid>XML</Invalid>",
    ValidationProfile::StructureOnly,
    ImportState::Rejected(Rejection::InvalidStructure)
    ; "structure only bad structure"
)]
fn test_evaluate(body: &str, profile: ValidationProfile, expected: ImportState) {
    let outcome = InboundDocumentValidator::evaluate(body, profile);
    assert_eq!(outcome, expected);
    assert!(outcome.is_terminal());
}

#[test_case(Rejection::InvalidStructure, "RWS00003" ; "invalid structure")]
#[test_case(Rejection::MissingAttributes, "RWS00004" ; "missing attributes")]
fn test_rejection_reason_codes(rejection: Rejection, code: &str) {
    assert_eq!(rejection.reason_code(), code);
}

#[test]
fn test_step_by_step_transitions() {
    let body = "<ODM ODMVersion=\"1.3\" FileType=\"Snapshot\"/>";
    let profile = ValidationProfile::Full;

    let state = ImportState::ReceivedRaw.advance(body, profile);
    assert_eq!(state, ImportState::StructurallyValid);
    assert!(!state.is_terminal());

    let state = state.advance(body, profile);
    assert_eq!(state, ImportState::Accepted);

    // Terminal states are fixed points
    assert_eq!(state.advance("", profile), ImportState::Accepted);
}
