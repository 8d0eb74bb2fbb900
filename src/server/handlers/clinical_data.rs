//! POST /RaveWebServices and POST /RaveWebServices/ClinicalData

use crate::core::builders::ClinicalEnvelopeBuilder;
use crate::core::validation::{InboundDocumentValidator, ValidationProfile};
use crate::server::response::{status_from_code, xml_response};
use crate::server::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use chrono::Utc;

/// Protocol-error text for a missing or wrong `Content-Type`
pub const CONTENT_TYPE_MESSAGE: &str = "Content-Type must be text/xml";

/// True when the media type, ignoring parameters, is `text/xml`
pub fn is_text_xml(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("text/xml"))
}

/// Four-digit reference derived from the current time
pub fn reference_number() -> String {
    format!("{:04}", Utc::now().timestamp_millis().rem_euclid(10_000))
}

/// Import with both validation stages
pub async fn import_odm(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    import(&state, &headers, &body, ValidationProfile::Full)
}

/// Import with the structure stage only
pub async fn import_clinical_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    import(&state, &headers, &body, ValidationProfile::StructureOnly)
}

fn import(state: &AppState, headers: &HeaderMap, body: &[u8], profile: ValidationProfile) -> Response {
    let catalog = &state.catalog;
    let envelopes = ClinicalEnvelopeBuilder::new(catalog);

    if !is_text_xml(headers) {
        tracing::debug!("Import rejected before validation: unsupported content type");
        return xml_response(
            StatusCode::BAD_REQUEST,
            &envelopes.build_protocol_error(CONTENT_TYPE_MESSAGE),
        );
    }

    let text = String::from_utf8_lossy(body);
    let outcome = InboundDocumentValidator::evaluate(&text, profile);

    match outcome.rejection() {
        Some(rejection) => {
            let code = rejection.reason_code();
            crate::log_import_rejected!(code, body.len());
            let document = envelopes.build_error(
                code,
                catalog.reason_message(code, rejection.default_description()),
                None,
            );
            xml_response(status_from_code(catalog.reason_http_status(code)), &document)
        }
        None => {
            let reference = reference_number();
            crate::log_import_accepted!(reference, body.len());
            xml_response(StatusCode::OK, &envelopes.build_success(Some(&reference)))
        }
    }
}
