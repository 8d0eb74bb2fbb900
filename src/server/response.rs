//! Response helpers shared by handlers and middleware

use crate::core::document::XmlDocument;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

pub const APPLICATION_XML: &str = "application/xml";
pub const TEXT_CSV: &str = "text/csv";
pub const TEXT_PLAIN: &str = "text/plain";

/// Serializes `document` as `application/xml`
///
/// A serialization failure is logged and answered with a bare 500.
pub fn xml_response(status: StatusCode, document: &XmlDocument) -> Response {
    match document.to_xml() {
        Ok(xml) => (status, [(header::CONTENT_TYPE, APPLICATION_XML)], xml).into_response(),
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to serialize ODM document");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Maps a configured reason-code status, falling back to 400
pub fn status_from_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}
