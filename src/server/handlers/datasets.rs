//! GET /RaveWebServices/datasets/{name}.{odm|csv}

use crate::core::builders::{ClinicalEnvelopeBuilder, MetadataDocumentBuilder};
use crate::domain::{reason_codes, StudyOid};
use crate::server::response::{status_from_code, xml_response, TEXT_CSV};
use crate::server::state::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Metadata dataset
pub const CLINICAL_DATASETS: &str = "ClinicalDatasets";
/// Audit dataset, always served as a `Snapshot`
pub const CLINICAL_AUDIT_RECORDS: &str = "ClinicalAuditRecords";

const MISSING_STUDY_OID_MESSAGE: &str = "studyoid parameter is required";
const SNAPSHOT_FILE_TYPE: &str = "Snapshot";
const NEXT_PAGE_LINK: &str = "<>; rel=\"next\"";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DatasetQuery {
    pub studyoid: Option<String>,
    pub per_page: Option<String>,
}

impl DatasetQuery {
    /// Reads the known parameters from decoded query pairs
    ///
    /// A repeated parameter keeps its first value; unknown parameters are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };
        Self {
            studyoid: first("studyoid"),
            per_page: first("per_page"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Odm,
    Csv,
}

/// Splits `Name.ext` on the last dot
pub fn parse_dataset(segment: &str) -> Option<(&str, DatasetFormat)> {
    let (name, extension) = segment.rsplit_once('.')?;
    if name.is_empty() {
        return None;
    }
    match extension {
        "odm" => Some((name, DatasetFormat::Odm)),
        "csv" => Some((name, DatasetFormat::Csv)),
        _ => None,
    }
}

pub async fn get_dataset(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    // An unreadable query string counts as a missing studyoid
    let query = match query {
        Ok(Query(pairs)) => DatasetQuery::from_pairs(&pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable dataset query string");
            DatasetQuery::default()
        }
    };

    match parse_dataset(&segment) {
        Some((name, DatasetFormat::Odm)) => odm_dataset(&state, name, &query),
        Some((name, DatasetFormat::Csv)) => csv_dataset(&state, name),
        None => {
            tracing::debug!(dataset = %segment, "Unknown dataset format");
            let document = ClinicalEnvelopeBuilder::new(&state.catalog)
                .build_protocol_error(&format!("Unknown dataset: {segment}"));
            xml_response(StatusCode::NOT_FOUND, &document)
        }
    }
}

fn odm_dataset(state: &AppState, name: &str, query: &DatasetQuery) -> Response {
    let catalog = &state.catalog;
    let envelopes = ClinicalEnvelopeBuilder::new(catalog);

    let Some(study_oid) = StudyOid::from_param(query.studyoid.as_deref()) else {
        crate::log_missing_parameter!(name, "studyoid");
        let code = reason_codes::MISSING_STUDY_OID;
        let document = envelopes.build_error(
            code,
            catalog.reason_message(code, MISSING_STUDY_OID_MESSAGE),
            None,
        );
        return xml_response(status_from_code(catalog.reason_http_status(code)), &document);
    };

    tracing::debug!(dataset = name, study_oid = %study_oid, "Serving ODM dataset");

    match name {
        CLINICAL_DATASETS => xml_response(
            StatusCode::OK,
            &MetadataDocumentBuilder::new(catalog).build(study_oid.as_str(), None),
        ),
        CLINICAL_AUDIT_RECORDS => {
            let document =
                envelopes.build_clinical_data(study_oid.as_str(), Some(SNAPSHOT_FILE_TYPE));
            let mut response = xml_response(StatusCode::OK, &document);
            if query.per_page.is_some() {
                response
                    .headers_mut()
                    .insert(header::LINK, HeaderValue::from_static(NEXT_PAGE_LINK));
            }
            response
        }
        _ => xml_response(
            StatusCode::OK,
            &envelopes.build_clinical_data(study_oid.as_str(), None),
        ),
    }
}

fn csv_dataset(state: &AppState, name: &str) -> Response {
    match state.csv_headers.header(name) {
        Ok(csv) => (StatusCode::OK, [(header::CONTENT_TYPE, TEXT_CSV)], csv).into_response(),
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to render CSV header");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
