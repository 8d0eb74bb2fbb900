//! Integration tests for the HTTP API
//!
//! Requests go through the full router (auth stub, trace layer, body limit) with
//! `tower::ServiceExt::oneshot`; no socket is opened.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use rws_mock::config::MockConfig;
use rws_mock::server::{build_router, AppState};
use tower::ServiceExt;

const VALID_ODM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ODM xmlns="http://www.cdisc.org/ns/odm/v1.3" ODMVersion="1.3" FileType="Transactional" FileOID="upload-1">
  <ClinicalData StudyOID="STUDY123" MetaDataVersionOID="1"/>
</ODM>"#;

fn app() -> Router {
    app_with(MockConfig::default())
}

fn app_with(config: MockConfig) -> Router {
    build_router(AppState::from_config(&config).unwrap())
}

fn basic(credentials: &str) -> String {
    format!("Basic {}", STANDARD.encode(credentials))
}

fn authed_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, basic("user:pass"))
        .body(Body::empty())
        .unwrap()
}

fn authed_post(uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, basic("user:pass"))
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn content_type(headers: &axum::http::HeaderMap) -> &str {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

// Authentication

#[tokio::test]
async fn test_protected_route_without_auth() {
    let request = Request::builder()
        .uri("/RaveWebServices/version")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(content_type(&headers).starts_with("application/xml"));
    assert!(body.contains(
        "mdsol:ErrorDescription=\"Authentication required. Provide Basic Auth or MAuth headers.\""
    ));
}

#[tokio::test]
async fn test_mauth_header_alone_is_enough() {
    let request = Request::builder()
        .uri("/RaveWebServices/version")
        .header("X-MWS-Authentication", "MWS app-uuid:signature")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "1.8.0");
}

#[tokio::test]
async fn test_empty_password_rejected() {
    let request = Request::builder()
        .uri("/RaveWebServices/version")
        .header(header::AUTHORIZATION, basic("user:"))
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(app(), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_routes_skip_auth() {
    let (status, headers, body) = send(
        app(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("application/json"));
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert!(health["timestamp"].as_str().unwrap().ends_with('Z'));

    let (status, _, body) = send(
        app(),
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let info: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(info["name"], "Rave Web Services Mock API");
    assert_eq!(info["version"], "1.8.0");
    assert!(info["endpoints"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_404_without_auth() {
    let (status, _, _) = send(
        app(),
        Request::builder().uri("/nope").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// Version and cache flush

#[tokio::test]
async fn test_version_is_plain_text() {
    let (status, headers, body) = send(app(), authed_get("/RaveWebServices/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("text/plain"));
    assert_eq!(body, "1.8.0");
}

#[tokio::test]
async fn test_cache_flush_leaves_metadata_unchanged() {
    let app = app();
    let metadata_uri = "/RaveWebServices/datasets/ClinicalDatasets.odm?studyoid=STUDY123";

    let (_, _, before) = send(app.clone(), authed_get(metadata_uri)).await;

    let (status, _, body) = send(
        app.clone(),
        authed_get("/RaveWebServices/WebService.aspx?CacheFlush"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let flush: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(flush["status"], "cache flushed");

    let (_, _, after) = send(app, authed_get(metadata_uri)).await;

    // FileOID and CreationDateTime differ per response
    let strip = |xml: &str| {
        xml.lines()
            .filter(|line| !line.contains("FileOID="))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&before), strip(&after));
}

#[tokio::test]
async fn test_cache_flush_unknown_parameter() {
    let (status, _, body) = send(
        app(),
        authed_get("/RaveWebServices/WebService.aspx?Other=1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Unknown query parameter"));
}

// Datasets

#[tokio::test]
async fn test_metadata_dataset() {
    let (status, headers, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalDatasets.odm?studyoid=STUDY123"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("application/xml"));
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(body.contains("FileType=\"Snapshot\""));
    assert!(body.contains("<Study OID=\"STUDY123\">"));
    assert!(body.contains("<StudyName>Mock Study</StudyName>"));
    assert!(body.contains("<MetaDataVersion OID=\"1\" Name=\"Version 1\">"));
    assert!(body.contains("StudyEventOID=\"SCREENING\""));
    assert!(body.contains("<ItemDef OID=\"SUBJID\""));
}

#[tokio::test]
async fn test_dataset_without_studyoid() {
    let (status, _, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalDatasets.odm"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ReasonCode=\"RWS00001\""));
    assert!(body.contains("ErrorDescription=\"studyoid parameter is required\""));
    assert!(body.contains("IsTransactionSuccessful=\"0\""));
    assert!(body.contains("ReferenceNumber=\"error\""));
}

#[tokio::test]
async fn test_empty_studyoid_is_missing() {
    let (status, _, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalAuditRecords.odm?studyoid="),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("RWS00001"));
}

#[tokio::test]
async fn test_repeated_studyoid_uses_first_value() {
    let (status, headers, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalDatasets.odm?studyoid=A&studyoid=B"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("application/xml"));
    assert!(body.contains("<Study OID=\"A\">"));
}

#[tokio::test]
async fn test_repeated_empty_studyoid_is_odm_error() {
    let (status, headers, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalAuditRecords.odm?studyoid=&studyoid=&per_page=1&per_page=2"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type(&headers).starts_with("application/xml"));
    assert!(body.contains("ReasonCode=\"RWS00001\""));
}

#[tokio::test]
async fn test_audit_records_are_snapshot() {
    let (status, headers, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalAuditRecords.odm?studyoid=S1&per_page=50"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("FileType=\"Snapshot\""));
    assert!(body.contains("<ClinicalData StudyOID=\"S1\" MetaDataVersionOID=\"1\"/>"));
    assert_eq!(
        headers.get(header::LINK).unwrap().to_str().unwrap(),
        "<>; rel=\"next\""
    );
}

#[tokio::test]
async fn test_audit_records_without_per_page_have_no_link() {
    let (_, headers, _) = send(
        app(),
        authed_get("/RaveWebServices/datasets/ClinicalAuditRecords.odm?studyoid=S1"),
    )
    .await;
    assert!(headers.get(header::LINK).is_none());
}

#[tokio::test]
async fn test_other_odm_dataset_is_clinical_envelope() {
    let (status, _, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/Subjects.odm?studyoid=S2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<ClinicalData StudyOID=\"S2\""));
}

#[tokio::test]
async fn test_csv_dataset_header() {
    let (status, headers, body) = send(app(), authed_get("/RaveWebServices/datasets/Users.csv")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type(&headers).starts_with("text/csv"));
    assert_eq!(body, "UserOID,Username,FirstName,LastName,Email,Active,Role\n");
}

#[tokio::test]
async fn test_unknown_csv_dataset_falls_back() {
    let (status, _, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/Unknown.csv"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "StudyOID,SiteNumber,SubjectName,FieldOID,FieldValue,RecordDate\n"
    );
}

#[tokio::test]
async fn test_unknown_dataset_extension() {
    let (status, _, body) = send(
        app(),
        authed_get("/RaveWebServices/datasets/Users.json"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Unknown dataset: Users.json"));
}

// Imports

#[tokio::test]
async fn test_import_success() {
    let (status, _, body) = send(
        app(),
        authed_post("/RaveWebServices", "text/xml", VALID_ODM),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<Response"));
    assert!(body.contains("IsTransactionSuccessful=\"1\""));
    assert!(body.contains("InboundODMFileOID=\"mockFile\""));

    let reference = body
        .split("ReferenceNumber=\"")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .unwrap();
    assert_eq!(reference.len(), 4);
    assert!(reference.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_import_accepts_charset_parameter() {
    let (status, _, _) = send(
        app(),
        authed_post("/RaveWebServices", "text/xml; charset=utf-8", VALID_ODM),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_import_wrong_content_type() {
    let (status, _, body) = send(
        app(),
        authed_post("/RaveWebServices", "application/json", VALID_ODM),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("mdsol:ErrorDescription=\"Content-Type must be text/xml\""));
    assert!(!body.contains("ReasonCode"));
}

#[tokio::test]
async fn test_import_invalid_structure() {
    let (status, _, body) = send(
        app(),
        authed_post("/RaveWebServices", "text/xml", "<Invalid>XML</Invalid>"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ReasonCode=\"RWS00003\""));
    assert!(body.contains("ErrorDescription=\"Invalid ODM XML. Must contain <ODM> root element\""));
}

#[tokio::test]
async fn test_import_missing_attributes() {
    let (status, _, body) = send(
        app(),
        authed_post("/RaveWebServices", "text/xml", "<ODM><ClinicalData/></ODM>"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ReasonCode=\"RWS00004\""));
}

#[tokio::test]
async fn test_clinical_data_import_skips_attribute_check() {
    let (status, _, body) = send(
        app(),
        authed_post("/RaveWebServices/ClinicalData", "text/xml", "<ODM></ODM>"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("IsTransactionSuccessful=\"1\""));
}

#[tokio::test]
async fn test_import_respects_configured_reason_status() {
    let mut config = MockConfig::default();
    if let Some(entry) = config.responses.error_codes.get_mut("RWS00003") {
        entry.http_status = 422;
        entry.message = "Bad document".to_string();
    }

    let (status, _, body) = send(
        app_with(config),
        authed_post("/RaveWebServices", "text/xml", "plain text"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("ErrorDescription=\"Bad document\""));
}

#[tokio::test]
async fn test_import_body_limit() {
    let mut config = MockConfig::default();
    config.server.body_limit = 64;

    let large = format!("<ODM ODMVersion=\"1.3\" FileType=\"Snapshot\">{}</ODM>", "x".repeat(256));
    let (status, _, _) = send(
        app_with(config),
        authed_post("/RaveWebServices", "text/xml", &large),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
