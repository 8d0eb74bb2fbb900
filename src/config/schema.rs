//! Configuration schema types
//!
//! This module defines the configuration structure for the mock service. Every
//! section has defaults, so an empty file (or no file at all) yields the built-in
//! mock catalog: one screening visit with a demographics form.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main mock configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Emulated RWS settings
    #[serde(default)]
    pub rws: RwsConfig,

    /// Authentication stub settings
    #[serde(default)]
    pub auth: AuthConfig,

    /// ODM catalog (study, events, forms, item groups, items)
    #[serde(default)]
    pub odm: OdmConfig,

    /// Dataset name to CSV column list
    #[serde(default = "default_csv_datasets")]
    pub csv_datasets: BTreeMap<String, Vec<String>>,

    /// Response envelope placeholders and reason codes
    #[serde(default)]
    pub responses: ResponsesConfig,

    /// Cache flush endpoint settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            application: ApplicationConfig::default(),
            server: ServerConfig::default(),
            rws: RwsConfig::default(),
            auth: AuthConfig::default(),
            odm: OdmConfig::default(),
            csv_datasets: default_csv_datasets(),
            responses: ResponsesConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MockConfig {
    /// Validates the configuration
    ///
    /// Cross-references inside the ODM catalog are deliberately not checked here:
    /// dangling references degrade the generated documents instead of failing startup.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.rws.validate()?;
        self.auth.validate()?;
        self.odm.validate()?;
        self.responses.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum request body size in bytes (ODM uploads)
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit: default_body_limit(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server.port must be > 0".to_string());
        }
        if self.body_limit == 0 {
            return Err("server.body_limit must be > 0".to_string());
        }
        Ok(())
    }

    /// Returns the `host:port` bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Emulated RWS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RwsConfig {
    /// Version string reported by `/RaveWebServices/version`
    #[serde(default = "default_rws_version")]
    pub version: String,
}

impl Default for RwsConfig {
    fn default() -> Self {
        Self {
            version: default_rws_version(),
        }
    }
}

impl RwsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.version.is_empty() {
            return Err("rws.version cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Authentication stub configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// HTTP Basic settings
    #[serde(default)]
    pub basic: BasicAuthConfig,

    /// MAuth (signature header) settings
    #[serde(default)]
    pub mauth: MAuthConfig,

    /// Accepted credentials when `basic.allow_any_credentials` is false
    #[serde(default)]
    pub test_credentials: Vec<TestCredential>,
}

impl AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mauth.enabled && self.mauth.header.is_empty() {
            return Err("auth.mauth.header cannot be empty when MAuth is enabled".to_string());
        }
        if self
            .test_credentials
            .iter()
            .any(|credential| credential.username.is_empty())
        {
            return Err("auth.test_credentials usernames cannot be empty".to_string());
        }
        Ok(())
    }
}

/// HTTP Basic settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicAuthConfig {
    /// Accept Basic credentials at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Accept any non-empty username/password pair
    #[serde(default = "default_true")]
    pub allow_any_credentials: bool,
}

impl Default for BasicAuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_any_credentials: true,
        }
    }
}

/// MAuth settings
///
/// Signatures are never verified; the presence of the header is enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MAuthConfig {
    /// Accept the signature header
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Signature header name
    #[serde(default = "default_mauth_header")]
    pub header: String,
}

impl Default for MAuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            header: default_mauth_header(),
        }
    }
}

/// A username/password pair accepted by the Basic stub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCredential {
    /// Username
    pub username: String,

    /// Password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,
}

/// ODM catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OdmConfig {
    /// Namespace URIs written on every root element
    pub namespace: NamespaceConfig,

    /// ODM protocol version (`ODMVersion`)
    pub version: String,

    /// `FileType` used when the caller gives no override
    pub default_file_type: String,

    /// Study record used when the requested OID has no override
    pub default_study: StudyConfig,

    /// OID-keyed study record overrides
    pub test_studies: Vec<TestStudyConfig>,

    /// Study events (visits)
    pub study_events: Vec<StudyEventConfig>,

    /// Forms
    pub forms: Vec<FormConfig>,

    /// Item groups
    pub item_groups: Vec<ItemGroupConfig>,

    /// Items
    pub items: Vec<ItemConfig>,
}

impl Default for OdmConfig {
    fn default() -> Self {
        Self {
            namespace: NamespaceConfig::default(),
            version: "1.3".to_string(),
            default_file_type: "Snapshot".to_string(),
            default_study: StudyConfig::default(),
            test_studies: Vec::new(),
            study_events: vec![StudyEventConfig {
                oid: "SCREENING".to_string(),
                name: "Screening".to_string(),
                event_type: default_event_type(),
                repeating: false,
                order: 1,
                form: None,
            }],
            forms: vec![FormConfig {
                oid: "DM".to_string(),
                name: "Demographics".to_string(),
                repeating: false,
                item_group: "DM_IG".to_string(),
            }],
            item_groups: vec![ItemGroupConfig {
                oid: "DM_IG".to_string(),
                name: "Demographics".to_string(),
                repeating: false,
                items: vec!["SUBJID".to_string(), "AGE".to_string()],
            }],
            items: vec![
                ItemConfig {
                    oid: "SUBJID".to_string(),
                    name: "Subject ID".to_string(),
                    data_type: "text".to_string(),
                    question: "Subject ID".to_string(),
                    mandatory: true,
                },
                ItemConfig {
                    oid: "AGE".to_string(),
                    name: "Age".to_string(),
                    data_type: "integer".to_string(),
                    question: "Age".to_string(),
                    mandatory: false,
                },
            ],
        }
    }
}

impl OdmConfig {
    fn validate(&self) -> Result<(), String> {
        if self.namespace.odm.is_empty() || self.namespace.mdsol.is_empty() {
            return Err("odm.namespace.odm and odm.namespace.mdsol cannot be empty".to_string());
        }
        if self.version.is_empty() {
            return Err("odm.version cannot be empty".to_string());
        }
        if self.default_file_type.is_empty() {
            return Err("odm.default_file_type cannot be empty".to_string());
        }
        self.default_study.validate("odm.default_study")?;
        for study in &self.test_studies {
            if study.study_oid.is_empty() {
                return Err("odm.test_studies entries need a non-empty study_oid".to_string());
            }
        }
        Ok(())
    }
}

/// Namespace URIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// CDISC ODM namespace
    #[serde(default = "default_odm_namespace")]
    pub odm: String,

    /// Vendor (Medidata) extension namespace
    #[serde(default = "default_mdsol_namespace")]
    pub mdsol: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            odm: default_odm_namespace(),
            mdsol: default_mdsol_namespace(),
        }
    }
}

/// Study record text shown in `GlobalVariables`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    pub study_name: String,
    pub study_description: String,
    pub protocol_name: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            study_name: "Mock Study".to_string(),
            study_description: "Mock study metadata".to_string(),
            protocol_name: "MOCK-001".to_string(),
        }
    }
}

impl StudyConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        if self.study_name.is_empty()
            || self.study_description.is_empty()
            || self.protocol_name.is_empty()
        {
            return Err(format!(
                "{section} needs non-empty study_name, study_description and protocol_name"
            ));
        }
        Ok(())
    }
}

/// Study record override keyed by OID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestStudyConfig {
    pub study_oid: String,
    pub study_name: String,
    pub study_description: String,
    pub protocol_name: String,
}

/// Study event definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyEventConfig {
    pub oid: String,
    pub name: String,

    /// ODM event type (Scheduled, Unscheduled, Common)
    #[serde(rename = "type", default = "default_event_type")]
    pub event_type: String,

    #[serde(default)]
    pub repeating: bool,

    /// Declared order; serialization follows it, output numbering is dense
    #[serde(default)]
    pub order: u32,

    /// Associated form OID (defaults to the first declared form)
    #[serde(default)]
    pub form: Option<String>,
}

/// Form definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub oid: String,
    pub name: String,

    #[serde(default)]
    pub repeating: bool,

    /// Associated item group OID
    pub item_group: String,
}

/// Item group definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemGroupConfig {
    pub oid: String,
    pub name: String,

    #[serde(default)]
    pub repeating: bool,

    /// Item OIDs in display order
    #[serde(default)]
    pub items: Vec<String>,
}

/// Item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub oid: String,
    pub name: String,

    #[serde(default = "default_data_type")]
    pub data_type: String,

    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub mandatory: bool,
}

/// Response envelope placeholders and reason codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsesConfig {
    #[serde(default)]
    pub success: SuccessResponseConfig,

    #[serde(default)]
    pub error: ErrorResponseConfig,

    /// Reason code to message and HTTP status
    #[serde(default = "default_error_codes")]
    pub error_codes: BTreeMap<String, ErrorCodeConfig>,
}

impl Default for ResponsesConfig {
    fn default() -> Self {
        Self {
            success: SuccessResponseConfig::default(),
            error: ErrorResponseConfig::default(),
            error_codes: default_error_codes(),
        }
    }
}

impl ResponsesConfig {
    fn validate(&self) -> Result<(), String> {
        for (code, entry) in &self.error_codes {
            if !(400..=599).contains(&entry.http_status) {
                return Err(format!(
                    "responses.error_codes.{code}.http_status must be between 400 and 599, got {}",
                    entry.http_status
                ));
            }
        }
        Ok(())
    }
}

/// Success envelope placeholders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponseConfig {
    #[serde(default = "default_reference_number")]
    pub reference_number_default: String,

    #[serde(default = "default_inbound_file_oid")]
    pub inbound_file_oid: String,
}

impl Default for SuccessResponseConfig {
    fn default() -> Self {
        Self {
            reference_number_default: default_reference_number(),
            inbound_file_oid: default_inbound_file_oid(),
        }
    }
}

/// Error envelope placeholders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseConfig {
    #[serde(default = "default_error_reference_number")]
    pub reference_number: String,

    #[serde(default = "default_error_success_flag")]
    pub is_transaction_successful: String,
}

impl Default for ErrorResponseConfig {
    fn default() -> Self {
        Self {
            reference_number: default_error_reference_number(),
            is_transaction_successful: default_error_success_flag(),
        }
    }
}

/// Reason code entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorCodeConfig {
    pub message: String,
    pub http_status: u16,
}

/// Cache flush endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// `status` value of the flush acknowledgement
    #[serde(default = "default_flush_status")]
    pub flush_status: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            flush_status: default_flush_status(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024
}

fn default_rws_version() -> String {
    "1.8.0".to_string()
}

fn default_mauth_header() -> String {
    "X-MWS-Authentication".to_string()
}

fn default_odm_namespace() -> String {
    "http://www.cdisc.org/ns/odm/v1.3".to_string()
}

fn default_mdsol_namespace() -> String {
    "http://www.mdsol.com/ns/odm/metadata".to_string()
}

fn default_event_type() -> String {
    "Scheduled".to_string()
}

fn default_data_type() -> String {
    "text".to_string()
}

fn default_reference_number() -> String {
    "0000".to_string()
}

fn default_inbound_file_oid() -> String {
    "mockFile".to_string()
}

fn default_error_reference_number() -> String {
    "error".to_string()
}

fn default_error_success_flag() -> String {
    "0".to_string()
}

fn default_flush_status() -> String {
    "cache flushed".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_csv_datasets() -> BTreeMap<String, Vec<String>> {
    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    BTreeMap::from([
        (
            "Users".to_string(),
            columns(&["UserOID", "Username", "FirstName", "LastName", "Email", "Active", "Role"]),
        ),
        (
            "Sites".to_string(),
            columns(&["StudyOID", "SiteNumber", "SiteName", "SiteStatus", "Country", "Investigator"]),
        ),
        (
            "Signatures".to_string(),
            columns(&["StudyOID", "SiteNumber", "SubjectName", "FormOID", "SignatureDate", "Username"]),
        ),
        (
            "VersionFolders".to_string(),
            columns(&["StudyOID", "FolderOID", "FolderName", "VersionNumber", "Primary"]),
        ),
        (
            "ClinicalView".to_string(),
            columns(&["StudyOID", "SiteNumber", "SubjectName", "FieldOID", "FieldValue", "RecordDate"]),
        ),
    ])
}

fn default_error_codes() -> BTreeMap<String, ErrorCodeConfig> {
    fn entry(message: &str) -> ErrorCodeConfig {
        ErrorCodeConfig {
            message: message.to_string(),
            http_status: 400,
        }
    }

    BTreeMap::from([
        ("RWS00001".to_string(), entry("studyoid parameter is required")),
        (
            "RWS00003".to_string(),
            entry("Invalid ODM XML. Must contain <ODM> root element"),
        ),
        (
            "RWS00004".to_string(),
            entry("ODM XML must include ODMVersion and FileType attributes"),
        ),
    ])
}
