//! The ODM catalog
//!
//! [`OdmCatalog`] is the read-only set of study definitions every document builder
//! works from. It is built once from [`MockConfig`] before the server starts and is
//! then shared by reference (`Arc<OdmCatalog>`) across all requests. Nothing on a
//! request path can mutate it, the cache-flush endpoint included.
//!
//! Cross-references (event → form, form → item group, item group → item) are stored
//! as OIDs and resolved at generation time. A reference that does not resolve is not
//! an error; see [`OdmCatalog::unresolved_references`].

use crate::config::MockConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP status used for reason codes missing from the table
pub const DEFAULT_REASON_HTTP_STATUS: u16 = 400;

/// Study-level text shown in `GlobalVariables`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyRecord {
    /// `None` for the default record
    pub oid: Option<String>,
    pub name: String,
    pub description: String,
    pub protocol_name: String,
}

/// A visit in the study protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyEventDef {
    pub oid: String,
    pub name: String,
    pub event_type: String,
    pub repeating: bool,
    /// Declared order index; may contain gaps
    pub order: u32,
    pub form_oid: Option<String>,
}

/// A case report form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDef {
    pub oid: String,
    pub name: String,
    pub repeating: bool,
    pub item_group_oid: String,
}

/// A group of items on a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemGroupDef {
    pub oid: String,
    pub name: String,
    pub repeating: bool,
    /// Item refs in stored order
    pub item_oids: Vec<String>,
}

/// A single question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDef {
    pub oid: String,
    pub name: String,
    pub data_type: String,
    pub question: String,
    pub mandatory: bool,
}

/// Placeholder values written into response envelopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsePlaceholders {
    /// `ReferenceNumber` of a success envelope when the caller supplies none
    pub success_reference_number: String,
    /// `InboundODMFileOID` of every success envelope
    pub inbound_file_oid: String,
    /// `ReferenceNumber` of every error envelope
    pub error_reference_number: String,
    /// Default `IsTransactionSuccessful` of error envelopes
    pub error_success_flag: String,
}

/// Message and HTTP status for one reason code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonCodeEntry {
    pub message: String,
    pub http_status: u16,
}

/// A cross-reference that names an OID missing from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReference {
    /// Study event points at an unknown form (or no form exists at all)
    EventForm { event_oid: String, form_oid: Option<String> },
    /// Form points at an unknown item group
    FormItemGroup { form_oid: String, item_group_oid: String },
    /// Item group lists an unknown item
    GroupItem { item_group_oid: String, item_oid: String },
}

impl fmt::Display for UnresolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventForm {
                event_oid,
                form_oid: Some(form_oid),
            } => write!(f, "study event {event_oid} references unknown form {form_oid}"),
            Self::EventForm {
                event_oid,
                form_oid: None,
            } => write!(f, "study event {event_oid} has no form to reference"),
            Self::FormItemGroup {
                form_oid,
                item_group_oid,
            } => write!(f, "form {form_oid} references unknown item group {item_group_oid}"),
            Self::GroupItem {
                item_group_oid,
                item_oid,
            } => write!(f, "item group {item_group_oid} references unknown item {item_oid}"),
        }
    }
}

/// Immutable catalog of ODM definitions and response placeholders
#[derive(Debug, Clone, Serialize)]
pub struct OdmCatalog {
    odm_namespace: String,
    vendor_namespace: String,
    odm_version: String,
    default_file_type: String,
    default_study: StudyRecord,
    study_overrides: Vec<StudyRecord>,
    study_events: Vec<StudyEventDef>,
    forms: Vec<FormDef>,
    item_groups: Vec<ItemGroupDef>,
    items: Vec<ItemDef>,
    responses: ResponsePlaceholders,
    reason_codes: BTreeMap<String, ReasonCodeEntry>,
    #[serde(skip)]
    unresolved: Vec<UnresolvedReference>,
}

impl OdmCatalog {
    /// Builds the catalog from a loaded configuration
    ///
    /// Study events are sorted by their declared order index (stable, so equal
    /// indices keep declaration order). An event without an explicit form is bound
    /// to the first declared form.
    pub fn from_config(config: &MockConfig) -> Self {
        let odm = &config.odm;
        let first_form = odm.forms.first().map(|form| form.oid.clone());

        let mut study_events: Vec<StudyEventDef> = odm
            .study_events
            .iter()
            .map(|event| StudyEventDef {
                oid: event.oid.clone(),
                name: event.name.clone(),
                event_type: event.event_type.clone(),
                repeating: event.repeating,
                order: event.order,
                form_oid: event.form.clone().or_else(|| first_form.clone()),
            })
            .collect();
        study_events.sort_by_key(|event| event.order);

        let mut catalog = Self {
            odm_namespace: odm.namespace.odm.clone(),
            vendor_namespace: odm.namespace.mdsol.clone(),
            odm_version: odm.version.clone(),
            default_file_type: odm.default_file_type.clone(),
            default_study: StudyRecord {
                oid: None,
                name: odm.default_study.study_name.clone(),
                description: odm.default_study.study_description.clone(),
                protocol_name: odm.default_study.protocol_name.clone(),
            },
            study_overrides: odm
                .test_studies
                .iter()
                .map(|study| StudyRecord {
                    oid: Some(study.study_oid.clone()),
                    name: study.study_name.clone(),
                    description: study.study_description.clone(),
                    protocol_name: study.protocol_name.clone(),
                })
                .collect(),
            study_events,
            forms: odm
                .forms
                .iter()
                .map(|form| FormDef {
                    oid: form.oid.clone(),
                    name: form.name.clone(),
                    repeating: form.repeating,
                    item_group_oid: form.item_group.clone(),
                })
                .collect(),
            item_groups: odm
                .item_groups
                .iter()
                .map(|group| ItemGroupDef {
                    oid: group.oid.clone(),
                    name: group.name.clone(),
                    repeating: group.repeating,
                    item_oids: group.items.clone(),
                })
                .collect(),
            items: odm
                .items
                .iter()
                .map(|item| ItemDef {
                    oid: item.oid.clone(),
                    name: item.name.clone(),
                    data_type: item.data_type.clone(),
                    question: item.question.clone(),
                    mandatory: item.mandatory,
                })
                .collect(),
            responses: ResponsePlaceholders {
                success_reference_number: config.responses.success.reference_number_default.clone(),
                inbound_file_oid: config.responses.success.inbound_file_oid.clone(),
                error_reference_number: config.responses.error.reference_number.clone(),
                error_success_flag: config.responses.error.is_transaction_successful.clone(),
            },
            reason_codes: config
                .responses
                .error_codes
                .iter()
                .map(|(code, entry)| {
                    (
                        code.clone(),
                        ReasonCodeEntry {
                            message: entry.message.clone(),
                            http_status: entry.http_status,
                        },
                    )
                })
                .collect(),
            unresolved: Vec::new(),
        };
        catalog.unresolved = catalog.find_unresolved();
        catalog
    }

    pub fn odm_namespace(&self) -> &str {
        &self.odm_namespace
    }

    pub fn vendor_namespace(&self) -> &str {
        &self.vendor_namespace
    }

    pub fn odm_version(&self) -> &str {
        &self.odm_version
    }

    pub fn default_file_type(&self) -> &str {
        &self.default_file_type
    }

    pub fn default_study(&self) -> &StudyRecord {
        &self.default_study
    }

    /// Study events in serialization order
    pub fn study_events(&self) -> &[StudyEventDef] {
        &self.study_events
    }

    pub fn forms(&self) -> &[FormDef] {
        &self.forms
    }

    pub fn item_groups(&self) -> &[ItemGroupDef] {
        &self.item_groups
    }

    pub fn items(&self) -> &[ItemDef] {
        &self.items
    }

    pub fn responses(&self) -> &ResponsePlaceholders {
        &self.responses
    }

    /// Resolves the study record for an OID, falling back to the default record
    pub fn resolve_study(&self, study_oid: &str) -> &StudyRecord {
        self.study_overrides
            .iter()
            .find(|study| study.oid.as_deref() == Some(study_oid))
            .unwrap_or(&self.default_study)
    }

    pub fn form(&self, oid: &str) -> Option<&FormDef> {
        self.forms.iter().find(|form| form.oid == oid)
    }

    pub fn item_group(&self, oid: &str) -> Option<&ItemGroupDef> {
        self.item_groups.iter().find(|group| group.oid == oid)
    }

    pub fn item(&self, oid: &str) -> Option<&ItemDef> {
        self.items.iter().find(|item| item.oid == oid)
    }

    pub fn reason(&self, code: &str) -> Option<&ReasonCodeEntry> {
        self.reason_codes.get(code)
    }

    /// Message configured for a reason code, or `fallback` when the code is unknown
    pub fn reason_message<'a>(&'a self, code: &str, fallback: &'a str) -> &'a str {
        self.reason(code)
            .map(|entry| entry.message.as_str())
            .unwrap_or(fallback)
    }

    /// HTTP status configured for a reason code
    pub fn reason_http_status(&self, code: &str) -> u16 {
        self.reason(code)
            .map(|entry| entry.http_status)
            .unwrap_or(DEFAULT_REASON_HTTP_STATUS)
    }

    /// Every cross-reference that does not resolve, computed once at construction
    ///
    /// Used for startup warnings and `validate-config`; generation tolerates all of them.
    pub fn unresolved_references(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    fn find_unresolved(&self) -> Vec<UnresolvedReference> {
        let mut unresolved = Vec::new();

        for event in &self.study_events {
            let resolved = event
                .form_oid
                .as_deref()
                .is_some_and(|form_oid| self.form(form_oid).is_some());
            if !resolved {
                unresolved.push(UnresolvedReference::EventForm {
                    event_oid: event.oid.clone(),
                    form_oid: event.form_oid.clone(),
                });
            }
        }

        for form in &self.forms {
            if self.item_group(&form.item_group_oid).is_none() {
                unresolved.push(UnresolvedReference::FormItemGroup {
                    form_oid: form.oid.clone(),
                    item_group_oid: form.item_group_oid.clone(),
                });
            }
        }

        for group in &self.item_groups {
            for item_oid in &group.item_oids {
                if self.item(item_oid).is_none() {
                    unresolved.push(UnresolvedReference::GroupItem {
                        item_group_oid: group.oid.clone(),
                        item_oid: item_oid.clone(),
                    });
                }
            }
        }

        unresolved
    }
}

impl Default for OdmCatalog {
    fn default() -> Self {
        Self::from_config(&MockConfig::default())
    }
}
