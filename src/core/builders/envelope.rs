//! Clinical-data envelopes and transaction-result documents

use crate::core::document::{DocumentStamp, XmlDocument, XmlElement};
use crate::domain::{OdmCatalog, ResponseEnvelope};

/// `FileOID` prefix of clinical-data envelopes and bare roots
pub const ENVELOPE_FILE_OID_PREFIX: &str = "mock";

/// The single metadata version every document refers to
pub const METADATA_VERSION_OID: &str = "1";

/// `IsTransactionSuccessful` of every success envelope
const TRANSACTION_SUCCESSFUL: &str = "1";

/// Builds the `ODM` root element shared by metadata and clinical-data documents
///
/// Attribute order is fixed: `xmlns`, `xmlns:mdsol`, `FileType`, `FileOID`,
/// `CreationDateTime`, `ODMVersion`.
pub(crate) fn odm_root(
    catalog: &OdmCatalog,
    file_type: Option<&str>,
    stamp: &DocumentStamp,
) -> XmlElement {
    XmlElement::new("ODM")
        .attr("xmlns", catalog.odm_namespace())
        .attr("xmlns:mdsol", catalog.vendor_namespace())
        .attr("FileType", file_type.unwrap_or(catalog.default_file_type()))
        .attr("FileOID", stamp.file_oid.as_str())
        .attr("CreationDateTime", stamp.creation_date_time.as_str())
        .attr("ODMVersion", catalog.odm_version())
}

/// Builds envelopes and `Response` documents from the catalog
#[derive(Debug, Clone, Copy)]
pub struct ClinicalEnvelopeBuilder<'a> {
    catalog: &'a OdmCatalog,
}

impl<'a> ClinicalEnvelopeBuilder<'a> {
    pub fn new(catalog: &'a OdmCatalog) -> Self {
        Self { catalog }
    }

    /// A bare `ODM` root with a freshly minted stamp
    pub fn build_root(&self, file_type: Option<&str>) -> XmlDocument {
        self.build_root_with_stamp(file_type, &DocumentStamp::mint(ENVELOPE_FILE_OID_PREFIX))
    }

    pub fn build_root_with_stamp(
        &self,
        file_type: Option<&str>,
        stamp: &DocumentStamp,
    ) -> XmlDocument {
        XmlDocument::new(odm_root(self.catalog, file_type, stamp))
    }

    /// An `ODM` root holding one empty `ClinicalData` for `study_oid`
    ///
    /// No subject-level content is ever produced.
    pub fn build_clinical_data(&self, study_oid: &str, file_type: Option<&str>) -> XmlDocument {
        self.build_clinical_data_with_stamp(
            study_oid,
            file_type,
            &DocumentStamp::mint(ENVELOPE_FILE_OID_PREFIX),
        )
    }

    pub fn build_clinical_data_with_stamp(
        &self,
        study_oid: &str,
        file_type: Option<&str>,
        stamp: &DocumentStamp,
    ) -> XmlDocument {
        let clinical_data = XmlElement::new("ClinicalData")
            .attr("StudyOID", study_oid)
            .attr("MetaDataVersionOID", METADATA_VERSION_OID);

        XmlDocument::new(odm_root(self.catalog, file_type, stamp).child(clinical_data))
    }

    /// A success `Response`; `InboundODMFileOID` is always the catalog placeholder
    pub fn build_success(&self, reference_number: Option<&str>) -> XmlDocument {
        self.render(&ResponseEnvelope::success(
            self.catalog.responses(),
            reference_number,
        ))
    }

    /// An error `Response`
    ///
    /// `ReasonCode` and `ErrorDescription` are written exactly as given, without
    /// escaping. The default RWS00003 message keeps its literal `<ODM>`.
    pub fn build_error(
        &self,
        reason_code: &str,
        description: &str,
        success_flag_override: Option<&str>,
    ) -> XmlDocument {
        self.render(&ResponseEnvelope::error(
            self.catalog.responses(),
            reason_code,
            description,
            success_flag_override,
        ))
    }

    /// A bare `ODM` root carrying `mdsol:ErrorDescription`, for failures that happen
    /// before any document is looked at
    pub fn build_protocol_error(&self, description: &str) -> XmlDocument {
        XmlDocument::new(
            XmlElement::new("ODM")
                .attr("xmlns", self.catalog.odm_namespace())
                .attr("xmlns:mdsol", self.catalog.vendor_namespace())
                .attr("mdsol:ErrorDescription", description),
        )
    }

    /// Renders a typed envelope as a `Response` document
    pub fn render(&self, envelope: &ResponseEnvelope) -> XmlDocument {
        let response = match envelope {
            ResponseEnvelope::Success {
                reference_number,
                inbound_file_oid,
            } => XmlElement::new("Response")
                .attr("xmlns", self.catalog.odm_namespace())
                .attr("ReferenceNumber", reference_number.as_str())
                .attr("InboundODMFileOID", inbound_file_oid.as_str())
                .attr("IsTransactionSuccessful", TRANSACTION_SUCCESSFUL),
            ResponseEnvelope::Error {
                reference_number,
                is_transaction_successful,
                reason_code,
                error_description,
            } => XmlElement::new("Response")
                .attr("xmlns", self.catalog.odm_namespace())
                .attr("xmlns:mdsol", self.catalog.vendor_namespace())
                .attr("ReferenceNumber", reference_number.as_str())
                .attr("IsTransactionSuccessful", is_transaction_successful.as_str())
                .verbatim_attr("ReasonCode", reason_code.as_str())
                .verbatim_attr("ErrorDescription", error_description.as_str()),
        };

        XmlDocument::new(response)
    }
}
