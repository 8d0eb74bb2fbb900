//! Study metadata documents
//!
//! The `MetaDataVersion` body is composed in a fixed order: `Protocol`, then the
//! `StudyEventDef`, `FormDef`, `ItemGroupDef` and `ItemDef` blocks, each in catalog
//! order. `OrderNumber` values are always a dense 1..N sequence regardless of gaps in
//! the stored order indices.
//!
//! Cross-references are looked up while building and never fail the document:
//! an event whose form is unknown gets no `FormRef`, and an `ItemRef` to an unknown
//! item is written with `Mandatory="No"`.

use super::envelope::{odm_root, METADATA_VERSION_OID};
use crate::core::document::{DocumentStamp, XmlDocument, XmlElement};
use crate::domain::{FormDef, ItemDef, ItemGroupDef, OdmCatalog, StudyEventDef, StudyRecord};

/// `FileOID` prefix of metadata documents
pub const METADATA_FILE_OID_PREFIX: &str = "metadata";

const METADATA_VERSION_NAME: &str = "Version 1";

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Builds `ClinicalDatasets` metadata from the catalog
#[derive(Debug, Clone, Copy)]
pub struct MetadataDocumentBuilder<'a> {
    catalog: &'a OdmCatalog,
}

impl<'a> MetadataDocumentBuilder<'a> {
    pub fn new(catalog: &'a OdmCatalog) -> Self {
        Self { catalog }
    }

    /// Builds the metadata document for `study_oid` with a freshly minted stamp
    ///
    /// The requested OID is written to `Study OID` as given, even when the catalog
    /// has no record for it and the default study text is used.
    pub fn build(&self, study_oid: &str, file_type: Option<&str>) -> XmlDocument {
        self.build_with_stamp(
            study_oid,
            file_type,
            &DocumentStamp::mint(METADATA_FILE_OID_PREFIX),
        )
    }

    /// Builds the metadata document with a caller-supplied stamp
    ///
    /// Output is a pure function of the catalog, `study_oid`, `file_type` and `stamp`.
    pub fn build_with_stamp(
        &self,
        study_oid: &str,
        file_type: Option<&str>,
        stamp: &DocumentStamp,
    ) -> XmlDocument {
        let study = XmlElement::new("Study")
            .attr("OID", study_oid)
            .child(global_variables(self.catalog.resolve_study(study_oid)))
            .child(self.metadata_version());

        XmlDocument::new(odm_root(self.catalog, file_type, stamp).child(study))
    }

    fn metadata_version(&self) -> XmlElement {
        let catalog = self.catalog;

        XmlElement::new("MetaDataVersion")
            .attr("OID", METADATA_VERSION_OID)
            .attr("Name", METADATA_VERSION_NAME)
            .child(protocol(catalog.study_events()))
            .children_from(
                catalog
                    .study_events()
                    .iter()
                    .map(|event| self.study_event_def(event)),
            )
            .children_from(catalog.forms().iter().map(form_def))
            .children_from(
                catalog
                    .item_groups()
                    .iter()
                    .map(|group| self.item_group_def(group)),
            )
            .children_from(catalog.items().iter().map(item_def))
    }

    fn study_event_def(&self, event: &StudyEventDef) -> XmlElement {
        let element = XmlElement::new("StudyEventDef")
            .attr("OID", event.oid.as_str())
            .attr("Name", event.name.as_str())
            .attr("Type", event.event_type.as_str())
            .attr("Repeating", yes_no(event.repeating));

        match event
            .form_oid
            .as_deref()
            .and_then(|form_oid| self.catalog.form(form_oid))
        {
            Some(form) => element.child(
                XmlElement::new("FormRef")
                    .attr("FormOID", form.oid.as_str())
                    .attr("OrderNumber", "1")
                    .attr("Mandatory", "Yes"),
            ),
            None => element,
        }
    }

    fn item_group_def(&self, group: &ItemGroupDef) -> XmlElement {
        let item_refs = group.item_oids.iter().enumerate().map(|(idx, item_oid)| {
            let mandatory = self
                .catalog
                .item(item_oid)
                .is_some_and(|item| item.mandatory);

            XmlElement::new("ItemRef")
                .attr("ItemOID", item_oid.as_str())
                .attr("OrderNumber", (idx + 1).to_string())
                .attr("Mandatory", yes_no(mandatory))
        });

        XmlElement::new("ItemGroupDef")
            .attr("OID", group.oid.as_str())
            .attr("Name", group.name.as_str())
            .attr("Repeating", yes_no(group.repeating))
            .children_from(item_refs)
    }
}

fn global_variables(study: &StudyRecord) -> XmlElement {
    XmlElement::new("GlobalVariables")
        .child(XmlElement::text_element("StudyName", study.name.as_str()))
        .child(XmlElement::text_element(
            "StudyDescription",
            study.description.as_str(),
        ))
        .child(XmlElement::text_element(
            "ProtocolName",
            study.protocol_name.as_str(),
        ))
}

fn protocol(events: &[StudyEventDef]) -> XmlElement {
    XmlElement::new("Protocol").children_from(events.iter().enumerate().map(|(idx, event)| {
        XmlElement::new("StudyEventRef")
            .attr("StudyEventOID", event.oid.as_str())
            .attr("OrderNumber", (idx + 1).to_string())
            .attr("Mandatory", "Yes")
    }))
}

fn form_def(form: &FormDef) -> XmlElement {
    XmlElement::new("FormDef")
        .attr("OID", form.oid.as_str())
        .attr("Name", form.name.as_str())
        .attr("Repeating", yes_no(form.repeating))
        .child(
            XmlElement::new("ItemGroupRef")
                .attr("ItemGroupOID", form.item_group_oid.as_str())
                .attr("Mandatory", "Yes"),
        )
}

fn item_def(item: &ItemDef) -> XmlElement {
    XmlElement::new("ItemDef")
        .attr("OID", item.oid.as_str())
        .attr("Name", item.name.as_str())
        .attr("DataType", item.data_type.as_str())
        .child(
            XmlElement::new("Question")
                .child(XmlElement::text_element("TranslatedText", item.question.as_str())),
        )
}
