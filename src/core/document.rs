//! ODM document model
//!
//! Documents are built as an ordered node tree and serialized in one pass with
//! `quick_xml`. Element order, attribute order and child order are exactly the
//! insertion order, so a tree built from the same inputs always serializes to the
//! same bytes.
//!
//! Attribute values are escaped on output unless they were added with
//! [`XmlElement::verbatim_attr`], which writes the bytes as given.

use crate::domain::Result;
use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use uuid::Uuid;

/// An attribute value and how it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Markup-significant characters are escaped
    Escaped(String),
    /// Written byte-for-byte, caller guarantees XML safety
    Verbatim(String),
}

impl AttrValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Escaped(value) | Self::Verbatim(value) => value,
        }
    }
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, AttrValue)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Appends an escaped attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .push((name.into(), AttrValue::Escaped(value.into())));
        self
    }

    /// Appends an attribute written without escaping
    pub fn verbatim_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .push((name.into(), AttrValue::Verbatim(value.into())));
        self
    }

    /// Appends a child element
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Appends every element from an iterator, in order
    pub fn children_from(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    /// Appends a text node
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Shorthand for `<name>text</name>`
    pub fn text_element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).text(text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, AttrValue)] {
        &self.attributes
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element called `name`
    pub fn first_child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Child elements called `name`, in order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |element| element.name == name)
    }

    /// All descendant elements called `name`, depth-first in document order
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for element in self.elements() {
            if element.name == name {
                found.push(element);
            }
            element.collect_named(name, found);
        }
    }

    /// Concatenated text children
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(text) => Some(text.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    fn write<W: Write>(&self, xml: &mut Writer<W>) -> std::io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            match value {
                AttrValue::Escaped(value) => start.push_attribute((key.as_str(), value.as_str())),
                AttrValue::Verbatim(value) => {
                    start.push_attribute((key.as_bytes(), value.as_bytes()))
                }
            }
        }

        if self.children.is_empty() {
            return xml.write_event(Event::Empty(start));
        }

        xml.write_event(Event::Start(start))?;
        for node in &self.children {
            match node {
                XmlNode::Element(element) => element.write(xml)?,
                XmlNode::Text(text) => xml.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        xml.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }
}

/// A complete XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

impl XmlDocument {
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Writes the declaration and the tree, indented by two spaces
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml = Writer::new_with_indent(writer, b' ', 2);
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.root.write(&mut xml)?;
        Ok(())
    }

    /// Serializes the document to a string
    pub fn to_xml(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Per-document identity: the minted `FileOID` and the `CreationDateTime`
///
/// These are the only values that differ between two documents built from the
/// same catalog and inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStamp {
    pub file_oid: String,
    pub creation_date_time: String,
}

impl DocumentStamp {
    /// Mints `"{prefix}-{uuid}"` and stamps the current UTC time
    pub fn mint(prefix: &str) -> Self {
        Self {
            file_oid: format!("{prefix}-{}", Uuid::new_v4()),
            creation_date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// A pinned stamp, for reproducible output
    pub fn fixed(file_oid: impl Into<String>, creation_date_time: impl Into<String>) -> Self {
        Self {
            file_oid: file_oid.into(),
            creation_date_time: creation_date_time.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlDocument {
        XmlDocument::new(
            XmlElement::new("ODM")
                .attr("FileType", "Snapshot")
                .child(
                    XmlElement::new("Study")
                        .attr("OID", "S1")
                        .child(XmlElement::text_element("StudyName", "A & B")),
                )
                .child(XmlElement::new("Empty")),
        )
    }

    #[test]
    fn test_serialization_layout() {
        let xml = sample().to_xml().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <ODM FileType=\"Snapshot\">\n  \
             <Study OID=\"S1\">\n    \
             <StudyName>A &amp; B</StudyName>\n  \
             </Study>\n  \
             <Empty/>\n\
             </ODM>"
        );
    }

    #[test]
    fn test_escaped_attribute() {
        let doc = XmlDocument::new(XmlElement::new("R").attr("D", "<ODM> & \"x\""));
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("D=\"&lt;ODM&gt; &amp; &quot;x&quot;\""));
    }

    #[test]
    fn test_verbatim_attribute() {
        let doc = XmlDocument::new(XmlElement::new("R").verbatim_attr("D", "<ODM> & x"));
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("D=\"<ODM> & x\""));
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let doc = XmlDocument::new(
            XmlElement::new("R")
                .attr("Z", "1")
                .attr("A", "2")
                .verbatim_attr("M", "3"),
        );
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<R Z=\"1\" A=\"2\" M=\"3\"/>"));
    }

    #[test]
    fn test_navigation() {
        let doc = sample();
        let root = doc.root();
        assert_eq!(root.name(), "ODM");
        assert_eq!(root.attribute("FileType"), Some("Snapshot"));
        assert!(root.attribute("Missing").is_none());

        let study = root.first_child("Study").unwrap();
        assert_eq!(study.attribute("OID"), Some("S1"));
        assert_eq!(
            study.first_child("StudyName").unwrap().text_content(),
            "A & B"
        );
        assert_eq!(root.elements().count(), 2);
        assert_eq!(root.descendants_named("StudyName").len(), 1);
        assert_eq!(root.children_named("Empty").count(), 1);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        assert_eq!(sample().to_xml().unwrap(), sample().to_xml().unwrap());
    }

    #[test]
    fn test_stamp_mint() {
        let first = DocumentStamp::mint("metadata");
        let second = DocumentStamp::mint("metadata");
        assert!(first.file_oid.starts_with("metadata-"));
        assert_ne!(first.file_oid, second.file_oid);
        assert!(first.creation_date_time.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&first.creation_date_time).is_ok());
    }
}
