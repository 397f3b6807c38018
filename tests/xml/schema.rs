//! Schema-driven decoding of untyped documents
//!
//! A schema supplies declared types for elements and attributes, so plain
//! XML comes back with exact kinds instead of `Any`, and can be validated
//! as it is read.

use std::collections::HashMap;

use vellum_foundation::{ErrorKind, Severity, Variant, text};
use vellum_xml::{ReadOptions, Schema, ValidationIssue, XmlMode, from_str};

/// A schema built from plain maps, standing in for a parsed XSD.
#[derive(Default)]
struct MapSchema {
    elements: HashMap<String, String>,
    attributes: HashMap<(String, String), String>,
    bases: HashMap<String, String>,
    reject: Option<String>,
}

impl MapSchema {
    fn element(mut self, name: &str, declared: &str) -> Self {
        self.elements.insert(name.to_string(), declared.to_string());
        self
    }

    fn attribute(mut self, element: &str, name: &str, declared: &str) -> Self {
        self.attributes.insert(
            (element.to_string(), name.to_string()),
            declared.to_string(),
        );
        self
    }

    fn base(mut self, derived: &str, base: &str) -> Self {
        self.bases.insert(derived.to_string(), base.to_string());
        self
    }

    fn rejecting(mut self, element: &str) -> Self {
        self.reject = Some(element.to_string());
        self
    }
}

impl Schema for MapSchema {
    fn element_type(&self, element: &str) -> Option<String> {
        self.elements.get(element).cloned()
    }

    fn attribute_type(&self, element: &str, attribute: &str) -> Option<String> {
        self.attributes
            .get(&(element.to_string(), attribute.to_string()))
            .cloned()
    }

    fn base_type(&self, derived: &str) -> Option<String> {
        self.bases.get(derived).cloned()
    }

    fn validate_element(&self, element: &str, _text: &str) -> Vec<ValidationIssue> {
        match &self.reject {
            Some(rejected) if rejected == element => vec![ValidationIssue::new(
                Severity::Error,
                format!("element {element:?} is not allowed here"),
            )],
            _ => Vec::new(),
        }
    }
}

fn read_with(document: &str, schema: &MapSchema) -> vellum_foundation::Result<Variant> {
    let options = ReadOptions {
        factory: None,
        create_proxy: false,
        schema: Some(schema),
    };
    from_str(document, XmlMode::NONE, &options)
}

// =============================================================================
// Inference
// =============================================================================

#[test]
fn declared_elements_decode_to_exact_kinds() {
    let schema = MapSchema::default()
        .element("count", "int")
        .element("ratio", "double")
        .element("label", "string")
        .element("flag", "boolean")
        .element("when", "dateTime")
        .element("payload", "base64Binary");

    assert_eq!(
        read_with("<count>42</count>", &schema).unwrap(),
        Variant::Int32(42)
    );
    assert_eq!(
        read_with("<ratio>0.25</ratio>", &schema).unwrap(),
        Variant::Double(0.25)
    );
    assert_eq!(
        read_with("<label>plain</label>", &schema).unwrap(),
        Variant::String("plain".to_string())
    );
    assert_eq!(
        read_with("<flag>true</flag>", &schema).unwrap(),
        Variant::Boolean(true)
    );
    assert_eq!(
        read_with("<when>2021-03-04T05:06:07</when>", &schema).unwrap(),
        Variant::DateTime(text::parse_date_time("2021-03-04T05:06:07").unwrap())
    );
    assert_eq!(
        read_with("<payload>AQID</payload>", &schema).unwrap(),
        Variant::Buffer(vec![1, 2, 3])
    );
}

#[test]
fn integer_families_map_to_distinct_widths() {
    let schema = MapSchema::default()
        .element("narrow", "short")
        .element("wide", "long")
        .element("counted", "unsignedInt")
        .element("huge", "nonNegativeInteger");

    assert_eq!(
        read_with("<narrow>-5</narrow>", &schema).unwrap(),
        Variant::Int32(-5)
    );
    assert_eq!(
        read_with("<wide>-5000000000</wide>", &schema).unwrap(),
        Variant::Int64(-5_000_000_000)
    );
    assert_eq!(
        read_with("<counted>7</counted>", &schema).unwrap(),
        Variant::UInt32(7)
    );
    assert_eq!(
        read_with("<huge>18446744073709551615</huge>", &schema).unwrap(),
        Variant::UInt64(u64::MAX)
    );
}

#[test]
fn derived_types_resolve_through_their_base_chain() {
    let schema = MapSchema::default()
        .element("score", "percent")
        .base("percent", "bounded")
        .base("bounded", "decimal");
    assert_eq!(
        read_with("<score>97.5</score>", &schema).unwrap(),
        Variant::Double(97.5)
    );
}

#[test]
fn undeclared_elements_stay_untyped() {
    let schema = MapSchema::default().element("count", "int");
    // Unknown element, known child: the parent folds into a Bag and the
    // child still gets its declared kind.
    let value = read_with("<row><count>3</count><note>hi</note></row>", &schema).unwrap();
    assert_eq!(value.get_key("count").unwrap(), &Variant::Int32(3));
    assert_eq!(
        value.get_key("note").unwrap(),
        &Variant::Any("hi".to_string())
    );
}

#[test]
fn unknown_declared_types_fall_back_to_any() {
    let schema = MapSchema::default().element("blob", "vendorSpecific");
    assert_eq!(
        read_with("<blob>opaque</blob>", &schema).unwrap(),
        Variant::Any("opaque".to_string())
    );
}

#[test]
fn declared_attributes_are_typed() {
    let schema = MapSchema::default()
        .attribute("node", "id", "int")
        .attribute("node", "weight", "double");
    let value = read_with(
        r#"<node id="7" weight="1.5" tag="free"><child>x</child></node>"#,
        &schema,
    )
    .unwrap();
    assert_eq!(value.get_key("id").unwrap(), &Variant::Int32(7));
    assert_eq!(value.get_key("weight").unwrap(), &Variant::Double(1.5));
    assert_eq!(
        value.get_key("tag").unwrap(),
        &Variant::Any("free".to_string())
    );
}

#[test]
fn explicit_kind_attributes_win_over_the_schema() {
    // A tagged element keeps its own kind even when the schema declares one.
    let schema = MapSchema::default().element("count", "double");
    assert_eq!(
        read_with(r#"<count variant="Int32">42</count>"#, &schema).unwrap(),
        Variant::Int32(42)
    );
}

#[test]
fn malformed_scalar_text_is_rejected() {
    let schema = MapSchema::default().element("count", "int");
    let err = read_with("<count>forty-two</count>", &schema).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Format(_)));
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn validation_issues_abort_the_read() {
    let schema = MapSchema::default()
        .element("count", "int")
        .rejecting("legacy");
    let err = read_with("<root><legacy>1</legacy></root>", &schema).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::Validation {
            severity: Severity::Error,
            ..
        }
    ));
    assert!(format!("{err}").contains("legacy"));

    // The same document reads fine once nothing rejects it.
    assert!(read_with("<root><legacy>1</legacy></root>", &MapSchema::default()).is_ok());
}
