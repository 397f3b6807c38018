//! Schema collaborator for type inference and validation.
//!
//! The reader itself never parses XSD. A [`Schema`] implementation answers
//! which declared type an element or attribute has and how derived types
//! chain back to the XSD builtins; the reader maps the builtin onto a kind.

use vellum_foundation::{Kind, Severity};

/// One problem found while validating a document against a schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    /// How serious the problem is.
    pub severity: Severity,
    /// Description of the problem.
    pub message: String,
}

impl ValidationIssue {
    /// Creates an issue.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Declared-type oracle backing schema-driven decoding.
pub trait Schema {
    /// The declared type name of an element, if the schema knows it.
    fn element_type(&self, element: &str) -> Option<String>;

    /// The declared type name of an attribute, if the schema knows it.
    fn attribute_type(&self, element: &str, attribute: &str) -> Option<String>;

    /// The base of a derived type, one step up the chain.
    fn base_type(&self, derived: &str) -> Option<String>;

    /// Validates one element's accumulated text; called as each element
    /// closes. Any returned issue aborts the read.
    fn validate_element(&self, element: &str, text: &str) -> Vec<ValidationIssue> {
        let _ = (element, text);
        Vec::new()
    }
}

/// The kind an XSD builtin type maps onto, or `None` for a non-builtin.
#[must_use]
pub fn builtin_kind(type_name: &str) -> Option<Kind> {
    match type_name {
        "duration" | "time" => Some(Kind::Time),
        "date" | "dateTime" => Some(Kind::DateTime),
        "boolean" => Some(Kind::Boolean),
        "base64Binary" => Some(Kind::Buffer),
        "string" => Some(Kind::String),
        "float" | "double" | "decimal" => Some(Kind::Double),
        "integer" | "nonPositiveInteger" | "negativeInteger" | "long" => Some(Kind::Int64),
        "positiveInteger" | "nonNegativeInteger" | "unsignedLong" => Some(Kind::UInt64),
        "int" | "short" | "byte" => Some(Kind::Int32),
        "unsignedInt" | "unsignedShort" | "unsignedByte" => Some(Kind::UInt32),
        _ => None,
    }
}

/// Resolves a declared type to a kind by walking its base-type chain until a
/// builtin matches. Unknown chains fall back to `Any`.
#[must_use]
pub fn kind_for_type(schema: &dyn Schema, declared: &str) -> Kind {
    let mut current = declared.to_string();
    // Bounded walk; a schema with a base-type cycle falls out at Any.
    for _ in 0..32 {
        if let Some(kind) = builtin_kind(&current) {
            return kind;
        }
        match schema.base_type(&current) {
            Some(base) => current = base,
            None => break,
        }
    }
    Kind::Any
}
