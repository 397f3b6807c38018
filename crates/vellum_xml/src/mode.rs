//! Mode flags and reserved names.

use std::ops::BitOr;

/// Element name used when a node has no name of its own.
pub const DEFAULT_ELEMENT: &str = "Variant";

/// Attribute naming the kind of a tagged element.
pub const ATTR_VARIANT: &str = "variant";
/// Attribute carrying a Tuple's arity or an Array's length.
pub const ATTR_SIZE: &str = "size";
/// Attribute naming an Array's element kind.
pub const ATTR_ELEMENT_TYPE: &str = "elementType";
/// Attribute carrying a TimeSeries observation time.
pub const ATTR_TIME: &str = "time";
/// Attribute naming an Object's class.
pub const ATTR_CLASS: &str = "class";
/// Attribute carrying an Object's version.
pub const ATTR_VERSION: &str = "version";
/// Attribute carrying a DataTable's row count.
pub const ATTR_ROWS: &str = "rows";
/// Attribute carrying a DataTable's column count.
pub const ATTR_COLUMNS: &str = "columns";
/// Attribute naming a DataTable column.
pub const ATTR_NAME: &str = "name";
/// Attribute naming a DataTable column's cell kind.
pub const ATTR_TYPE: &str = "type";

/// Element wrapping an Object's deflated parameters.
pub const ELEMENT_PARAMS: &str = "params";
/// Element declaring one DataTable column.
pub const ELEMENT_COLUMN: &str = "Column";

/// Reserved Mapping key holding element attributes in preserve mode.
pub const KEY_ATTRIBUTES: &str = "__attributes__";
/// Reserved Mapping key holding element text in preserve mode.
pub const KEY_TEXT: &str = "__text__";
/// Reserved Mapping key emitted as a comment in preserve mode.
pub const KEY_COMMENT: &str = "__comment__";
/// Reserved Mapping key emitted as a processing instruction in preserve mode.
pub const KEY_INSTRUCTION: &str = "__instruction__";
/// Reserved key for a processing instruction's target.
pub const KEY_TARGET: &str = "__target__";
/// Reserved key for a processing instruction's data.
pub const KEY_DATA: &str = "__data__";

/// Flags selecting the document shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct XmlMode(u32);

impl XmlMode {
    /// No flags: tagged mode, declaration included, no indentation.
    pub const NONE: Self = Self(0);
    /// Preserve mode: map a Mapping tree onto idiomatic XML. Encode only.
    pub const PRESERVE: Self = Self(0x1);
    /// Indent nested elements.
    pub const INDENT: Self = Self(0x2);
    /// Omit the XML declaration.
    pub const NO_HEADER: Self = Self(0x4);

    /// True if every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for XmlMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
