//! Kind discriminants and grouping masks.

use std::fmt;

/// The kind of value held by a [`Variant`](crate::Variant).
///
/// Discriminants are the exact codes used on the binary wire, one bit per
/// kind, so that kinds can also be combined into capability masks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum Kind {
    /// No value.
    None = 0x0000_0001,
    /// Unparsed text, lazily coerced to a concrete primitive on typed access.
    Any = 0x0000_0002,
    /// UTF-8 string.
    String = 0x0000_0004,
    /// Boolean.
    Boolean = 0x0000_0008,
    /// 32-bit signed integer.
    Int32 = 0x0000_0010,
    /// 32-bit unsigned integer.
    UInt32 = 0x0000_0020,
    /// 64-bit signed integer.
    Int64 = 0x0000_0040,
    /// 64-bit unsigned integer.
    UInt64 = 0x0000_0080,
    /// 32-bit floating point.
    Float = 0x0000_0100,
    /// 64-bit floating point.
    Double = 0x0000_0200,
    // 0x0000_0400 is the retired Date kind; the gap keeps every later code
    // wire-compatible with streams written before its removal.
    /// Duration with millisecond resolution.
    Time = 0x0000_0800,
    /// Calendar date and time of day, millisecond resolution.
    DateTime = 0x0000_1000,
    /// Ordered sequence of variants.
    List = 0x0000_2000,
    /// String-keyed map with unique keys and canonical (sorted) order.
    Dictionary = 0x0000_4000,
    /// String-keyed multimap preserving insertion order.
    Bag = 0x0000_8000,
    /// Raw byte buffer.
    Buffer = 0x0001_0000,
    /// Fixed-arity sequence of variants.
    Tuple = 0x0002_0000,
    /// Captured exception information.
    Exception = 0x0004_0000,
    /// (time, value) pairs preserving insertion order.
    TimeSeries = 0x0008_0000,
    /// User-defined object, or a proxy for an unknown class.
    Object = 0x0010_0000,
    /// Homogeneous vector of one primitive kind.
    Array = 0x0020_0000,
    /// Named, kind-typed columns of equal length.
    DataTable = 0x0040_0000,
}

/// Capability masks over [`Kind`] bits.
pub mod mask {
    use super::Kind;

    /// Boolean and the fixed-width integers.
    pub const INTEGER: u32 = Kind::Boolean as u32
        | Kind::Int32 as u32
        | Kind::UInt32 as u32
        | Kind::Int64 as u32
        | Kind::UInt64 as u32;

    /// Integers plus floating point.
    pub const NUMBER: u32 = INTEGER | Kind::Float as u32 | Kind::Double as u32;

    /// All primitive kinds.
    pub const PRIMITIVE: u32 = NUMBER
        | Kind::Time as u32
        | Kind::DateTime as u32
        | Kind::Any as u32
        | Kind::String as u32;

    /// Index-addressed collections.
    pub const SEQUENCE: u32 = Kind::List as u32 | Kind::Tuple as u32;

    /// Key-addressed collections.
    pub const MAPPING: u32 = Kind::Dictionary as u32 | Kind::Bag as u32;

    /// Every collection kind.
    pub const COLLECTION: u32 = SEQUENCE | MAPPING | Kind::TimeSeries as u32;
}

/// All kinds, in ordinal (wire-code) order.
const ALL: [Kind; 22] = [
    Kind::None,
    Kind::Any,
    Kind::String,
    Kind::Boolean,
    Kind::Int32,
    Kind::UInt32,
    Kind::Int64,
    Kind::UInt64,
    Kind::Float,
    Kind::Double,
    Kind::Time,
    Kind::DateTime,
    Kind::List,
    Kind::Dictionary,
    Kind::Bag,
    Kind::Buffer,
    Kind::Tuple,
    Kind::Exception,
    Kind::TimeSeries,
    Kind::Object,
    Kind::Array,
    Kind::DataTable,
];

impl Kind {
    /// Returns true if this kind is included in `mask`.
    #[must_use]
    pub const fn is(self, mask: u32) -> bool {
        (self as u32) & mask != 0
    }

    /// The wire code for this kind.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Position of this kind in wire-code order, used for cross-kind ordering.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        (self as u32).trailing_zeros()
    }

    /// The tag name, as used by the XML `variant` attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Any => "Any",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
            Self::List => "List",
            Self::Dictionary => "Dictionary",
            Self::Bag => "Bag",
            Self::Buffer => "Buffer",
            Self::Tuple => "Tuple",
            Self::Exception => "Exception",
            Self::TimeSeries => "TimeSeries",
            Self::Object => "Object",
            Self::Array => "Array",
            Self::DataTable => "DataTable",
        }
    }

    /// Looks up a kind by its tag name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        ALL.iter().copied().find(|k| k.name() == name)
    }

    /// Looks up a kind by its wire code.
    #[must_use]
    pub fn from_wire(code: u32) -> Option<Self> {
        ALL.iter().copied().find(|k| k.code() == code)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
