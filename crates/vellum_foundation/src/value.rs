//! The [`Variant`] value type.
//!
//! A `Variant` is a closed sum over every kind the wire formats understand.
//! Its kind is fixed at construction; coercion produces a new variant rather
//! than mutating the old one. Equality, ordering, and hashing are total and
//! mutually consistent, so variants can key maps and sort deterministically
//! even across kinds.

use std::cmp::Ordering;
use std::fmt;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta, Timelike};

use crate::collections::{Bag, Dictionary, List, TimeSeries, Tuple};
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::object::{ObjectData, VariantObject};
use crate::table::{DataTable, TypedArray};
use crate::text;

/// A captured exception, serializable on both wire formats.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExceptionInfo {
    /// Exception type name.
    pub class: String,
    /// Human-readable message.
    pub message: String,
    /// Originating component, empty when unknown.
    pub source: String,
    /// Captured stack text, empty when unknown.
    pub stack: String,
}

impl ExceptionInfo {
    /// Creates an exception record with no source or stack.
    #[must_use]
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
            source: String::new(),
            stack: String::new(),
        }
    }

    /// Captures any Rust error, using its type name as the class.
    #[must_use]
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        Self::new(std::any::type_name::<E>(), error.to_string())
    }
}

/// A self-describing dynamic value.
#[derive(Clone, Debug)]
pub enum Variant {
    /// No value.
    None,
    /// Unparsed text in the canonical grammar.
    Any(String),
    /// UTF-8 string.
    String(String),
    /// Boolean.
    Boolean(bool),
    /// 32-bit signed integer.
    Int32(i32),
    /// 32-bit unsigned integer.
    UInt32(u32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit unsigned integer.
    UInt64(u64),
    /// 32-bit floating point.
    Float(f32),
    /// 64-bit floating point.
    Double(f64),
    /// Duration with millisecond resolution.
    Time(TimeDelta),
    /// Calendar date and time, millisecond resolution.
    DateTime(NaiveDateTime),
    /// Ordered sequence.
    List(List),
    /// Fixed-arity sequence.
    Tuple(Tuple),
    /// Unique-key mapping in canonical order.
    Dictionary(Dictionary),
    /// Insertion-ordered multimap.
    Bag(Bag),
    /// (time, value) observations in insertion order.
    TimeSeries(TimeSeries),
    /// Raw bytes.
    Buffer(Vec<u8>),
    /// Captured exception.
    Exception(ExceptionInfo),
    /// User-defined object or proxy.
    Object(ObjectData),
    /// Homogeneous primitive vector.
    Array(TypedArray),
    /// Named, kind-typed columns.
    DataTable(DataTable),
}

/// A Rust type that maps onto exactly one primitive kind.
///
/// `from_text` is the exact inverse of `to_text`, so a value that passes
/// through `Any` comes back unchanged.
pub trait Primitive: Sized {
    /// The kind this type projects from.
    const KIND: Kind;

    /// Extracts the value when the variant holds exactly this kind.
    fn from_variant(variant: &Variant) -> Option<Self>;

    /// Wraps the value in a variant of this kind.
    fn to_variant(self) -> Variant;

    /// Canonical text form.
    fn to_text(&self) -> String;

    /// Parses the canonical text form.
    fn from_text(input: &str) -> Result<Self>;
}

macro_rules! integer_primitive {
    ($type:ty, $kind:ident) => {
        impl Primitive for $type {
            const KIND: Kind = Kind::$kind;

            fn from_variant(variant: &Variant) -> Option<Self> {
                match variant {
                    Variant::$kind(value) => Some(*value),
                    _ => None,
                }
            }

            fn to_variant(self) -> Variant {
                Variant::$kind(self)
            }

            fn to_text(&self) -> String {
                self.to_string()
            }

            fn from_text(input: &str) -> Result<Self> {
                text::parse_integer(input)
            }
        }
    };
}

integer_primitive!(i32, Int32);
integer_primitive!(u32, UInt32);
integer_primitive!(i64, Int64);
integer_primitive!(u64, UInt64);

impl Primitive for bool {
    const KIND: Kind = Kind::Boolean;

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    fn to_variant(self) -> Variant {
        Variant::Boolean(self)
    }

    fn to_text(&self) -> String {
        text::format_boolean(*self)
    }

    fn from_text(input: &str) -> Result<Self> {
        text::parse_boolean(input)
    }
}

impl Primitive for f32 {
    const KIND: Kind = Kind::Float;

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn to_variant(self) -> Variant {
        Variant::Float(self)
    }

    fn to_text(&self) -> String {
        text::format_float(*self)
    }

    fn from_text(input: &str) -> Result<Self> {
        text::parse_float(input)
    }
}

impl Primitive for f64 {
    const KIND: Kind = Kind::Double;

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Double(value) => Some(*value),
            _ => None,
        }
    }

    fn to_variant(self) -> Variant {
        Variant::Double(self)
    }

    fn to_text(&self) -> String {
        text::format_double(*self)
    }

    fn from_text(input: &str) -> Result<Self> {
        text::parse_double(input)
    }
}

impl Primitive for String {
    const KIND: Kind = Kind::String;

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::String(value) => Some(value.clone()),
            _ => None,
        }
    }

    fn to_variant(self) -> Variant {
        Variant::String(self)
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_text(input: &str) -> Result<Self> {
        Ok(input.to_string())
    }
}

impl Primitive for TimeDelta {
    const KIND: Kind = Kind::Time;

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::Time(value) => Some(*value),
            _ => None,
        }
    }

    fn to_variant(self) -> Variant {
        Variant::Time(self)
    }

    fn to_text(&self) -> String {
        text::format_time(*self)
    }

    fn from_text(input: &str) -> Result<Self> {
        text::parse_time(input)
    }
}

impl Primitive for NaiveDateTime {
    const KIND: Kind = Kind::DateTime;

    fn from_variant(variant: &Variant) -> Option<Self> {
        match variant {
            Variant::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    fn to_variant(self) -> Variant {
        Variant::DateTime(self)
    }

    fn to_text(&self) -> String {
        text::format_date_time(*self)
    }

    fn from_text(input: &str) -> Result<Self> {
        text::parse_date_time(input)
    }
}

/// One element of a collection, as yielded by [`Variant::items`].
#[derive(Debug)]
pub struct Item<'a> {
    /// The key, for Mapping elements.
    pub key: Option<&'a str>,
    /// The observation time, for TimeSeries elements.
    pub time: Option<NaiveDateTime>,
    /// The element value.
    pub value: &'a Variant,
}

impl Variant {
    /// The kind of this variant.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::None => Kind::None,
            Self::Any(_) => Kind::Any,
            Self::String(_) => Kind::String,
            Self::Boolean(_) => Kind::Boolean,
            Self::Int32(_) => Kind::Int32,
            Self::UInt32(_) => Kind::UInt32,
            Self::Int64(_) => Kind::Int64,
            Self::UInt64(_) => Kind::UInt64,
            Self::Float(_) => Kind::Float,
            Self::Double(_) => Kind::Double,
            Self::Time(_) => Kind::Time,
            Self::DateTime(_) => Kind::DateTime,
            Self::List(_) => Kind::List,
            Self::Tuple(_) => Kind::Tuple,
            Self::Dictionary(_) => Kind::Dictionary,
            Self::Bag(_) => Kind::Bag,
            Self::TimeSeries(_) => Kind::TimeSeries,
            Self::Buffer(_) => Kind::Buffer,
            Self::Exception(_) => Kind::Exception,
            Self::Object(_) => Kind::Object,
            Self::Array(_) => Kind::Array,
            Self::DataTable(_) => Kind::DataTable,
        }
    }

    /// True if this variant's kind is included in `mask`.
    #[must_use]
    pub fn is(&self, mask: u32) -> bool {
        self.kind().is(mask)
    }

    /// Typed projection onto a primitive Rust type.
    ///
    /// Valid for the exactly matching kind, and for `Any` (the stored text is
    /// parsed with the canonical grammar).
    pub fn get<T: Primitive>(&self) -> Result<T> {
        if let Self::Any(stored) = self {
            return T::from_text(stored);
        }
        T::from_variant(self).ok_or_else(|| Error::type_mismatch("project", self.kind()))
    }

    /// The canonical text form of any primitive, wrapped as `Any`.
    ///
    /// Identity on `Any`; non-primitives fail with `TypeMismatch`.
    pub fn any_cast(&self) -> Result<Self> {
        let canonical = match self {
            Self::Any(stored) => stored.clone(),
            Self::String(value) => value.clone(),
            Self::Boolean(value) => value.to_text(),
            Self::Int32(value) => value.to_text(),
            Self::UInt32(value) => value.to_text(),
            Self::Int64(value) => value.to_text(),
            Self::UInt64(value) => value.to_text(),
            Self::Float(value) => value.to_text(),
            Self::Double(value) => value.to_text(),
            Self::Time(value) => value.to_text(),
            Self::DateTime(value) => value.to_text(),
            _ => return Err(Error::type_mismatch("cast to text", self.kind())),
        };
        Ok(Self::Any(canonical))
    }

    /// Number of elements, entries, bytes, or cells.
    pub fn len(&self) -> Result<usize> {
        match self {
            Self::List(list) => Ok(list.len()),
            Self::Tuple(tuple) => Ok(tuple.len()),
            Self::Dictionary(dict) => Ok(dict.len()),
            Self::Bag(bag) => Ok(bag.len()),
            Self::TimeSeries(series) => Ok(series.len()),
            Self::Buffer(bytes) => Ok(bytes.len()),
            Self::Array(array) => Ok(array.len()),
            _ => Err(Error::type_mismatch("measure", self.kind())),
        }
    }

    /// True if [`len`](Self::len) is zero.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Empties a collection, buffer, or array. A Tuple keeps its arity with
    /// every slot reset to `None`.
    pub fn clear(&mut self) -> Result<()> {
        match self {
            Self::List(list) => list.clear(),
            Self::Tuple(tuple) => tuple.clear(),
            Self::Dictionary(dict) => dict.clear(),
            Self::Bag(bag) => bag.clear(),
            Self::TimeSeries(series) => series.clear(),
            Self::Buffer(bytes) => bytes.clear(),
            Self::Array(array) => array.clear(),
            _ => return Err(Error::type_mismatch("clear", self.kind())),
        }
        Ok(())
    }

    /// Appends to a List.
    pub fn push(&mut self, value: Self) -> Result<()> {
        match self {
            Self::List(list) => {
                list.push(value);
                Ok(())
            }
            _ => Err(Error::type_mismatch("push onto", self.kind())),
        }
    }

    /// Inserts into a Mapping: a Dictionary replaces, a Bag appends.
    pub fn insert(&mut self, key: impl Into<String>, value: Self) -> Result<()> {
        match self {
            Self::Dictionary(dict) => {
                dict.insert(key, value);
                Ok(())
            }
            Self::Bag(bag) => {
                bag.insert(key, value);
                Ok(())
            }
            _ => Err(Error::type_mismatch("insert into", self.kind())),
        }
    }

    /// Removes from a Mapping: every match in a Bag, the single entry in a
    /// Dictionary. Absent keys fail with `MissingKey`.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        match self {
            Self::Dictionary(dict) => dict.remove(key).map(|_| ()),
            Self::Bag(bag) => bag.remove(key),
            _ => Err(Error::type_mismatch("remove from", self.kind())),
        }
    }

    /// Appends an observation to a TimeSeries.
    pub fn push_at(&mut self, time: NaiveDateTime, value: Self) -> Result<()> {
        match self {
            Self::TimeSeries(series) => {
                series.push_at(time, value);
                Ok(())
            }
            _ => Err(Error::type_mismatch("append observation to", self.kind())),
        }
    }

    /// The Sequence element at `index`.
    pub fn at(&self, index: usize) -> Result<&Self> {
        match self {
            Self::List(list) => list
                .get(index)
                .ok_or_else(|| Error::index_out_of_range(index, list.len())),
            Self::Tuple(tuple) => tuple.get(index),
            _ => Err(Error::type_mismatch("index", self.kind())),
        }
    }

    /// Replaces the Sequence element at `index`.
    pub fn set_at(&mut self, index: usize, value: Self) -> Result<()> {
        match self {
            Self::List(list) => list.set(index, value),
            Self::Tuple(tuple) => tuple.set(index, value),
            _ => Err(Error::type_mismatch("index", self.kind())),
        }
    }

    /// True if a Mapping has at least one entry for `key`.
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        match self {
            Self::Dictionary(dict) => Ok(dict.contains_key(key)),
            Self::Bag(bag) => Ok(bag.contains_key(key)),
            _ => Err(Error::type_mismatch("look up key in", self.kind())),
        }
    }

    /// The Mapping entry for `key` (a Bag's first match); `MissingKey` when
    /// absent.
    pub fn get_key(&self, key: &str) -> Result<&Self> {
        let found = match self {
            Self::Dictionary(dict) => dict.get(key),
            Self::Bag(bag) => bag.get(key),
            _ => return Err(Error::type_mismatch("look up key in", self.kind())),
        };
        found.ok_or_else(|| Error::missing_key(key))
    }

    /// Every Mapping entry for `key` as a List: all of a Bag's matches in
    /// insertion order, at most one for a Dictionary, empty when absent.
    pub fn range(&self, key: &str) -> Result<List> {
        match self {
            Self::Dictionary(dict) => Ok(dict.get(key).cloned().into_iter().collect()),
            Self::Bag(bag) => Ok(bag.range(key).cloned().collect()),
            _ => Err(Error::type_mismatch("look up key in", self.kind())),
        }
    }

    /// Lazy iteration over any collection kind.
    ///
    /// Mapping elements carry their key, TimeSeries elements their time.
    pub fn items(&self) -> Result<Box<dyn Iterator<Item = Item<'_>> + '_>> {
        match self {
            Self::List(list) => Ok(Box::new(list.iter().map(|value| Item {
                key: None,
                time: None,
                value,
            }))),
            Self::Tuple(tuple) => Ok(Box::new(tuple.iter().map(|value| Item {
                key: None,
                time: None,
                value,
            }))),
            Self::Dictionary(dict) => Ok(Box::new(dict.iter().map(|(key, value)| Item {
                key: Some(key.as_str()),
                time: None,
                value,
            }))),
            Self::Bag(bag) => Ok(Box::new(bag.iter().map(|(key, value)| Item {
                key: Some(key.as_str()),
                time: None,
                value,
            }))),
            Self::TimeSeries(series) => Ok(Box::new(series.iter().map(|(time, value)| Item {
                key: None,
                time: Some(time),
                value,
            }))),
            _ => Err(Error::type_mismatch("iterate", self.kind())),
        }
    }

    /// Downcasts an Object payload to a concrete type.
    ///
    /// A proxy whose class name matches `T` is inflated into a real `T` and
    /// replaced in place, so later calls hit the typed instance directly.
    pub fn as_object<T>(&mut self) -> Result<&T>
    where
        T: VariantObject + Default + 'static,
    {
        let Self::Object(data) = self else {
            return Err(Error::type_mismatch("downcast", self.kind()));
        };
        if let ObjectData::Proxy(proxy) = data {
            let mut instance = T::default();
            if proxy.class_name != instance.class_name() {
                return Err(Error::type_mismatch(
                    format!(
                        "downcast to class {:?} a proxy for class {:?}, held by",
                        instance.class_name(),
                        proxy.class_name
                    ),
                    Kind::Object,
                ));
            }
            instance.inflate((*proxy.params).clone(), proxy.version)?;
            *data = ObjectData::Typed(Arc::new(instance));
        }
        match data {
            ObjectData::Typed(instance) => {
                instance.as_any().downcast_ref::<T>().ok_or_else(|| {
                    Error::type_mismatch(
                        format!(
                            "downcast to class {:?} an object of class {:?}, held by",
                            T::default().class_name(),
                            instance.class_name()
                        ),
                        Kind::Object,
                    )
                })
            }
            ObjectData::Proxy(_) => Err(Error::format("proxy upgrade failed".to_string())),
        }
    }

    /// Total order across all variants.
    ///
    /// Different kinds order by kind ordinal and never compare equal. Floats
    /// use their total bit order, so NaN is equal to itself and the order
    /// stays antisymmetric.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let by_kind = self.kind().ordinal().cmp(&other.kind().ordinal());
        if by_kind != Ordering::Equal {
            return by_kind;
        }
        match (self, other) {
            (Self::None, Self::None) => Ordering::Equal,
            (Self::Any(a), Self::Any(b)) | (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Int32(a), Self::Int32(b)) => a.cmp(b),
            (Self::UInt32(a), Self::UInt32(b)) => a.cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::UInt64(a), Self::UInt64(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Double(a), Self::Double(b)) => a.total_cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::DateTime(a), Self::DateTime(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => a.cmp(b),
            (Self::Tuple(a), Self::Tuple(b)) => a.cmp(b),
            (Self::Dictionary(a), Self::Dictionary(b)) => a.cmp(b),
            (Self::Bag(a), Self::Bag(b)) => a.cmp(b),
            (Self::TimeSeries(a), Self::TimeSeries(b)) => a.cmp(b),
            (Self::Buffer(a), Self::Buffer(b)) => a.cmp(b),
            (Self::Exception(a), Self::Exception(b)) => a.cmp(b),
            (Self::Object(a), Self::Object(b)) => (a.class_name(), a.version(), a.deflate())
                .cmp(&(b.class_name(), b.version(), b.deflate())),
            (Self::Array(a), Self::Array(b)) => a.cmp(b),
            (Self::DataTable(a), Self::DataTable(b)) => a.cmp(b),
            _ => by_kind,
        }
    }

    /// One-line diagnostic description, with counts for collections.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::None => "None".to_string(),
            Self::Any(stored) => format!("Any({stored:?})"),
            Self::String(value) => format!("String({value:?})"),
            Self::Boolean(value) => format!("Boolean({value})"),
            Self::Int32(value) => format!("Int32({value})"),
            Self::UInt32(value) => format!("UInt32({value})"),
            Self::Int64(value) => format!("Int64({value})"),
            Self::UInt64(value) => format!("UInt64({value})"),
            Self::Float(value) => format!("Float({})", text::format_float(*value)),
            Self::Double(value) => format!("Double({})", text::format_double(*value)),
            Self::Time(value) => format!("Time({})", text::format_time(*value)),
            Self::DateTime(value) => format!("DateTime({})", text::format_date_time(*value)),
            Self::List(list) => format!("List({} items)", list.len()),
            Self::Tuple(tuple) => format!("Tuple({} slots)", tuple.len()),
            Self::Dictionary(dict) => format!("Dictionary({} entries)", dict.len()),
            Self::Bag(bag) => format!("Bag({} entries)", bag.len()),
            Self::TimeSeries(series) => format!("TimeSeries({} observations)", series.len()),
            Self::Buffer(bytes) => format!("Buffer({} bytes)", bytes.len()),
            Self::Exception(info) => format!("Exception({}: {})", info.class, info.message),
            Self::Object(data) => format!("Object({} v{})", data.class_name(), data.version()),
            Self::Array(array) => {
                format!("Array({} x {})", array.len(), array.element_kind())
            }
            Self::DataTable(table) => format!(
                "DataTable({} cols x {} rows)",
                table.num_columns(),
                table.num_rows()
            ),
        }
    }

    /// Indented recursive dump for diagnostics. Never used by the codecs.
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        match self {
            Self::List(_) | Self::Tuple(_) | Self::Dictionary(_) | Self::Bag(_)
            | Self::TimeSeries(_) => {
                let _ = writeln!(out, "{pad}{}", self.summary());
                if let Ok(items) = self.items() {
                    for item in items {
                        if let Some(key) = item.key {
                            let _ = writeln!(out, "{pad}  [{key}]");
                        } else if let Some(time) = item.time {
                            let _ = writeln!(out, "{pad}  [{}]", text::format_date_time(time));
                        }
                        item.value.pretty_into(out, depth + 1);
                    }
                }
            }
            Self::Object(data) => {
                let _ = writeln!(out, "{pad}{}", self.summary());
                data.deflate().pretty_into(out, depth + 1);
            }
            _ => {
                let _ = writeln!(out, "{pad}{}", self.summary());
            }
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Variant {}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Variant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().code().hash(state);
        match self {
            Self::None => {}
            Self::Any(stored) => stored.hash(state),
            Self::String(value) => value.hash(state),
            Self::Boolean(value) => value.hash(state),
            Self::Int32(value) => value.hash(state),
            Self::UInt32(value) => value.hash(state),
            Self::Int64(value) => value.hash(state),
            Self::UInt64(value) => value.hash(state),
            // Bit hashing matches total_cmp equality.
            Self::Float(value) => value.to_bits().hash(state),
            Self::Double(value) => value.to_bits().hash(state),
            Self::Time(value) => {
                value.num_seconds().hash(state);
                value.subsec_nanos().hash(state);
            }
            Self::DateTime(value) => {
                value.and_utc().timestamp().hash(state);
                value.nanosecond().hash(state);
            }
            Self::List(list) => list.hash(state),
            Self::Tuple(tuple) => tuple.hash(state),
            Self::Dictionary(dict) => dict.hash(state),
            Self::Bag(bag) => bag.hash(state),
            Self::TimeSeries(series) => series.hash(state),
            Self::Buffer(bytes) => bytes.hash(state),
            Self::Exception(info) => info.hash(state),
            Self::Object(data) => {
                data.class_name().hash(state);
                data.version().hash(state);
                data.deflate().hash(state);
            }
            Self::Array(array) => array.hash(state),
            Self::DataTable(table) => table.hash(state),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::None
    }
}

// Convenience From implementations

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Variant {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<u32> for Variant {
    fn from(value: u32) -> Self {
        Self::UInt32(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<u64> for Variant {
    fn from(value: u64) -> Self {
        Self::UInt64(value)
    }
}

impl From<f32> for Variant {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for Variant {
    fn from(value: Vec<u8>) -> Self {
        Self::Buffer(value)
    }
}

impl From<TimeDelta> for Variant {
    fn from(value: TimeDelta) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for Variant {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<List> for Variant {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Tuple> for Variant {
    fn from(value: Tuple) -> Self {
        Self::Tuple(value)
    }
}

impl From<Dictionary> for Variant {
    fn from(value: Dictionary) -> Self {
        Self::Dictionary(value)
    }
}

impl From<Bag> for Variant {
    fn from(value: Bag) -> Self {
        Self::Bag(value)
    }
}

impl From<TimeSeries> for Variant {
    fn from(value: TimeSeries) -> Self {
        Self::TimeSeries(value)
    }
}

impl From<ExceptionInfo> for Variant {
    fn from(value: ExceptionInfo) -> Self {
        Self::Exception(value)
    }
}
