//! XML decoder for tagged documents.
//!
//! The decoder is event-driven: a stack of open elements accumulates text,
//! attributes, and built children, and each closing tag folds its element
//! into a variant. Untyped elements (no `variant` attribute and no schema
//! declaration) become `Any` when they hold only text, and a Bag when they
//! hold attributes or children.

use std::io::BufRead;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use quick_xml::events::{BytesStart, Event};
use vellum_foundation::{
    Bag, DataTable, Dictionary, Error, ExceptionInfo, Kind, List, ObjectData, ObjectFactory,
    ObjectProxy, Result, TimeSeries, Tuple, TypedArray, Variant, mask, text,
};

use crate::mode::{self, XmlMode};
use crate::schema::{Schema, kind_for_type};

/// Decoder options.
#[derive(Default)]
pub struct ReadOptions<'a> {
    /// Resolves object classes to live instances.
    pub factory: Option<&'a ObjectFactory>,
    /// Decode unregistered object classes as proxies instead of failing.
    pub create_proxy: bool,
    /// Supplies declared types and validation for untyped documents.
    pub schema: Option<&'a dyn Schema>,
}

/// One open element and everything accumulated inside it so far.
struct ElementInfo {
    name: String,
    kind: Kind,
    typed: bool,
    text: String,
    attributes: Vec<(String, Variant)>,
    children: Vec<Child>,
    size: Option<usize>,
    element_kind: Option<Kind>,
    class: Option<String>,
    version: Option<i32>,
    time: Option<NaiveDateTime>,
}

struct Child {
    name: String,
    time: Option<NaiveDateTime>,
    value: Variant,
}

/// Decodes one variant from an XML document on a stream.
///
/// Preserve-mode documents do not carry kind information and cannot be
/// decoded; passing `PRESERVE` fails fast.
pub fn decode<R: BufRead>(source: R, xml_mode: XmlMode, options: &ReadOptions<'_>) -> Result<Variant> {
    if xml_mode.contains(XmlMode::PRESERVE) {
        return Err(Error::unsupported("preserve-mode documents cannot be decoded"));
    }
    let mut reader = quick_xml::Reader::from_reader(source);
    let mut buffer = Vec::new();
    let mut stack: Vec<ElementInfo> = Vec::new();
    let mut document: Option<Variant> = None;
    loop {
        let event = reader
            .read_event_into(&mut buffer)
            .map_err(|error| Error::format(format!("xml parse failed: {error}")))?;
        match event {
            Event::Eof => break,
            Event::Start(start) => {
                if document.is_some() && stack.is_empty() {
                    return Err(Error::format("trailing content after the root element"));
                }
                let info = open_element(&start, options)?;
                stack.push(info);
            }
            Event::Empty(start) => {
                if document.is_some() && stack.is_empty() {
                    return Err(Error::format("trailing content after the root element"));
                }
                let info = open_element(&start, options)?;
                close_element(info, &mut stack, &mut document, options)?;
            }
            Event::End(_) => match stack.pop() {
                Some(info) => close_element(info, &mut stack, &mut document, options)?,
                None => return Err(Error::format("unbalanced closing tag")),
            },
            Event::Text(content) => {
                let content = content
                    .unescape()
                    .map_err(|error| Error::format(format!("xml parse failed: {error}")))?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(&content),
                    None if content.trim().is_empty() => {}
                    None => return Err(Error::format("text outside the root element")),
                }
            }
            Event::CData(content) => {
                let content = std::str::from_utf8(content.as_ref())
                    .map_err(|_| Error::format("CDATA payload is not UTF-8"))?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(content),
                    None => return Err(Error::format("text outside the root element")),
                }
            }
            // Structure-free nodes carry no variant content in tagged mode.
            _ => {}
        }
        buffer.clear();
    }
    if stack.is_empty() {
        document.ok_or_else(|| Error::format("document has no root element"))
    } else {
        Err(Error::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "document truncated inside an element",
        )))
    }
}

/// Decodes one variant from a string.
pub fn from_str(document: &str, xml_mode: XmlMode, options: &ReadOptions<'_>) -> Result<Variant> {
    decode(document.as_bytes(), xml_mode, options)
}

fn open_element(start: &BytesStart<'_>, options: &ReadOptions<'_>) -> Result<ElementInfo> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|_| Error::format("element name is not UTF-8"))?
        .to_string();
    let mut info = ElementInfo {
        name,
        kind: Kind::Any,
        typed: false,
        text: String::new(),
        attributes: Vec::new(),
        children: Vec::new(),
        size: None,
        element_kind: None,
        class: None,
        version: None,
        time: None,
    };
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|error| Error::format(format!("xml parse failed: {error}")))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|_| Error::format("attribute name is not UTF-8"))?;
        let value = attribute
            .unescape_value()
            .map_err(|error| Error::format(format!("xml parse failed: {error}")))?;
        match key {
            mode::ATTR_VARIANT => {
                info.kind = Kind::from_name(&value)
                    .ok_or_else(|| Error::format(format!("unknown kind name {value:?}")))?;
                info.typed = true;
            }
            mode::ATTR_SIZE => {
                info.size = Some(text::parse_integer::<usize>(&value)?);
            }
            mode::ATTR_ELEMENT_TYPE => {
                let kind = Kind::from_name(&value)
                    .ok_or_else(|| Error::format(format!("unknown kind name {value:?}")))?;
                info.element_kind = Some(kind);
            }
            mode::ATTR_CLASS => info.class = Some(value.into_owned()),
            mode::ATTR_VERSION => info.version = Some(text::parse_integer::<i32>(&value)?),
            mode::ATTR_TIME => info.time = Some(text::parse_date_time(&value)?),
            // Row and column counts restate what the columns already say.
            mode::ATTR_ROWS | mode::ATTR_COLUMNS => {}
            _ => {
                let declared = options
                    .schema
                    .and_then(|schema| schema.attribute_type(&info.name, key));
                let typed = match declared {
                    Some(type_name) => {
                        let kind = options
                            .schema
                            .map_or(Kind::Any, |schema| kind_for_type(schema, &type_name));
                        scalar_from_text(kind, &value)?
                    }
                    None => Variant::Any(value.into_owned()),
                };
                info.attributes.push((key.to_string(), typed));
            }
        }
    }
    if !info.typed {
        if let Some(schema) = options.schema {
            if let Some(declared) = schema.element_type(&info.name) {
                let inferred = kind_for_type(schema, &declared);
                if inferred != Kind::Any {
                    info.kind = inferred;
                    info.typed = true;
                }
            }
        }
    }
    Ok(info)
}

fn close_element(
    info: ElementInfo,
    stack: &mut Vec<ElementInfo>,
    document: &mut Option<Variant>,
    options: &ReadOptions<'_>,
) -> Result<()> {
    if let Some(schema) = options.schema {
        if let Some(issue) = schema
            .validate_element(&info.name, &info.text)
            .into_iter()
            .next()
        {
            return Err(Error::validation(issue.severity, issue.message));
        }
    }
    let value = build_value(&info, options)?;
    match stack.last_mut() {
        Some(parent) => parent.children.push(Child {
            name: info.name,
            time: info.time,
            value,
        }),
        None => *document = Some(value),
    }
    Ok(())
}

fn build_value(info: &ElementInfo, options: &ReadOptions<'_>) -> Result<Variant> {
    if !info.typed {
        if info.children.is_empty() && info.attributes.is_empty() {
            return Ok(Variant::Any(info.text.clone()));
        }
        require_no_text(info)?;
        let mut bag = Bag::new();
        for (key, value) in &info.attributes {
            bag.insert(key.clone(), value.clone());
        }
        for child in &info.children {
            bag.insert(child.name.clone(), child.value.clone());
        }
        return Ok(Variant::Bag(bag));
    }
    match info.kind {
        Kind::Any => Ok(Variant::Any(info.text.clone())),
        Kind::String => Ok(Variant::String(info.text.clone())),
        kind if kind.is(mask::PRIMITIVE) => scalar_from_text(kind, info.text.trim()),
        Kind::None => {
            require_no_text(info)?;
            Ok(Variant::None)
        }
        Kind::Buffer => {
            let bytes = BASE64
                .decode(info.text.trim())
                .map_err(|_| Error::format("buffer payload is not base64"))?;
            Ok(Variant::Buffer(bytes))
        }
        Kind::List => {
            require_no_text(info)?;
            Ok(Variant::List(
                info.children.iter().map(|c| c.value.clone()).collect::<List>(),
            ))
        }
        Kind::Tuple => {
            require_no_text(info)?;
            let size = info
                .size
                .ok_or_else(|| Error::format("tuple element without a size attribute"))?;
            if info.children.len() != size {
                return Err(Error::format(format!(
                    "tuple holds {} elements, size says {size}",
                    info.children.len()
                )));
            }
            Ok(Variant::Tuple(
                info.children.iter().map(|c| c.value.clone()).collect::<Tuple>(),
            ))
        }
        Kind::Dictionary => {
            require_no_text(info)?;
            let mut dict = Dictionary::new();
            for child in &info.children {
                dict.insert(child.name.clone(), child.value.clone());
            }
            Ok(Variant::Dictionary(dict))
        }
        Kind::Bag => {
            require_no_text(info)?;
            let mut bag = Bag::new();
            for child in &info.children {
                bag.insert(child.name.clone(), child.value.clone());
            }
            Ok(Variant::Bag(bag))
        }
        Kind::TimeSeries => {
            require_no_text(info)?;
            let mut series = TimeSeries::new();
            for child in &info.children {
                let time = child.time.ok_or_else(|| {
                    Error::format("time series element without a time attribute")
                })?;
                series.push_at(time, child.value.clone());
            }
            Ok(Variant::TimeSeries(series))
        }
        Kind::Exception => {
            require_no_text(info)?;
            let field = |name: &str| -> Result<Option<String>> {
                info.children
                    .iter()
                    .find(|c| c.name == name)
                    .map(|c| c.value.get::<String>())
                    .transpose()
            };
            let class = field("type")?
                .ok_or_else(|| Error::format("exception element without a type"))?;
            let message = field("message")?
                .ok_or_else(|| Error::format("exception element without a message"))?;
            Ok(Variant::Exception(ExceptionInfo {
                class,
                message,
                source: field("source")?.unwrap_or_default(),
                stack: field("stack")?.unwrap_or_default(),
            }))
        }
        Kind::Object => {
            require_no_text(info)?;
            let class_name = info
                .class
                .clone()
                .ok_or_else(|| Error::format("object element without a class attribute"))?;
            let version = info
                .version
                .ok_or_else(|| Error::format("object element without a version attribute"))?;
            let params = info
                .children
                .iter()
                .find(|c| c.name == mode::ELEMENT_PARAMS)
                .map(|c| c.value.clone())
                .ok_or_else(|| Error::format("object element without params"))?;
            build_object(options, class_name, version, params)
        }
        Kind::Array => {
            require_no_text(info)?;
            let element_kind = info.element_kind.ok_or_else(|| {
                Error::format("array element without an elementType attribute")
            })?;
            if let Some(size) = info.size {
                if size != info.children.len() {
                    return Err(Error::format(format!(
                        "array holds {} elements, size says {size}",
                        info.children.len()
                    )));
                }
            }
            let mut array = TypedArray::new(element_kind)?;
            for child in &info.children {
                array.push(coerce_scalar(&child.value, element_kind)?)?;
            }
            Ok(Variant::Array(array))
        }
        Kind::DataTable => {
            require_no_text(info)?;
            let mut columns = Vec::with_capacity(info.children.len());
            for child in &info.children {
                if child.name != mode::ELEMENT_COLUMN {
                    return Err(Error::format(format!(
                        "unexpected table child element {:?}",
                        child.name
                    )));
                }
                columns.push(read_column(&child.value)?);
            }
            Ok(Variant::DataTable(DataTable::from_columns(columns)?))
        }
        kind => Err(Error::type_mismatch("decode as element", kind)),
    }
}

/// Rebuilds one column from the Bag a `Column` element folds into.
fn read_column(value: &Variant) -> Result<(String, Kind, Vec<Variant>)> {
    let name = value
        .get_key(mode::ATTR_NAME)
        .map_err(|_| Error::format("table column without a name attribute"))?
        .get::<String>()?;
    let type_name = value
        .get_key(mode::ATTR_TYPE)
        .map_err(|_| Error::format("table column without a type attribute"))?
        .get::<String>()?;
    let kind = Kind::from_name(&type_name)
        .ok_or_else(|| Error::format(format!("unknown kind name {type_name:?}")))?;
    let mut cells = Vec::new();
    for cell in value.range(mode::DEFAULT_ELEMENT)?.iter() {
        cells.push(coerce_scalar(cell, kind)?);
    }
    Ok((name, kind, cells))
}

fn build_object(
    options: &ReadOptions<'_>,
    class_name: String,
    version: i32,
    params: Variant,
) -> Result<Variant> {
    if let Some(mut instance) = options.factory.and_then(|f| f.create(&class_name)) {
        instance.inflate(params, version)?;
        return Ok(Variant::Object(ObjectData::Typed(instance.into())));
    }
    if options.create_proxy {
        return Ok(Variant::Object(ObjectData::Proxy(ObjectProxy {
            class_name,
            version,
            params: Box::new(params),
        })));
    }
    Err(Error::format(format!(
        "unregistered object class {class_name:?}"
    )))
}

/// Accepts an already-correct scalar, or parses untagged text to `kind`.
fn coerce_scalar(value: &Variant, kind: Kind) -> Result<Variant> {
    if value.kind() == kind {
        return Ok(value.clone());
    }
    match value {
        Variant::Any(content) => scalar_from_text(kind, content.trim()),
        other => Err(Error::type_mismatch("read as scalar", other.kind())),
    }
}

/// Parses canonical text into one primitive kind.
fn scalar_from_text(kind: Kind, content: &str) -> Result<Variant> {
    match kind {
        Kind::Any => Ok(Variant::Any(content.to_string())),
        Kind::String => Ok(Variant::String(content.to_string())),
        Kind::Boolean => Ok(Variant::Boolean(text::parse_boolean(content)?)),
        Kind::Int32 => Ok(Variant::Int32(text::parse_integer(content)?)),
        Kind::UInt32 => Ok(Variant::UInt32(text::parse_integer(content)?)),
        Kind::Int64 => Ok(Variant::Int64(text::parse_integer(content)?)),
        Kind::UInt64 => Ok(Variant::UInt64(text::parse_integer(content)?)),
        Kind::Float => Ok(Variant::Float(text::parse_float(content)?)),
        Kind::Double => Ok(Variant::Double(text::parse_double(content)?)),
        Kind::Time => Ok(Variant::Time(text::parse_time(content)?)),
        Kind::DateTime => Ok(Variant::DateTime(text::parse_date_time(content)?)),
        Kind::Buffer => Ok(Variant::Buffer(
            BASE64
                .decode(content)
                .map_err(|_| Error::format("buffer payload is not base64"))?,
        )),
        _ => Err(Error::type_mismatch("read as scalar", kind)),
    }
}

fn require_no_text(info: &ElementInfo) -> Result<()> {
    if info.text.trim().is_empty() {
        Ok(())
    } else {
        Err(Error::format(format!(
            "unexpected text in element {:?}",
            info.name
        )))
    }
}
