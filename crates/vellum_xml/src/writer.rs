//! XML encoder: tagged mode and preserve mode.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use vellum_foundation::{Error, Result, Variant, mask, text};

use crate::mode::{self, XmlMode};

/// Encoder options.
#[derive(Debug, Default)]
pub struct WriteOptions {
    /// Document shape flags.
    pub mode: XmlMode,
    /// Root element name in tagged mode; `Variant` when not set. Preserve
    /// mode takes the root name from the Mapping's single key instead.
    pub root_name: Option<String>,
}

/// Encodes one variant as an XML document onto a stream.
pub fn encode<W: Write>(sink: &mut W, value: &Variant, options: &WriteOptions) -> Result<()> {
    let mut writer = if options.mode.contains(XmlMode::INDENT) {
        Writer::new_with_indent(sink, b' ', 2)
    } else {
        Writer::new(sink)
    };
    if !options.mode.contains(XmlMode::NO_HEADER) {
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;
    }
    if options.mode.contains(XmlMode::PRESERVE) {
        write_preserve_document(&mut writer, value)
    } else {
        let root = options.root_name.as_deref().unwrap_or(mode::DEFAULT_ELEMENT);
        write_tagged(&mut writer, root, value, None)
    }
}

/// Encodes one variant into a fresh string.
pub fn to_string(value: &Variant, options: &WriteOptions) -> Result<String> {
    let mut buffer = Vec::new();
    encode(&mut buffer, value, options)?;
    String::from_utf8(buffer).map_err(|_| Error::format("encoder produced non-UTF-8 output"))
}

/// Writes one element in tagged form: a `variant` attribute naming the kind,
/// children recursing.
fn write_tagged<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &Variant,
    time: Option<NaiveDateTime>,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    start.push_attribute((mode::ATTR_VARIANT, value.kind().name()));
    if let Some(time) = time {
        start.push_attribute((mode::ATTR_TIME, text::format_date_time(time).as_str()));
    }
    match value {
        Variant::None => {
            emit(writer, Event::Empty(start))?;
            return Ok(());
        }
        Variant::Tuple(tuple) => {
            start.push_attribute((mode::ATTR_SIZE, tuple.len().to_string().as_str()));
        }
        Variant::Array(array) => {
            start.push_attribute((mode::ATTR_SIZE, array.len().to_string().as_str()));
            start.push_attribute((mode::ATTR_ELEMENT_TYPE, array.element_kind().name()));
        }
        Variant::Object(data) => {
            start.push_attribute((mode::ATTR_CLASS, data.class_name()));
            start.push_attribute((mode::ATTR_VERSION, data.version().to_string().as_str()));
        }
        Variant::DataTable(table) => {
            start.push_attribute((mode::ATTR_ROWS, table.num_rows().to_string().as_str()));
            start.push_attribute((mode::ATTR_COLUMNS, table.num_columns().to_string().as_str()));
        }
        _ => {}
    }
    emit(writer, Event::Start(start))?;
    if value.is(mask::PRIMITIVE) {
        let content = primitive_text(value)?;
        if !content.is_empty() {
            emit(writer, Event::Text(BytesText::new(&content)))?;
        }
    } else {
        match value {
            Variant::Buffer(bytes) => {
                let encoded = BASE64.encode(bytes);
                if !encoded.is_empty() {
                    emit(writer, Event::Text(BytesText::new(&encoded)))?;
                }
            }
            Variant::List(_) | Variant::Tuple(_) => {
                for item in value.items()? {
                    write_tagged(writer, mode::DEFAULT_ELEMENT, item.value, None)?;
                }
            }
            Variant::Dictionary(_) | Variant::Bag(_) => {
                for item in value.items()? {
                    write_tagged(writer, item.key.unwrap_or_default(), item.value, None)?;
                }
            }
            Variant::TimeSeries(series) => {
                for (observed_at, observed) in series.iter() {
                    write_tagged(writer, mode::DEFAULT_ELEMENT, observed, Some(observed_at))?;
                }
            }
            Variant::Exception(info) => {
                write_text_element(writer, "type", &info.class)?;
                write_text_element(writer, "message", &info.message)?;
                if !info.source.is_empty() {
                    write_text_element(writer, "source", &info.source)?;
                }
                if !info.stack.is_empty() {
                    write_text_element(writer, "stack", &info.stack)?;
                }
            }
            Variant::Object(data) => {
                write_tagged(writer, mode::ELEMENT_PARAMS, &data.deflate(), None)?;
            }
            Variant::Array(array) => {
                for item in array.iter() {
                    write_text_element(writer, mode::DEFAULT_ELEMENT, &primitive_text(item)?)?;
                }
            }
            Variant::DataTable(table) => {
                for column in table.columns() {
                    let mut decl = BytesStart::new(mode::ELEMENT_COLUMN);
                    decl.push_attribute((mode::ATTR_NAME, column.name.as_str()));
                    decl.push_attribute((mode::ATTR_TYPE, column.kind.name()));
                    emit(writer, Event::Start(decl))?;
                    for cell in column.cells() {
                        if matches!(cell, Variant::None) {
                            return Err(Error::unsupported(format!(
                                "empty cell in table column {:?}",
                                column.name
                            )));
                        }
                        write_text_element(writer, mode::DEFAULT_ELEMENT, &primitive_text(cell)?)?;
                    }
                    emit(writer, Event::End(BytesEnd::new(mode::ELEMENT_COLUMN)))?;
                }
            }
            _ => return Err(Error::type_mismatch("encode as element", value.kind())),
        }
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// Maps a Mapping tree onto idiomatic XML through the reserved keys.
fn write_preserve_document<W: Write>(writer: &mut Writer<W>, value: &Variant) -> Result<()> {
    if !value.is(mask::MAPPING) {
        return Err(Error::type_mismatch("encode as document", value.kind()));
    }
    let mut root_written = false;
    for item in value.items()? {
        match item.key.unwrap_or_default() {
            mode::KEY_COMMENT => write_comment(writer, item.value)?,
            mode::KEY_INSTRUCTION => write_instruction(writer, item.value)?,
            key => {
                if root_written {
                    return Err(Error::format("document must have exactly one root element"));
                }
                root_written = true;
                write_preserve_element(writer, key, item.value)?;
            }
        }
    }
    if root_written {
        Ok(())
    } else {
        Err(Error::format("document must have exactly one root element"))
    }
}

fn write_preserve_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &Variant,
) -> Result<()> {
    if matches!(value, Variant::None) {
        emit(writer, Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    if value.is(mask::PRIMITIVE) {
        let content = primitive_text(value)?;
        emit(writer, Event::Start(BytesStart::new(name)))?;
        if !content.is_empty() {
            emit(writer, Event::Text(BytesText::new(&content)))?;
        }
        emit(writer, Event::End(BytesEnd::new(name)))?;
        return Ok(());
    }
    if !value.is(mask::MAPPING) {
        return Err(Error::type_mismatch("encode as element content", value.kind()));
    }
    let mut start = BytesStart::new(name);
    if let Ok(declared) = value.get_key(mode::KEY_ATTRIBUTES) {
        let mut pairs = Vec::new();
        for attribute in declared.items()? {
            pairs.push((
                attribute.key.unwrap_or_default().to_string(),
                primitive_text(attribute.value)?,
            ));
        }
        for (key, text) in &pairs {
            start.push_attribute((key.as_str(), text.as_str()));
        }
    }
    emit(writer, Event::Start(start))?;
    for item in value.items()? {
        match item.key.unwrap_or_default() {
            mode::KEY_ATTRIBUTES => {}
            mode::KEY_TEXT => {
                let content = primitive_text(item.value)?;
                emit(writer, Event::Text(BytesText::new(&content)))?;
            }
            mode::KEY_COMMENT => write_comment(writer, item.value)?,
            mode::KEY_INSTRUCTION => write_instruction(writer, item.value)?,
            key => write_preserve_element(writer, key, item.value)?,
        }
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn write_comment<W: Write>(writer: &mut Writer<W>, value: &Variant) -> Result<()> {
    let content = primitive_text(value)?;
    emit(writer, Event::Comment(BytesText::new(&content)))
}

fn write_instruction<W: Write>(writer: &mut Writer<W>, value: &Variant) -> Result<()> {
    let target = primitive_text(value.get_key(mode::KEY_TARGET)?)?;
    let data = primitive_text(value.get_key(mode::KEY_DATA)?)?;
    let content = format!("{target} {data}");
    emit(writer, Event::PI(BytesPI::new(&content)))
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, content: &str) -> Result<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    if !content.is_empty() {
        emit(writer, Event::Text(BytesText::new(content)))?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// The canonical text of a primitive value.
fn primitive_text(value: &Variant) -> Result<String> {
    match value.any_cast()? {
        Variant::Any(content) => Ok(content),
        other => Err(Error::type_mismatch("cast to text", other.kind())),
    }
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|error| Error::format(format!("xml write failed: {error}")))
}
