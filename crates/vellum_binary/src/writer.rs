//! Binary encoder.

use std::io::Write;

use flate2::Compression;
use flate2::write::DeflateEncoder;
use vellum_foundation::{Error, Kind, Result, Variant};

use crate::mode::{self, BinaryMode};
use crate::ticks;

/// Encodes one variant onto a stream: header, then one record, optionally
/// DEFLATE-compressed.
///
/// The `DATETIME_AS_TICKS` flag is always set in the written header.
/// `ZLIB_HEADER` is rejected; only raw DEFLATE is produced.
pub fn encode<W: Write>(writer: &mut W, value: &Variant, mode: BinaryMode) -> Result<()> {
    if mode.contains(BinaryMode::ZLIB_HEADER) {
        return Err(Error::unsupported("zlib-wrapped compression"));
    }
    let mode = mode | BinaryMode::DATETIME_AS_TICKS;
    write_u32(writer, mode::MAGIC)?;
    write_u32(writer, mode::version_word())?;
    write_u32(writer, mode.bits())?;
    if mode.contains(BinaryMode::COMPRESS) {
        // Dropping the encoder on the error path discards its buffer; the
        // stream is only finished when every record byte is in.
        let mut encoder = DeflateEncoder::new(writer, Compression::default());
        write_value(&mut encoder, value)?;
        encoder.finish()?;
        Ok(())
    } else {
        write_value(writer, value)
    }
}

/// Encodes one variant into a fresh buffer.
pub fn to_bytes(value: &Variant, mode: BinaryMode) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    encode(&mut buffer, value, mode)?;
    Ok(buffer)
}

/// Writes one tagged record.
fn write_value<W: Write>(writer: &mut W, value: &Variant) -> Result<()> {
    write_u32(writer, value.kind().code())?;
    match value {
        Variant::None => Ok(()),
        Variant::Any(text) | Variant::String(text) => write_string(writer, text),
        Variant::Boolean(flag) => write_i32(writer, i32::from(*flag)),
        Variant::Int32(n) => write_i32(writer, *n),
        Variant::UInt32(n) => write_u32(writer, *n),
        Variant::Int64(n) => write_i64(writer, *n),
        Variant::UInt64(n) => write_all(writer, &n.to_le_bytes()),
        Variant::Float(x) => write_all(writer, &x.to_le_bytes()),
        Variant::Double(x) => write_all(writer, &x.to_le_bytes()),
        Variant::Time(delta) => write_i64(writer, delta.num_milliseconds()),
        Variant::DateTime(stamp) => write_i64(writer, ticks::date_time_to_millis(*stamp)),
        Variant::Buffer(bytes) => {
            write_i32(writer, wire_len(bytes.len())?)?;
            write_padded(writer, bytes)
        }
        Variant::List(_) | Variant::Tuple(_) => {
            write_i32(writer, wire_len(value.len()?)?)?;
            for item in value.items()? {
                write_value(writer, item.value)?;
            }
            Ok(())
        }
        Variant::Dictionary(_) | Variant::Bag(_) => {
            write_i32(writer, wire_len(value.len()?)?)?;
            for item in value.items()? {
                write_string(writer, item.key.unwrap_or_default())?;
                write_value(writer, item.value)?;
            }
            Ok(())
        }
        Variant::TimeSeries(series) => {
            write_i32(writer, wire_len(series.len())?)?;
            for (time, observed) in series.iter() {
                write_i64(writer, ticks::date_time_to_millis(time))?;
                write_value(writer, observed)?;
            }
            Ok(())
        }
        Variant::Exception(info) => {
            write_string(writer, &info.class)?;
            write_string(writer, &info.message)?;
            write_string(writer, &info.source)?;
            write_string(writer, &info.stack)
        }
        Variant::Object(data) => {
            write_string(writer, data.class_name())?;
            write_i32(writer, data.version())?;
            write_value(writer, &data.deflate())
        }
        Variant::Array(array) => {
            write_i32(writer, wire_len(array.len())?)?;
            write_u32(writer, array.element_kind().code())?;
            for item in array.iter() {
                write_scalar(writer, item)?;
            }
            Ok(())
        }
        Variant::DataTable(table) => {
            write_i32(writer, wire_len(table.num_columns())?)?;
            write_i32(writer, wire_len(table.num_rows())?)?;
            for column in table.columns() {
                write_u32(writer, column.kind.code())?;
            }
            for column in table.columns() {
                write_string(writer, &column.name)?;
            }
            for column in table.columns() {
                for cell in column.cells() {
                    if matches!(cell, Variant::None) {
                        return Err(Error::unsupported(format!(
                            "empty cell in table column {:?}",
                            column.name
                        )));
                    }
                    write_scalar(writer, cell)?;
                }
            }
            Ok(())
        }
    }
}

/// Writes an untagged primitive payload, as Array and DataTable elements are
/// stored.
fn write_scalar<W: Write>(writer: &mut W, value: &Variant) -> Result<()> {
    match value {
        Variant::Any(text) | Variant::String(text) => write_string(writer, text),
        Variant::Boolean(flag) => write_i32(writer, i32::from(*flag)),
        Variant::Int32(n) => write_i32(writer, *n),
        Variant::UInt32(n) => write_u32(writer, *n),
        Variant::Int64(n) => write_i64(writer, *n),
        Variant::UInt64(n) => write_all(writer, &n.to_le_bytes()),
        Variant::Float(x) => write_all(writer, &x.to_le_bytes()),
        Variant::Double(x) => write_all(writer, &x.to_le_bytes()),
        Variant::Time(delta) => write_i64(writer, delta.num_milliseconds()),
        Variant::DateTime(stamp) => write_i64(writer, ticks::date_time_to_millis(*stamp)),
        _ => Err(Error::type_mismatch("write as scalar", value.kind())),
    }
}

/// Writes a length-prefixed string, zero-padded to a four-byte boundary.
fn write_string<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    write_i32(writer, wire_len(text.len())?)?;
    write_padded(writer, text.as_bytes())
}

/// Writes a byte run followed by its zero padding.
fn write_padded<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    write_all(writer, bytes)?;
    let residual = (4 - bytes.len() % 4) % 4;
    write_all(writer, &[0u8; 3][..residual])
}

fn wire_len(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::format(format!("length {len} exceeds wire limit")))
}

fn write_all<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    writer.write_all(bytes)?;
    Ok(())
}

fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    write_all(writer, &value.to_le_bytes())
}

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    write_all(writer, &value.to_le_bytes())
}

fn write_i64<W: Write>(writer: &mut W, value: i64) -> Result<()> {
    write_all(writer, &value.to_le_bytes())
}
