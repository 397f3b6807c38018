//! Binary decoder.

use std::io::Read;

use flate2::read::DeflateDecoder;
use vellum_foundation::{
    Bag, DataTable, Dictionary, Error, ExceptionInfo, Kind, List, ObjectData, ObjectFactory,
    ObjectProxy, Result, TimeSeries, Tuple, TypedArray, Variant, mask,
};

use crate::mode::{self, BinaryMode};
use crate::ticks;

/// The retired kind code between Double and Time; named in diagnostics.
const RETIRED_DATE_CODE: u32 = 0x400;

/// Decodes one variant from a stream.
///
/// `mode` supplies reader-side options (notably `CREATE_PROXY`); flags from
/// the document header are merged in. `factory` resolves object classes to
/// live instances; pass `None` to decode objects only as proxies.
pub fn decode<R: Read>(
    reader: &mut R,
    mode: BinaryMode,
    factory: Option<&ObjectFactory>,
) -> Result<Variant> {
    // Wire facts (compression, temporal layout) come from the header alone;
    // the caller contributes only reader-side options.
    let mode = read_header(reader)? | (mode & BinaryMode::CREATE_PROXY);
    if mode.contains(BinaryMode::COMPRESS) {
        let mut inflater = DeflateDecoder::new(reader);
        read_value(&mut inflater, mode, factory)
    } else {
        read_value(reader, mode, factory)
    }
}

/// Decodes one variant from a buffer.
pub fn from_bytes(
    bytes: &[u8],
    mode: BinaryMode,
    factory: Option<&ObjectFactory>,
) -> Result<Variant> {
    let mut cursor = bytes;
    decode(&mut cursor, mode, factory)
}

/// Consumes exactly one body record without materializing it.
///
/// The traversal mirrors the decode grammar, so unknown content after a
/// known prefix can be stepped over for forward-compatible partial reads.
pub fn skip_record<R: Read>(reader: &mut R, mode: BinaryMode) -> Result<()> {
    let kind = read_tag(reader)?;
    skip_payload(reader, mode, kind)
}

fn read_header<R: Read>(reader: &mut R) -> Result<BinaryMode> {
    let magic = read_u32(reader)?;
    if magic != mode::MAGIC {
        return Err(Error::format(format!("bad magic number {magic:#010x}")));
    }
    let version = read_u32(reader)?;
    let major = version >> 16;
    if major > mode::VERSION_MAJOR {
        return Err(Error::format(format!("unsupported format version {major}")));
    }
    let mode = BinaryMode::from_bits(read_u32(reader)?);
    if mode.contains(BinaryMode::ZLIB_HEADER) {
        return Err(Error::format("zlib-wrapped compression is not supported"));
    }
    Ok(mode)
}

fn read_tag<R: Read>(reader: &mut R) -> Result<Kind> {
    let code = read_u32(reader)?;
    if code == RETIRED_DATE_CODE {
        return Err(Error::format("retired Date kind on the wire"));
    }
    Kind::from_wire(code).ok_or_else(|| Error::format(format!("unknown kind tag {code:#x}")))
}

/// Reads one tagged record.
fn read_value<R: Read>(
    reader: &mut R,
    mode: BinaryMode,
    factory: Option<&ObjectFactory>,
) -> Result<Variant> {
    let kind = read_tag(reader)?;
    match kind {
        Kind::None => Ok(Variant::None),
        Kind::Any => Ok(Variant::Any(read_string(reader)?)),
        Kind::String => Ok(Variant::String(read_string(reader)?)),
        Kind::Boolean => Ok(Variant::Boolean(read_i32(reader)? != 0)),
        Kind::Int32 => Ok(Variant::Int32(read_i32(reader)?)),
        Kind::UInt32 => Ok(Variant::UInt32(read_u32(reader)?)),
        Kind::Int64 => Ok(Variant::Int64(read_i64(reader)?)),
        Kind::UInt64 => Ok(Variant::UInt64(read_u64(reader)?)),
        Kind::Float => Ok(Variant::Float(f32::from_le_bytes(read_array(reader)?))),
        Kind::Double => Ok(Variant::Double(f64::from_le_bytes(read_array(reader)?))),
        Kind::Time => {
            require_ticks(mode)?;
            Ok(Variant::Time(read_time_delta(reader)?))
        }
        Kind::DateTime => {
            require_ticks(mode)?;
            Ok(Variant::DateTime(ticks::date_time_from_millis(read_i64(
                reader,
            )?)?))
        }
        Kind::Buffer => {
            let len = read_len(reader)?;
            Ok(Variant::Buffer(read_padded(reader, len)?))
        }
        Kind::List => {
            let count = read_len(reader)?;
            let mut list = List::new();
            for _ in 0..count {
                list.push(read_value(reader, mode, factory)?);
            }
            Ok(Variant::List(list))
        }
        Kind::Tuple => {
            let count = read_len(reader)?;
            let mut slots = Vec::with_capacity(count);
            for _ in 0..count {
                slots.push(read_value(reader, mode, factory)?);
            }
            Ok(Variant::Tuple(slots.into_iter().collect::<Tuple>()))
        }
        Kind::Dictionary => {
            let count = read_len(reader)?;
            let mut dict = Dictionary::new();
            for _ in 0..count {
                let key = read_string(reader)?;
                dict.insert(key, read_value(reader, mode, factory)?);
            }
            Ok(Variant::Dictionary(dict))
        }
        Kind::Bag => {
            let count = read_len(reader)?;
            let mut bag = Bag::new();
            for _ in 0..count {
                let key = read_string(reader)?;
                bag.insert(key, read_value(reader, mode, factory)?);
            }
            Ok(Variant::Bag(bag))
        }
        Kind::TimeSeries => {
            require_ticks(mode)?;
            let count = read_len(reader)?;
            let mut series = TimeSeries::new();
            for _ in 0..count {
                let time = ticks::date_time_from_millis(read_i64(reader)?)?;
                series.push_at(time, read_value(reader, mode, factory)?);
            }
            Ok(Variant::TimeSeries(series))
        }
        Kind::Exception => {
            let class = read_string(reader)?;
            let message = read_string(reader)?;
            let source = read_string(reader)?;
            let stack = read_string(reader)?;
            Ok(Variant::Exception(ExceptionInfo {
                class,
                message,
                source,
                stack,
            }))
        }
        Kind::Object => {
            let class_name = read_string(reader)?;
            let version = read_i32(reader)?;
            let params = read_value(reader, mode, factory)?;
            read_object(mode, factory, class_name, version, params)
        }
        Kind::Array => {
            let count = read_len(reader)?;
            let element_kind = read_element_kind(reader)?;
            let mut array = TypedArray::new(element_kind)?;
            for _ in 0..count {
                array.push(read_scalar(reader, mode, element_kind)?)?;
            }
            Ok(Variant::Array(array))
        }
        Kind::DataTable => {
            let num_columns = read_len(reader)?;
            let num_rows = read_len(reader)?;
            let mut kinds = Vec::with_capacity(num_columns);
            for _ in 0..num_columns {
                kinds.push(read_element_kind(reader)?);
            }
            let mut names = Vec::with_capacity(num_columns);
            for _ in 0..num_columns {
                names.push(read_string(reader)?);
            }
            let mut columns = Vec::with_capacity(num_columns);
            for (name, kind) in names.into_iter().zip(kinds) {
                let mut cells = Vec::with_capacity(num_rows);
                for _ in 0..num_rows {
                    cells.push(read_scalar(reader, mode, kind)?);
                }
                columns.push((name, kind, cells));
            }
            Ok(Variant::DataTable(DataTable::from_columns(columns)?))
        }
    }
}

fn read_object(
    mode: BinaryMode,
    factory: Option<&ObjectFactory>,
    class_name: String,
    version: i32,
    params: Variant,
) -> Result<Variant> {
    if let Some(mut instance) = factory.and_then(|f| f.create(&class_name)) {
        instance.inflate(params, version)?;
        return Ok(Variant::Object(ObjectData::Typed(instance.into())));
    }
    if mode.contains(BinaryMode::CREATE_PROXY) {
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

/// Reads one untagged primitive payload of a known kind.
fn read_scalar<R: Read>(reader: &mut R, mode: BinaryMode, kind: Kind) -> Result<Variant> {
    match kind {
        Kind::Any => Ok(Variant::Any(read_string(reader)?)),
        Kind::String => Ok(Variant::String(read_string(reader)?)),
        Kind::Boolean => Ok(Variant::Boolean(read_i32(reader)? != 0)),
        Kind::Int32 => Ok(Variant::Int32(read_i32(reader)?)),
        Kind::UInt32 => Ok(Variant::UInt32(read_u32(reader)?)),
        Kind::Int64 => Ok(Variant::Int64(read_i64(reader)?)),
        Kind::UInt64 => Ok(Variant::UInt64(read_u64(reader)?)),
        Kind::Float => Ok(Variant::Float(f32::from_le_bytes(read_array(reader)?))),
        Kind::Double => Ok(Variant::Double(f64::from_le_bytes(read_array(reader)?))),
        Kind::Time => {
            require_ticks(mode)?;
            Ok(Variant::Time(read_time_delta(reader)?))
        }
        Kind::DateTime => {
            require_ticks(mode)?;
            Ok(Variant::DateTime(ticks::date_time_from_millis(read_i64(
                reader,
            )?)?))
        }
        _ => Err(Error::type_mismatch("read as scalar", kind)),
    }
}

/// Discards one payload of the given kind, mirroring [`read_value`].
fn skip_payload<R: Read>(reader: &mut R, mode: BinaryMode, kind: Kind) -> Result<()> {
    match kind {
        Kind::None => Ok(()),
        Kind::Any | Kind::String | Kind::Buffer => {
            let len = read_len(reader)?;
            skip_bytes(reader, padded_len(len))
        }
        Kind::Boolean | Kind::Int32 | Kind::UInt32 | Kind::Float => skip_bytes(reader, 4),
        Kind::Int64 | Kind::UInt64 | Kind::Double => skip_bytes(reader, 8),
        Kind::Time | Kind::DateTime => {
            require_ticks(mode)?;
            skip_bytes(reader, 8)
        }
        Kind::List | Kind::Tuple => {
            let count = read_len(reader)?;
            for _ in 0..count {
                skip_record(reader, mode)?;
            }
            Ok(())
        }
        Kind::Dictionary | Kind::Bag => {
            let count = read_len(reader)?;
            for _ in 0..count {
                let key_len = read_len(reader)?;
                skip_bytes(reader, padded_len(key_len))?;
                skip_record(reader, mode)?;
            }
            Ok(())
        }
        Kind::TimeSeries => {
            require_ticks(mode)?;
            let count = read_len(reader)?;
            for _ in 0..count {
                skip_bytes(reader, 8)?;
                skip_record(reader, mode)?;
            }
            Ok(())
        }
        Kind::Exception => {
            for _ in 0..4 {
                let len = read_len(reader)?;
                skip_bytes(reader, padded_len(len))?;
            }
            Ok(())
        }
        Kind::Object => {
            let class_len = read_len(reader)?;
            skip_bytes(reader, padded_len(class_len))?;
            skip_bytes(reader, 4)?;
            skip_record(reader, mode)
        }
        Kind::Array => {
            let count = read_len(reader)?;
            let element_kind = read_element_kind(reader)?;
            for _ in 0..count {
                skip_scalar(reader, mode, element_kind)?;
            }
            Ok(())
        }
        Kind::DataTable => {
            let num_columns = read_len(reader)?;
            let num_rows = read_len(reader)?;
            let mut kinds = Vec::with_capacity(num_columns);
            for _ in 0..num_columns {
                kinds.push(read_element_kind(reader)?);
            }
            for _ in 0..num_columns {
                let name_len = read_len(reader)?;
                skip_bytes(reader, padded_len(name_len))?;
            }
            for kind in kinds {
                for _ in 0..num_rows {
                    skip_scalar(reader, mode, kind)?;
                }
            }
            Ok(())
        }
    }
}

fn skip_scalar<R: Read>(reader: &mut R, mode: BinaryMode, kind: Kind) -> Result<()> {
    match kind {
        Kind::Any | Kind::String => {
            let len = read_len(reader)?;
            skip_bytes(reader, padded_len(len))
        }
        Kind::Boolean | Kind::Int32 | Kind::UInt32 | Kind::Float => skip_bytes(reader, 4),
        Kind::Int64 | Kind::UInt64 | Kind::Double => skip_bytes(reader, 8),
        Kind::Time | Kind::DateTime => {
            require_ticks(mode)?;
            skip_bytes(reader, 8)
        }
        _ => Err(Error::type_mismatch("read as scalar", kind)),
    }
}

fn require_ticks(mode: BinaryMode) -> Result<()> {
    if mode.contains(BinaryMode::DATETIME_AS_TICKS) {
        Ok(())
    } else {
        Err(Error::format(
            "legacy struct-packed temporal layout is not supported",
        ))
    }
}

fn read_element_kind<R: Read>(reader: &mut R) -> Result<Kind> {
    let kind = read_tag(reader)?;
    if !kind.is(mask::PRIMITIVE) || kind == Kind::Any {
        return Err(Error::format(format!("non-scalar element kind {kind}")));
    }
    Ok(kind)
}

fn read_len<R: Read>(reader: &mut R) -> Result<usize> {
    let len = read_i32(reader)?;
    usize::try_from(len).map_err(|_| Error::format(format!("negative length {len}")))
}

const fn padded_len(len: usize) -> usize {
    len + (4 - len % 4) % 4
}

fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_len(reader)?;
    let bytes = read_padded(reader, len)?;
    String::from_utf8(bytes).map_err(|_| Error::format("string payload is not UTF-8"))
}

fn read_padded<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    let residual = (4 - len % 4) % 4;
    let mut padding = [0u8; 3];
    reader.read_exact(&mut padding[..residual])?;
    Ok(bytes)
}

fn skip_bytes<R: Read>(reader: &mut R, count: usize) -> Result<()> {
    let copied = std::io::copy(&mut reader.take(count as u64), &mut std::io::sink())?;
    if copied != count as u64 {
        return Err(Error::from(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "record truncated",
        )));
    }
    Ok(())
}

fn read_array<R: Read, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    Ok(u32::from_le_bytes(read_array(reader)?))
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    Ok(i32::from_le_bytes(read_array(reader)?))
}

fn read_i64<R: Read>(reader: &mut R) -> Result<i64> {
    Ok(i64::from_le_bytes(read_array(reader)?))
}

fn read_time_delta<R: Read>(reader: &mut R) -> Result<chrono::TimeDelta> {
    let millis = read_i64(reader)?;
    chrono::TimeDelta::try_milliseconds(millis)
        .ok_or_else(|| Error::format(format!("time out of range: {millis} ms")))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    Ok(u64::from_le_bytes(read_array(reader)?))
}
