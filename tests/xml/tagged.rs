//! Tagged-mode round trips and preserve-mode behavior

use std::any::Any;

use chrono::TimeDelta;
use vellum_foundation::{
    Bag, DataTable, Dictionary, ExceptionInfo, Kind, List, ObjectData, ObjectFactory, Result,
    TimeSeries, Tuple, TypedArray, Variant, VariantObject, text,
};
use vellum_xml::{ReadOptions, WriteOptions, XmlMode, from_str, to_string};

fn tagged() -> WriteOptions {
    WriteOptions {
        mode: XmlMode::NO_HEADER,
        root_name: None,
    }
}

fn round_trip(value: &Variant) -> Variant {
    let document = to_string(value, &tagged()).unwrap();
    from_str(&document, XmlMode::NONE, &ReadOptions::default())
        .unwrap_or_else(|err| panic!("failed to re-read {document}: {err}"))
}

#[derive(Debug, Default)]
struct Gauge {
    name: String,
    reading: f64,
}

impl VariantObject for Gauge {
    fn class_name(&self) -> &str {
        "Gauge"
    }

    fn version(&self) -> i32 {
        1
    }

    fn deflate(&self) -> Variant {
        let mut params = Dictionary::new();
        params.insert("name", Variant::String(self.name.clone()));
        params.insert("reading", Variant::Double(self.reading));
        Variant::Dictionary(params)
    }

    fn inflate(&mut self, params: Variant, _version: i32) -> Result<()> {
        self.name = params.get_key("name")?.get::<String>()?;
        self.reading = params.get_key("reading")?.get::<f64>()?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn primitives_round_trip() {
    for value in [
        Variant::None,
        Variant::Boolean(false),
        Variant::Int32(-42),
        Variant::UInt32(42),
        Variant::Int64(i64::MIN),
        Variant::UInt64(u64::MAX),
        Variant::Double(-0.125),
        Variant::String("with <angle> & amp".to_string()),
        Variant::Any("unparsed".to_string()),
        Variant::Time(TimeDelta::milliseconds(90_061_500)),
        Variant::Buffer(vec![0, 255, 17]),
    ] {
        assert_eq!(round_trip(&value), value);
    }
}

#[test]
fn float_sentinels_round_trip() {
    assert_eq!(round_trip(&Variant::Double(f64::INFINITY)), Variant::Double(f64::INFINITY));
    let back = round_trip(&Variant::Float(f32::NAN));
    assert_eq!(back.kind(), Kind::Float);
    assert!(back.get::<f32>().unwrap().is_nan());
}

#[test]
fn collections_round_trip() {
    let stamp = text::parse_date_time("2022-07-08T09:10:11").unwrap();

    let mut list = List::new();
    list.push(Variant::Int32(1));
    list.push(Variant::None);
    assert_eq!(round_trip(&Variant::List(list.clone())), Variant::List(list));

    let mut tuple = Tuple::new(2);
    tuple.set(1, Variant::String("slot".to_string())).unwrap();
    assert_eq!(round_trip(&Variant::Tuple(tuple.clone())), Variant::Tuple(tuple));

    let mut dict = Dictionary::new();
    dict.insert("k", Variant::Double(2.5));
    assert_eq!(
        round_trip(&Variant::Dictionary(dict.clone())),
        Variant::Dictionary(dict)
    );

    let mut bag = Bag::new();
    bag.insert("k", Variant::Int32(1));
    bag.insert("j", Variant::Int32(2));
    bag.insert("k", Variant::Int32(3));
    assert_eq!(round_trip(&Variant::Bag(bag.clone())), Variant::Bag(bag));

    let mut series = TimeSeries::new();
    series.push_at(stamp, Variant::Int32(7));
    assert_eq!(
        round_trip(&Variant::TimeSeries(series.clone())),
        Variant::TimeSeries(series)
    );
}

#[test]
fn arrays_and_tables_round_trip() {
    let mut array = TypedArray::new(Kind::Double).unwrap();
    array.push(Variant::Double(0.5)).unwrap();
    array.push(Variant::Double(-0.5)).unwrap();
    assert_eq!(round_trip(&Variant::Array(array.clone())), Variant::Array(array));

    let mut table = DataTable::new([
        ("id".to_string(), Kind::Int32),
        ("label".to_string(), Kind::String),
    ])
    .unwrap();
    table
        .push_row([Variant::Int32(1), Variant::String("a".to_string())])
        .unwrap();
    table
        .push_row([Variant::Int32(2), Variant::String("b".to_string())])
        .unwrap();
    assert_eq!(
        round_trip(&Variant::DataTable(table.clone())),
        Variant::DataTable(table)
    );
}

#[test]
fn exceptions_round_trip_with_optional_fields() {
    let bare = ExceptionInfo::new("Timeout", "gave up");
    assert_eq!(
        round_trip(&Variant::Exception(bare.clone())),
        Variant::Exception(bare)
    );

    let full = ExceptionInfo {
        class: "Timeout".to_string(),
        message: "gave up".to_string(),
        source: "poller".to_string(),
        stack: "frame a\nframe b".to_string(),
    };
    assert_eq!(
        round_trip(&Variant::Exception(full.clone())),
        Variant::Exception(full)
    );
}

#[test]
fn objects_resolve_through_the_factory() {
    let gauge = Gauge {
        name: "boost".to_string(),
        reading: 2.25,
    };
    let document = to_string(&Variant::Object(ObjectData::typed(gauge)), &tagged()).unwrap();

    let mut factory = ObjectFactory::new();
    factory.register::<Gauge>();
    let options = ReadOptions {
        factory: Some(&factory),
        create_proxy: false,
        schema: None,
    };
    let mut back = from_str(&document, XmlMode::NONE, &options).unwrap();
    let seen: &Gauge = back.as_object().unwrap();
    assert_eq!(seen.name, "boost");
    assert_eq!(seen.reading, 2.25);
}

#[test]
fn objects_proxy_when_unregistered() {
    let gauge = Gauge {
        name: "boost".to_string(),
        reading: 2.25,
    };
    let source = Variant::Object(ObjectData::typed(gauge));
    let document = to_string(&source, &tagged()).unwrap();

    let options = ReadOptions {
        factory: None,
        create_proxy: true,
        schema: None,
    };
    let back = from_str(&document, XmlMode::NONE, &options).unwrap();
    assert_eq!(back, source);

    // Without proxying the class is an error.
    assert!(from_str(&document, XmlMode::NONE, &ReadOptions::default()).is_err());
}

#[test]
fn indentation_does_not_change_the_value() {
    let mut dict = Dictionary::new();
    dict.insert("a", Variant::Int32(1));
    dict.insert("b", Variant::String("two".to_string()));
    let value = Variant::Dictionary(dict);
    let options = WriteOptions {
        mode: XmlMode::INDENT,
        root_name: Some("payload".to_string()),
    };
    let document = to_string(&value, &options).unwrap();
    assert!(document.contains('\n'));
    assert_eq!(
        from_str(&document, XmlMode::NONE, &ReadOptions::default()).unwrap(),
        value
    );
}

// =============================================================================
// Preserve mode
// =============================================================================

#[test]
fn preserve_mode_is_encode_only() {
    let mut root = Dictionary::new();
    root.insert("setting", Variant::Int32(5));
    let mut doc = Dictionary::new();
    doc.insert("config", Variant::Dictionary(root));
    let value = Variant::Dictionary(doc);

    let options = WriteOptions {
        mode: XmlMode::PRESERVE | XmlMode::NO_HEADER,
        root_name: None,
    };
    let document = to_string(&value, &options).unwrap();
    assert_eq!(document, "<config><setting>5</setting></config>");

    let err = from_str(&document, XmlMode::PRESERVE, &ReadOptions::default()).unwrap_err();
    assert!(format!("{err}").contains("unsupported"));
}

#[test]
fn preserve_mode_emits_comments_and_instructions() {
    let mut instruction = Dictionary::new();
    instruction.insert("__target__", Variant::String("xml-stylesheet".to_string()));
    instruction.insert("__data__", Variant::String("href=\"a.xsl\"".to_string()));
    let mut doc = Dictionary::new();
    doc.insert("__comment__", Variant::String("generated".to_string()));
    doc.insert("__instruction__", Variant::Dictionary(instruction));
    doc.insert("root", Variant::String("x".to_string()));
    let options = WriteOptions {
        mode: XmlMode::PRESERVE | XmlMode::NO_HEADER,
        root_name: None,
    };
    let document = to_string(&Variant::Dictionary(doc), &options).unwrap();
    assert!(document.contains("<!--generated-->"));
    assert!(document.contains("<?xml-stylesheet href=\"a.xsl\"?>"));
    assert!(document.contains("<root>x</root>"));
}
