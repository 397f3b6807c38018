//! Round-trip tests for the binary codec
//!
//! Every kind goes out and comes back equal, plain and compressed, and the
//! proxy path re-encodes unknown objects byte-identically.

use std::any::Any;

use chrono::TimeDelta;
use proptest::prelude::*;
use vellum_binary::{BinaryMode, from_bytes, to_bytes};
use vellum_foundation::{
    Bag, DataTable, Dictionary, ExceptionInfo, Kind, List, ObjectData, ObjectFactory, Result,
    TimeSeries, Tuple, TypedArray, Variant, VariantObject, text,
};

#[derive(Debug, Default, PartialEq)]
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

/// A tree exercising every kind except Object.
fn rich_tree() -> Variant {
    let stamp = text::parse_date_time("2023-11-05T08:30:00.250").unwrap();

    let mut list = List::new();
    list.push(Variant::Int32(-1));
    list.push(Variant::String("two".to_string()));
    list.push(Variant::None);

    let mut tuple = Tuple::new(2);
    tuple.set(0, Variant::Boolean(true)).unwrap();
    tuple.set(1, Variant::Double(2.5)).unwrap();

    let mut bag = Bag::new();
    bag.insert("dup", Variant::Int32(1));
    bag.insert("dup", Variant::Int32(2));

    let mut series = TimeSeries::new();
    series.push_at(stamp, Variant::Float(1.25));

    let mut array = TypedArray::new(Kind::Int64).unwrap();
    array.push(Variant::Int64(7)).unwrap();
    array.push(Variant::Int64(-7)).unwrap();

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

    let mut root = Dictionary::new();
    root.insert("any", Variant::Any("3.14".to_string()));
    root.insert("bag", Variant::Bag(bag));
    root.insert("buffer", Variant::Buffer(vec![0, 1, 2, 3, 4]));
    root.insert(
        "exception",
        Variant::Exception(ExceptionInfo::new("IoError", "disk on fire")),
    );
    root.insert("list", Variant::List(list));
    root.insert("series", Variant::TimeSeries(series));
    root.insert("stamp", Variant::DateTime(stamp));
    root.insert("span", Variant::Time(TimeDelta::milliseconds(-5_400_123)));
    root.insert("table", Variant::DataTable(table));
    root.insert("tuple", Variant::Tuple(tuple));
    root.insert("unsigned", Variant::UInt64(u64::MAX));
    root.insert("vector", Variant::Array(array));
    Variant::Dictionary(root)
}

#[test]
fn rich_tree_round_trips_plain() {
    let tree = rich_tree();
    let bytes = to_bytes(&tree, BinaryMode::NONE).unwrap();
    let back = from_bytes(&bytes, BinaryMode::NONE, None).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn rich_tree_round_trips_compressed() {
    let tree = rich_tree();
    let bytes = to_bytes(&tree, BinaryMode::COMPRESS).unwrap();
    let back = from_bytes(&bytes, BinaryMode::NONE, None).unwrap();
    assert_eq!(back, tree);
}

#[test]
fn equal_trees_encode_identically() {
    // Dictionaries built in different insertion orders still serialize the
    // same because enumeration is canonical.
    let mut a = Dictionary::new();
    a.insert("x", Variant::Int32(1));
    a.insert("y", Variant::Int32(2));
    let mut b = Dictionary::new();
    b.insert("y", Variant::Int32(2));
    b.insert("x", Variant::Int32(1));
    let bytes_a = to_bytes(&Variant::Dictionary(a), BinaryMode::NONE).unwrap();
    let bytes_b = to_bytes(&Variant::Dictionary(b), BinaryMode::NONE).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn registered_objects_come_back_typed() {
    let gauge = Gauge {
        name: "boost".to_string(),
        reading: 0.4,
    };
    let bytes = to_bytes(&Variant::Object(ObjectData::typed(gauge)), BinaryMode::NONE).unwrap();

    let mut factory = ObjectFactory::new();
    factory.register::<Gauge>();
    let mut back = from_bytes(&bytes, BinaryMode::NONE, Some(&factory)).unwrap();
    let seen: &Gauge = back.as_object().unwrap();
    assert_eq!(seen.name, "boost");
    assert_eq!(seen.reading, 0.4);
}

#[test]
fn unknown_objects_proxy_and_reencode_byte_identically() {
    let gauge = Gauge {
        name: "boost".to_string(),
        reading: 0.4,
    };
    let bytes = to_bytes(&Variant::Object(ObjectData::typed(gauge)), BinaryMode::NONE).unwrap();

    // No factory: the class is unknown, so decoding proxies.
    let back = from_bytes(&bytes, BinaryMode::CREATE_PROXY, None).unwrap();
    let Variant::Object(data) = &back else {
        panic!("expected an object");
    };
    assert!(data.is_proxy());

    // The proxy re-encodes exactly what was read.
    let again = to_bytes(&back, BinaryMode::NONE).unwrap();
    assert_eq!(again, bytes);
}

#[test]
fn unknown_objects_without_proxying_fail() {
    let bytes = to_bytes(
        &Variant::Object(ObjectData::typed(Gauge::default())),
        BinaryMode::NONE,
    )
    .unwrap();
    assert!(from_bytes(&bytes, BinaryMode::NONE, None).is_err());
}

proptest! {
    #[test]
    fn primitives_round_trip(seed in prop_oneof![
        any::<bool>().prop_map(Variant::Boolean),
        any::<i32>().prop_map(Variant::Int32),
        any::<u32>().prop_map(Variant::UInt32),
        any::<i64>().prop_map(Variant::Int64),
        any::<u64>().prop_map(Variant::UInt64),
        any::<f32>().prop_map(Variant::Float),
        any::<f64>().prop_map(Variant::Double),
        ".*".prop_map(Variant::String),
        proptest::collection::vec(any::<u8>(), 0..64).prop_map(Variant::Buffer),
    ]) {
        let bytes = to_bytes(&seed, BinaryMode::NONE).unwrap();
        prop_assert_eq!(from_bytes(&bytes, BinaryMode::NONE, None).unwrap(), seed);
    }

    #[test]
    fn byte_runs_stay_word_aligned(content in ".*") {
        let bytes = to_bytes(&Variant::String(content), BinaryMode::NONE).unwrap();
        prop_assert_eq!(bytes.len() % 4, 0);
    }
}
