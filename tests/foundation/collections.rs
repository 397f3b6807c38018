//! Integration tests for collection kinds
//!
//! Tests value semantics, Tuple arity, Dictionary canonical order, Bag
//! multimap behavior, TimeSeries insertion order, and the tabular types.

use vellum_foundation::{
    Bag, DataTable, Dictionary, Kind, List, TimeSeries, Tuple, TypedArray, Variant, text,
};

// =============================================================================
// Value semantics
// =============================================================================

#[test]
fn clones_never_alias() {
    let mut list = List::new();
    list.push(Variant::Int32(1));
    let mut tree = Variant::List(list);
    let snapshot = tree.clone();
    tree.push(Variant::Int32(2)).unwrap();
    assert_eq!(tree.len().unwrap(), 2);
    assert_eq!(snapshot.len().unwrap(), 1);
}

#[test]
fn nested_mutation_is_invisible_through_old_handles() {
    let mut inner = Dictionary::new();
    inner.insert("n", Variant::Int32(1));
    let mut root = Dictionary::new();
    root.insert("inner", Variant::Dictionary(inner));
    let mut tree = Variant::Dictionary(root.clone());
    let snapshot = Variant::Dictionary(root);
    tree.insert("extra", Variant::None).unwrap();
    assert_eq!(tree.len().unwrap(), 2);
    assert_eq!(snapshot.len().unwrap(), 1);
}

// =============================================================================
// Sequences
// =============================================================================

#[test]
fn list_grows_and_indexes() {
    let mut list = Variant::List(List::new());
    list.push(Variant::Int32(10)).unwrap();
    list.push(Variant::Int32(20)).unwrap();
    assert_eq!(*list.at(1).unwrap(), Variant::Int32(20));
    list.set_at(0, Variant::Int32(11)).unwrap();
    assert_eq!(*list.at(0).unwrap(), Variant::Int32(11));
    assert!(list.at(2).is_err());
    assert!(list.set_at(2, Variant::None).is_err());
}

#[test]
fn tuple_arity_is_fixed() {
    let mut tuple = Variant::Tuple(Tuple::new(2));
    tuple.set_at(0, Variant::Boolean(true)).unwrap();
    tuple.set_at(1, Variant::Int32(9)).unwrap();
    assert!(tuple.set_at(2, Variant::None).is_err());
    // A list can push; a tuple cannot.
    assert!(tuple.push(Variant::None).is_err());
    tuple.clear().unwrap();
    assert_eq!(tuple.len().unwrap(), 2);
    assert_eq!(*tuple.at(0).unwrap(), Variant::None);
}

// =============================================================================
// Mappings
// =============================================================================

#[test]
fn dictionary_replaces_and_sorts() {
    let mut dict = Variant::Dictionary(Dictionary::new());
    dict.insert("zeta", Variant::Int32(1)).unwrap();
    dict.insert("alpha", Variant::Int32(2)).unwrap();
    dict.insert("zeta", Variant::Int32(3)).unwrap();
    assert_eq!(dict.len().unwrap(), 2);
    let keys: Vec<_> = dict
        .items()
        .unwrap()
        .filter_map(|item| item.key.map(str::to_string))
        .collect();
    assert_eq!(keys, ["alpha", "zeta"]);
    assert_eq!(*dict.get_key("zeta").unwrap(), Variant::Int32(3));
    assert!(dict.get_key("missing").is_err());
    dict.remove("alpha").unwrap();
    assert!(dict.remove("alpha").is_err());
}

#[test]
fn bag_keeps_duplicates_and_insertion_order() {
    let mut bag = Variant::Bag(Bag::new());
    bag.insert("k", Variant::Int32(1)).unwrap();
    bag.insert("j", Variant::Int32(2)).unwrap();
    bag.insert("k", Variant::Int32(3)).unwrap();
    assert_eq!(bag.len().unwrap(), 3);
    assert!(bag.contains_key("k").unwrap());

    let matches = bag.range("k").unwrap();
    let values: Vec<_> = matches.iter().cloned().collect();
    assert_eq!(values, [Variant::Int32(1), Variant::Int32(3)]);

    // First match wins for single-value lookup.
    assert_eq!(*bag.get_key("k").unwrap(), Variant::Int32(1));

    // Removal takes every match at once.
    bag.remove("k").unwrap();
    assert_eq!(bag.len().unwrap(), 1);
    assert!(bag.remove("k").is_err());
}

// =============================================================================
// TimeSeries
// =============================================================================

#[test]
fn time_series_is_a_log_not_an_index() {
    let late = text::parse_date_time("2020-02-01T00:00:00").unwrap();
    let early = text::parse_date_time("2020-01-01T00:00:00").unwrap();
    let mut series = Variant::TimeSeries(TimeSeries::new());
    series.push_at(late, Variant::Int32(1)).unwrap();
    series.push_at(early, Variant::Int32(2)).unwrap();
    series.push_at(early, Variant::Int32(3)).unwrap();
    let times: Vec<_> = series.items().unwrap().filter_map(|item| item.time).collect();
    assert_eq!(times, [late, early, early]);
}

// =============================================================================
// TypedArray and DataTable
// =============================================================================

#[test]
fn typed_array_is_homogeneous() {
    let mut array = TypedArray::new(Kind::Double).unwrap();
    array.push(Variant::Double(1.5)).unwrap();
    assert!(array.push(Variant::Float(1.5)).is_err());
    assert_eq!(array.element_kind(), Kind::Double);
    assert_eq!(*array.get(0).unwrap(), Variant::Double(1.5));
}

#[test]
fn data_table_checks_shape_and_kinds() {
    let mut table = DataTable::new([
        ("when".to_string(), Kind::DateTime),
        ("level".to_string(), Kind::Int32),
    ])
    .unwrap();
    let stamp = text::parse_date_time("2024-05-06T07:08:09").unwrap();
    table
        .push_row([Variant::DateTime(stamp), Variant::Int32(3)])
        .unwrap();
    assert_eq!(table.num_rows(), 1);
    assert_eq!(*table.cell(0, 0).unwrap(), Variant::DateTime(stamp));
    assert!(table.push_row([Variant::Int32(3)]).is_err());
    assert!(
        table
            .push_row([Variant::DateTime(stamp), Variant::Double(3.0)])
            .is_err()
    );
    assert!(DataTable::new([("bad".to_string(), Kind::List)]).is_err());
}
