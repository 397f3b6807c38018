//! Integration tests for the error taxonomy
//!
//! Tests that operations fail with the documented error kinds and that
//! messages carry enough context to act on.

use vellum_foundation::{Error, ErrorKind, Kind, List, Severity, Tuple, Variant};

#[test]
fn type_mismatch_names_the_operation_and_kind() {
    let err = Variant::Int32(1).push(Variant::None).unwrap_err();
    let ErrorKind::TypeMismatch { operation, actual } = err.kind else {
        panic!("expected a type mismatch");
    };
    assert_eq!(operation, "push onto");
    assert_eq!(actual, Kind::Int32);
}

#[test]
fn index_errors_carry_index_and_size() {
    let tuple = Variant::Tuple(Tuple::new(2));
    let err = tuple.at(5).unwrap_err();
    let ErrorKind::IndexOutOfRange { index, size } = err.kind else {
        panic!("expected an index error");
    };
    assert_eq!(index, 5);
    assert_eq!(size, 2);
}

#[test]
fn missing_key_names_the_key() {
    let mut dict = Variant::Dictionary(vellum_foundation::Dictionary::new());
    let err = dict.remove("absent").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingKey(ref key) if key == "absent"));
    assert!(format!("{err}").contains("absent"));
}

#[test]
fn format_errors_from_malformed_text() {
    let err = Variant::Any("not a number".to_string())
        .get::<i32>()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Format(_)));
}

#[test]
fn validation_errors_carry_severity() {
    let warning = Error::validation(Severity::Warning, "loose attribute");
    let fatal = Error::validation(Severity::Error, "missing element");
    assert!(format!("{warning}").contains("warning"));
    assert!(format!("{fatal}").contains("error"));
}

#[test]
fn errors_expose_messages_through_display() {
    let err = Variant::List(List::new()).get_key("x").unwrap_err();
    let message = format!("{err}");
    assert!(message.contains("List"));
    assert!(message.contains("look up key"));
}
