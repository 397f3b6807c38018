//! XML wire format for Vellum variants.
//!
//! Two document shapes share one writer:
//! - **Tagged mode** round-trips any variant: every element carries a
//!   `variant` attribute naming its kind, so the reader rebuilds the exact
//!   value.
//! - **Preserve mode** maps a Mapping tree onto idiomatic XML through
//!   reserved keys (`__attributes__`, `__text__`, ...). It discards kind
//!   information and is therefore encode-only.
//!
//! This crate provides:
//! - [`encode`] / [`decode`] - Stream one variant as a document
//! - [`to_string`] / [`from_str`] - String conveniences
//! - [`XmlMode`], [`WriteOptions`], [`ReadOptions`] - Document shape options
//! - [`Schema`] - Declared-type oracle for decoding untyped documents

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod mode;
pub mod reader;
pub mod schema;
pub mod writer;

pub use mode::XmlMode;
pub use reader::{ReadOptions, decode, from_str};
pub use schema::{Schema, ValidationIssue, builtin_kind, kind_for_type};
pub use writer::{WriteOptions, encode, to_string};
