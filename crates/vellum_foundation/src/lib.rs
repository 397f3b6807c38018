//! Core value type, collections, and object protocol for Vellum.
//!
//! This crate provides:
//! - [`Variant`] - The self-describing dynamic value type
//! - [`Kind`] - Kind discriminants with wire codes and grouping masks
//! - Collection payloads ([`List`], [`Tuple`], [`Dictionary`], [`Bag`], [`TimeSeries`])
//! - [`VariantObject`] - The user-object extension protocol, with
//!   [`ObjectFactory`] and proxy fallback
//! - [`Error`] - Error taxonomy shared by the whole workspace
//! - [`text`] - The canonical text grammar for primitives

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod kind;
pub mod object;
pub mod table;
pub mod text;
pub mod value;

// Re-export main types for convenience
pub use collections::{Bag, Dictionary, List, TimeSeries, Tuple};
pub use error::{Error, ErrorKind, Result, Severity};
pub use kind::{Kind, mask};
pub use object::{ObjectData, ObjectFactory, ObjectProxy, VariantObject};
pub use table::{Column, DataTable, TypedArray};
pub use value::{ExceptionInfo, Item, Primitive, Variant};
