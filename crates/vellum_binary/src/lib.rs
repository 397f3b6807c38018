//! Binary wire format for Vellum variants.
//!
//! A document is a 12-byte header (magic, version, mode flags) followed by
//! one recursive `(tag, payload)` record. All integers are little-endian and
//! variable-length byte runs are zero-padded to four-byte boundaries, so two
//! encoders given equal variants produce identical bytes. The body may be
//! raw-DEFLATE compressed.
//!
//! This crate provides:
//! - [`encode`] / [`decode`] - Stream the wire form of one variant
//! - [`to_bytes`] / [`from_bytes`] - Buffer conveniences
//! - [`skip_record`] - Consume one record without materializing it
//! - [`BinaryMode`] - Header mode flags

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod mode;
pub mod reader;
pub mod writer;

mod ticks;

pub use mode::BinaryMode;
pub use reader::{decode, from_bytes, skip_record};
pub use writer::{encode, to_bytes};
