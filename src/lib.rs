//! Vellum - Self-describing variant values with interoperable wire formats
//!
//! This crate re-exports all layers of the Vellum system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: vellum_binary     — Byte-exact binary codec
//!          vellum_xml        — Tagged/preserve XML codec, schema inference
//!          vellum_path       — Path selector over variant trees
//! Layer 0: vellum_foundation — Variant, Kind, collections, object protocol
//! ```

pub use vellum_binary as binary;
pub use vellum_foundation as foundation;
pub use vellum_path as path;
pub use vellum_xml as xml;
