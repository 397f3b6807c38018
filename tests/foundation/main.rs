//! Integration tests for Layer 0: Foundation
//!
//! Tests for the Variant value type, kinds, collections, errors, and the
//! object protocol.

mod collections;
mod errors;
mod objects;
