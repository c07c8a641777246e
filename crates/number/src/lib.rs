//! Helpers for working with 256-bit numbers at serialization boundaries.

pub mod serialization;
