//! Shared primitives: geometry re-exports, fixed-point values, identities and the error type.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod ids;
pub(crate) mod math;
