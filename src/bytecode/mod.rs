//! Bytecode symbol tables: names, classes, methods, and the merge/rename engine over them.
//!
//! Programs are held as plain values. Parsing and serializing the wire format is left to a
//! [`BytecodeCodec`](crate::BytecodeCodec) implementation.

pub(crate) mod block;
pub(crate) mod generate;
pub(crate) mod merge;
pub(crate) mod name;
pub(crate) mod program;
pub(crate) mod rename;
