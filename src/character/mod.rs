//! Characters: the shared, placeable entities of a document.
//!
//! Characters are reference-counted and compared by identity. Cloning a timeline never clones
//! the characters it places.

pub(crate) mod font;
pub(crate) mod model;
pub(crate) mod walk;
