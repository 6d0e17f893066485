//! Frames, layers and the display list that describe a timeline over time.

pub(crate) mod clone;
pub(crate) mod display;
pub(crate) mod frame;
pub(crate) mod layer;
pub(crate) mod model;
