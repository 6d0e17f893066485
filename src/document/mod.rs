pub(crate) mod codec;
pub(crate) mod dsl;
pub(crate) mod model;
