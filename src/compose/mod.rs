pub(crate) mod fonts;
pub(crate) mod importer;
pub(crate) mod job;
