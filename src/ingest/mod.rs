pub mod importer;
pub mod reader;
pub mod record;
