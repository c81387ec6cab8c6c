//! Schema sources and the table descriptor they produce

mod ddl;
mod descriptor;
mod snapshot;
mod source;

pub use ddl::DdlSchemaSource;
pub use descriptor::TableDescriptor;
pub use snapshot::{SchemaSnapshot, SnapshotSchemaSource};
pub use source::{select_tables, SchemaSource};

use crate::config::{CodegenConfig, SchemaFormat};
use crate::error::Result;

/// Open the schema source a configuration points at
pub fn open_source(config: &CodegenConfig) -> Result<Box<dyn SchemaSource>> {
    let path = &config.schema_file;
    let source: Box<dyn SchemaSource> = match config.schema_format.resolve(path) {
        SchemaFormat::Snapshot => Box::new(SnapshotSchemaSource::from_file(path)?),
        _ => Box::new(DdlSchemaSource::from_file(path)?),
    };
    Ok(source)
}
