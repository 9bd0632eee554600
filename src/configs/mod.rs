mod schema;
mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Database, Firmware, Logger, Server, Settings, Stats};
pub use storage::Storage;
