//! Input table: typed rows and the CSV loader.

pub mod loader;
pub mod schema;

pub use loader::{load_dataset, read_dataset, LoadError, LoadedDataset};
pub use schema::{Dataset, Row, CLOSE_COLUMN};
