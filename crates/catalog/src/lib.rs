//! In-memory movie catalog — the read-only query layer over the movie
//! table, plus JSON data loading.

pub mod catalog;
pub mod loader;

pub use catalog::{CatalogStats, MovieCatalog};
pub use loader::DataLoader;
