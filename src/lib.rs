pub mod catalog;
pub mod db;
pub mod environment;
pub mod error;
pub mod extract;
pub mod logging;

pub use catalog::{Catalog, InMemoryCatalog};
pub use error::ExtractError;

pub const TARGET_DB: &str = "db_query";
