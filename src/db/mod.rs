mod core;
mod records;
mod schema;

pub use self::core::Database;
