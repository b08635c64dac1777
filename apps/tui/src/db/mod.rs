pub mod migrations;
pub mod models;
pub mod queries;
pub use migrations::{create_database_pool, create_database_pool_with_url, setup_database};
