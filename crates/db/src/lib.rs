//! PostgreSQL access for bookshelf: pool construction and the startup
//! schema sync.

mod error;
pub mod migrate;
pub mod pool;

pub use error::DbError;
pub use migrate::run_migrations;
pub use pool::{connect, connect_options};
