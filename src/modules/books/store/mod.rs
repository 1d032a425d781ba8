//! Persistence seam for books.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_db::DbError;

use super::models::{Book, NewBook};

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

/// Store handle shared by every handler.
pub type SharedStore = Arc<dyn BookStore>;

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a row and return it with its generated id.
    async fn create(&self, book: NewBook) -> Result<Book, DbError>;

    /// Every row, in whatever order the backend yields them.
    async fn list(&self) -> Result<Vec<Book>, DbError>;

    async fn get(&self, id: i64) -> Result<Option<Book>, DbError>;

    /// Hard delete; returns the number of rows removed.
    async fn delete(&self, id: i64) -> Result<u64, DbError>;
}
