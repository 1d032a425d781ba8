use std::collections::BTreeMap;

use async_trait::async_trait;
use bookshelf_db::DbError;
use tokio::sync::RwLock;

use super::BookStore;
use crate::modules::books::models::{Book, NewBook};

/// In-process `BookStore` with ids starting at 1. Used by the test suite.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Book>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let book = book.into_book(inner.last_id);
        inner.rows.insert(book.id, book.clone());
        Ok(book)
    }

    async fn list(&self) -> Result<Vec<Book>, DbError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Book>, DbError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let removed = self.inner.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}
