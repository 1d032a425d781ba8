use async_trait::async_trait;
use bookshelf_db::DbError;
use sqlx::PgPool;

use super::BookStore;
use crate::modules::books::models::{Book, NewBook};

/// `BookStore` over the `books` table.
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, DbError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (author, title, publisher)
            VALUES ($1, $2, $3)
            RETURNING id, author, title, publisher
            "#,
        )
        .bind(book.author)
        .bind(book.title)
        .bind(book.publisher)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    async fn list(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>("SELECT id, author, title, publisher FROM books")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn get(&self, id: i64) -> Result<Option<Book>, DbError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, author, title, publisher FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
