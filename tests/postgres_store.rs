//! `PgBookStore` against a live database.
//!
//! Run with the `DB_*` variables set:
//! `cargo test --test postgres_store -- --ignored`

use bookshelf_app::{modules::books::BooksModule, BookStore, NewBook, PgBookStore};
use bookshelf_kernel::{settings::Settings, Module};
use std::sync::Arc;

async fn store() -> PgBookStore {
    let settings = Settings::load().expect("DB_* variables required");
    let pool = bookshelf_db::connect(&settings.database, &settings.pool)
        .await
        .expect("pool creation failed");

    let store = PgBookStore::new(pool.clone());
    let module = BooksModule::new(Arc::new(store.clone()));
    let migrations: Vec<(String, _)> = module
        .migrations()
        .into_iter()
        .map(|migration| (module.name().to_string(), migration))
        .collect();
    bookshelf_db::run_migrations(&pool, &migrations)
        .await
        .expect("migration failed");

    store
}

fn book(title: &str) -> NewBook {
    NewBook {
        author: Some("Integration".to_string()),
        title: Some(title.to_string()),
        publisher: Some("Test Press".to_string()),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_get_delete_round_trip() {
    let store = store().await;

    let created = store.create(book("round trip")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title.as_deref(), Some("round trip"));

    let fetched = store.get(created.id).await.unwrap();
    assert_eq!(fetched, Some(created.clone()));

    assert!(store
        .list()
        .await
        .unwrap()
        .iter()
        .any(|b| b.id == created.id));

    assert_eq!(store.delete(created.id).await.unwrap(), 1);
    assert_eq!(store.delete(created.id).await.unwrap(), 0);
    assert!(store.get(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn absent_fields_persist_as_null() {
    let store = store().await;

    let created = store.create(NewBook::default()).await.unwrap();
    let fetched = store.get(created.id).await.unwrap().unwrap();
    assert!(fetched.author.is_none());
    assert!(fetched.title.is_none());
    assert!(fetched.publisher.is_none());

    store.delete(created.id).await.unwrap();
}
