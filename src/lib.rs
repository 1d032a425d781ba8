//! Bookshelf application library: the books module and its storage.

pub mod modules;

pub use modules::books::{
    models::{Book, NewBook},
    store::{BookStore, MemoryBookStore, PgBookStore, SharedStore},
};
