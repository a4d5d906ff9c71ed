//! Repository layer for database operations

pub mod books;
pub mod sql;

use crate::db::Db;

/// Main repository struct holding the shared connection pool
#[derive(Clone)]
pub struct Repository {
    pub db: Db,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository around the given pool handle
    pub fn new(db: Db) -> Self {
        Self {
            books: books::BooksRepository::new(db.clone()),
            db,
        }
    }
}
