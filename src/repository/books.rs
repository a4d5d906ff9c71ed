//! Books repository
//!
//! Every operation is exactly one scoped session: check out a connection,
//! run one statement, commit, release. Write operations report the affected
//! row count so callers can tell "nothing matched" from success.

use crate::{
    db::Db,
    error::{AppError, AppResult},
    models::book::{Book, BookUpdate, NewBook},
    repository::sql::{bind_params, build_update, in_placeholders, BOOK_COLUMNS},
};

#[derive(Clone)]
pub struct BooksRepository {
    db: Db,
}

impl BooksRepository {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a new book with its caller-supplied id.
    pub async fn insert(&self, book: &NewBook) -> AppResult<()> {
        let mut session = self.db.session().await?;
        sqlx::query(
            "INSERT INTO books (id, title, author, publication_year, status, category, rating) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.publication_year)
        .bind(&book.status)
        .bind(&book.category)
        .bind(book.rating)
        .execute(session.executor())
        .await?;
        session.commit().await
    }

    /// List all books
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let mut session = self.db.session().await?;
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY id"
        ))
        .fetch_all(session.executor())
        .await?;
        session.commit().await?;
        Ok(books)
    }

    /// Get book by id
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let mut session = self.db.session().await?;
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(session.executor())
        .await?;
        session.commit().await?;
        Ok(book)
    }

    /// Get the first book matching a title. Titles are unique by convention
    /// only, so at most one row is returned regardless of duplicates.
    pub async fn get_by_title(&self, title: &str) -> AppResult<Option<Book>> {
        let mut session = self.db.session().await?;
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE title = ? LIMIT 1"
        ))
        .bind(title)
        .fetch_optional(session.executor())
        .await?;
        session.commit().await?;
        Ok(book)
    }

    /// List books by author
    pub async fn list_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        let mut session = self.db.session().await?;
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE author = ? ORDER BY id"
        ))
        .bind(author)
        .fetch_all(session.executor())
        .await?;
        session.commit().await?;
        Ok(books)
    }

    /// List books by category
    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<Book>> {
        let mut session = self.db.session().await?;
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE category = ? ORDER BY id"
        ))
        .bind(category)
        .fetch_all(session.executor())
        .await?;
        session.commit().await?;
        Ok(books)
    }

    /// Batch lookup by ids with a single IN-list statement. Ids absent from
    /// the table are simply not in the result.
    pub async fn list_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE id IN ({}) ORDER BY id",
            in_placeholders(ids.len())
        );
        let mut session = self.db.session().await?;
        let mut query = sqlx::query_as::<_, Book>(&sql);
        for id in ids {
            query = query.bind(*id);
        }
        let books = query.fetch_all(session.executor()).await?;
        session.commit().await?;
        Ok(books)
    }

    /// List books whose status marks them available.
    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        let mut session = self.db.session().await?;
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE status = ? ORDER BY id"
        ))
        .bind("AV")
        .fetch_all(session.executor())
        .await?;
        session.commit().await?;
        Ok(books)
    }

    /// Titles of the most recently published books (max publication year).
    pub async fn recent_titles(&self) -> AppResult<Vec<String>> {
        let mut session = self.db.session().await?;
        let titles = sqlx::query_scalar::<_, Option<String>>(
            "SELECT title FROM books \
             WHERE publication_year = (SELECT MAX(publication_year) FROM books)",
        )
        .fetch_all(session.executor())
        .await?;
        session.commit().await?;
        Ok(titles.into_iter().flatten().collect())
    }

    /// Titles of the top-rated books (max rating).
    pub async fn top_rated_titles(&self) -> AppResult<Vec<String>> {
        let mut session = self.db.session().await?;
        let titles = sqlx::query_scalar::<_, Option<String>>(
            "SELECT title FROM books WHERE rating = (SELECT MAX(rating) FROM books)",
        )
        .fetch_all(session.executor())
        .await?;
        session.commit().await?;
        Ok(titles.into_iter().flatten().collect())
    }

    /// All book ids
    pub async fn list_ids(&self) -> AppResult<Vec<i64>> {
        let mut session = self.db.session().await?;
        let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM books ORDER BY id")
            .fetch_all(session.executor())
            .await?;
        session.commit().await?;
        Ok(ids)
    }

    /// All book titles
    pub async fn list_titles(&self) -> AppResult<Vec<String>> {
        let mut session = self.db.session().await?;
        let titles = sqlx::query_scalar::<_, Option<String>>("SELECT title FROM books ORDER BY id")
            .fetch_all(session.executor())
            .await?;
        session.commit().await?;
        Ok(titles.into_iter().flatten().collect())
    }

    /// Apply a partial update, returning the affected row count.
    ///
    /// Fails with `NoUpdatesProvided` before touching the pool when no field
    /// is supplied.
    pub async fn update(&self, id: i64, update: &BookUpdate) -> AppResult<u64> {
        let Some((sql, params)) = build_update(id, update) else {
            return Err(AppError::NoUpdatesProvided);
        };

        let mut session = self.db.session().await?;
        let result = bind_params(sqlx::query(&sql), &params)
            .execute(session.executor())
            .await?;
        session.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete by id, returning the affected row count (0 when nothing matched).
    pub async fn delete_by_id(&self, id: i64) -> AppResult<u64> {
        let mut session = self.db.session().await?;
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(session.executor())
            .await?;
        session.commit().await?;
        Ok(result.rows_affected())
    }

    /// Delete every book with a matching title, returning the affected row
    /// count. Titles are not unique, so this may remove more than one row.
    pub async fn delete_by_title(&self, title: &str) -> AppResult<u64> {
        let mut session = self.db.session().await?;
        let result = sqlx::query("DELETE FROM books WHERE title = ?")
            .bind(title)
            .execute(session.executor())
            .await?;
        session.commit().await?;
        Ok(result.rows_affected())
    }
}
