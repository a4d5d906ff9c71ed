//! Books service
//!
//! Composition layer over the repository: translates empty results and
//! zero-affected-row counts into `NotFound`, and leaves everything else to
//! propagate as the typed failure it already is.

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookUpdate, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book. A duplicate id surfaces as a constraint violation.
    pub async fn create(&self, book: &NewBook) -> AppResult<()> {
        self.repository.books.insert(book).await?;
        tracing::info!(id = book.id, "Book added");
        Ok(())
    }

    /// List all books (empty list when the catalog is empty)
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// All book ids
    pub async fn list_ids(&self) -> AppResult<Vec<i64>> {
        self.repository.books.list_ids().await
    }

    /// All book titles
    pub async fn list_titles(&self) -> AppResult<Vec<String>> {
        self.repository.books.list_titles().await
    }

    /// Get book by id
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    /// Get the first book matching a title
    pub async fn get_by_title(&self, title: &str) -> AppResult<Book> {
        self.repository
            .books
            .get_by_title(title)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No books found for the given title.".to_string())
            })
    }

    /// All books by an author
    pub async fn get_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list_by_author(author).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(
                "No books found for the given author.".to_string(),
            ));
        }
        Ok(books)
    }

    /// All books in a category
    pub async fn get_by_category(&self, category: &str) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list_by_category(category).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(
                "No books found for the given category.".to_string(),
            ));
        }
        Ok(books)
    }

    /// Batch lookup; ids that do not exist are simply absent from the result,
    /// but a fully-missing batch is a not-found condition.
    pub async fn get_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list_by_ids(ids).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(
                "No books found for the given IDs.".to_string(),
            ));
        }
        Ok(books)
    }

    /// Books currently available (may be empty)
    pub async fn list_available(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_available().await
    }

    /// Titles at the most recent publication year (may be empty)
    pub async fn recent(&self) -> AppResult<Vec<String>> {
        self.repository.books.recent_titles().await
    }

    /// Titles at the highest rating (may be empty)
    pub async fn top_rated(&self) -> AppResult<Vec<String>> {
        self.repository.books.top_rated_titles().await
    }

    /// Partial update. `NoUpdatesProvided` when no field is supplied;
    /// `NotFound` when the id matched no row.
    pub async fn update(&self, id: i64, update: &BookUpdate) -> AppResult<()> {
        let affected = self.repository.books.update(id, update).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        tracing::info!(id, "Book updated");
        Ok(())
    }

    /// Delete by id. `NotFound` when the id matched no row.
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let affected = self.repository.books.delete_by_id(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        tracing::info!(id, "Book deleted");
        Ok(())
    }

    /// Delete by title. Removes every matching row (titles are not unique);
    /// the affected count is returned so callers can report it.
    pub async fn delete_by_title(&self, title: &str) -> AppResult<u64> {
        let affected = self.repository.books.delete_by_title(title).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Book not found.".to_string()));
        }
        tracing::info!(title, affected, "Books deleted by title");
        Ok(affected)
    }

    /// Readiness probe passthrough
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.db.ping().await
    }
}
