//! Books API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookUpdate, NewBook},
    AppState,
};

/// Confirmation message body
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Full catalog listing
#[derive(Serialize, ToSchema)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

/// Available books listing
#[derive(Serialize, ToSchema)]
pub struct AvailableBooksResponse {
    pub available_books: Vec<Book>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuthorQuery {
    pub author: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryQuery {
    pub category: String,
}

/// Comma-separated id list, e.g. `book_ids=1,2,3`
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookIdsQuery {
    pub book_ids: String,
}

/// Service banner
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "task": "Welcome to Library Management" }))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books/",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 201, description = "Book added", body = MessageResponse),
        (status = 409, description = "A book with this id already exists")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(book): Json<NewBook>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.services.books.create(&book).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Book added successfully.".to_string(),
        }),
    ))
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BooksResponse)
    )
)]
pub async fn get_books(State(state): State<AppState>) -> AppResult<Json<BooksResponse>> {
    let books = state.services.books.list_all().await?;
    Ok(Json(BooksResponse { books }))
}

/// List all book ids
#[utoipa::path(
    get,
    path = "/books/ids",
    tag = "books",
    responses(
        (status = 200, description = "All book ids", body = Vec<i64>)
    )
)]
pub async fn get_ids(State(state): State<AppState>) -> AppResult<Json<Vec<i64>>> {
    let ids = state.services.books.list_ids().await?;
    Ok(Json(ids))
}

/// List all book titles
#[utoipa::path(
    get,
    path = "/books/books",
    tag = "books",
    responses(
        (status = 200, description = "All book titles", body = Vec<String>)
    )
)]
pub async fn get_titles(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let titles = state.services.books.list_titles().await?;
    Ok(Json(titles))
}

/// Find a book by title (first match)
#[utoipa::path(
    get,
    path = "/books/title/",
    tag = "books",
    params(TitleQuery),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "No book with this title")
    )
)]
pub async fn get_book_by_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_title(&query.title).await?;
    Ok(Json(book))
}

/// Find books by author
#[utoipa::path(
    get,
    path = "/books/author/",
    tag = "books",
    params(AuthorQuery),
    responses(
        (status = 200, description = "Books found", body = Vec<Book>),
        (status = 404, description = "No books by this author")
    )
)]
pub async fn get_books_by_author(
    State(state): State<AppState>,
    Query(query): Query<AuthorQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_by_author(&query.author).await?;
    Ok(Json(books))
}

/// Find books by category
#[utoipa::path(
    get,
    path = "/books/category/",
    tag = "books",
    params(CategoryQuery),
    responses(
        (status = 200, description = "Books found", body = Vec<Book>),
        (status = 404, description = "No books in this category")
    )
)]
pub async fn get_books_by_category(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_by_category(&query.category).await?;
    Ok(Json(books))
}

/// List available books (status "AV"); empty list when none
#[utoipa::path(
    get,
    path = "/books/available",
    tag = "books",
    responses(
        (status = 200, description = "Available books", body = AvailableBooksResponse)
    )
)]
pub async fn get_available_books(
    State(state): State<AppState>,
) -> AppResult<Json<AvailableBooksResponse>> {
    let available_books = state.services.books.list_available().await?;
    Ok(Json(AvailableBooksResponse { available_books }))
}

/// Titles of the most recently published books
#[utoipa::path(
    get,
    path = "/books/recent",
    tag = "books",
    responses(
        (status = 200, description = "Most recent titles", body = Vec<String>)
    )
)]
pub async fn get_recent_books(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let titles = state.services.books.recent().await?;
    Ok(Json(titles))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Batch lookup by comma-separated ids
#[utoipa::path(
    get,
    path = "/books/",
    tag = "books",
    params(BookIdsQuery),
    responses(
        (status = 200, description = "Books found", body = Vec<Book>),
        (status = 400, description = "Unparsable id list"),
        (status = 404, description = "None of the ids exist")
    )
)]
pub async fn get_books_by_ids(
    State(state): State<AppState>,
    Query(query): Query<BookIdsQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let ids = parse_id_list(&query.book_ids)?;
    let books = state.services.books.get_by_ids(&ids).await?;
    Ok(Json(books))
}

/// Partially update a book; only supplied fields change
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "Book updated", body = MessageResponse),
        (status = 400, description = "No updates provided"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<BookUpdate>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.update(id, &update).await?;
    Ok(Json(MessageResponse {
        message: "Book updated successfully.".to_string(),
    }))
}

/// Delete a book by id
#[utoipa::path(
    delete,
    path = "/books/del/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_by_id(id).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted successfully.".to_string(),
    }))
}

/// Delete every book with a matching title
#[utoipa::path(
    delete,
    path = "/delete",
    tag = "books",
    params(TitleQuery),
    responses(
        (status = 200, description = "Books deleted", body = MessageResponse),
        (status = 404, description = "No book with this title")
    )
)]
pub async fn delete_book_by_title(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete_by_title(&query.title).await?;
    Ok(Json(MessageResponse {
        message: "Book deleted successfully.".to_string(),
    }))
}

/// Titles of the top-rated books
#[utoipa::path(
    get,
    path = "/favo",
    tag = "books",
    responses(
        (status = 200, description = "Top-rated titles", body = Vec<String>)
    )
)]
pub async fn get_recommendations(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let titles = state.services.books.top_rated().await?;
    Ok(Json(titles))
}

fn parse_id_list(raw: &str) -> AppResult<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid book id: {part}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_id_list;

    #[test]
    fn parses_comma_separated_ids() {
        assert_eq!(parse_id_list("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4 , 5 ").unwrap(), vec![4, 5]);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(parse_id_list("1,x").is_err());
    }
}
