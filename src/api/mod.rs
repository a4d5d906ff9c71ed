//! API handlers and router assembly for the Libris REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod security;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(books::index))
        // Health
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route(
            "/books/",
            get(books::get_books_by_ids).post(books::create_book),
        )
        .route("/books/all", get(books::get_books))
        .route("/books/ids", get(books::get_ids))
        .route("/books/books", get(books::get_titles))
        .route("/books/title/", get(books::get_book_by_title))
        .route("/books/author/", get(books::get_books_by_author))
        .route("/books/category/", get(books::get_books_by_category))
        .route("/books/available", get(books::get_available_books))
        .route("/books/recent", get(books::get_recent_books))
        .route("/books/:id", get(books::get_book).put(books::update_book))
        .route("/books/del/:id", delete(books::delete_book))
        .route("/delete", delete(books::delete_book_by_title))
        .route("/favo", get(books::get_recommendations))
        .with_state(state);

    // OpenAPI documentation
    let docs = openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(docs)
        .layer(middleware::from_fn(security::security_headers))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
