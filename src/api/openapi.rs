//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library Catalog Service REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::get_books,
        books::get_ids,
        books::get_titles,
        books::get_book_by_title,
        books::get_books_by_author,
        books::get_books_by_category,
        books::get_available_books,
        books::get_recent_books,
        books::get_book,
        books::get_books_by_ids,
        books::update_book,
        books::delete_book,
        books::delete_book_by_title,
        books::get_recommendations,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::NewBook,
            crate::models::book::BookUpdate,
            books::MessageResponse,
            books::BooksResponse,
            books::AvailableBooksResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
