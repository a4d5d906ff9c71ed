//! Security response headers
//!
//! Every response carries a strict header set; the interactive API docs get
//! a relaxed Content-Security-Policy instead, since Swagger UI needs inline
//! scripts and styles.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

const STRICT_CSP: &str = "default-src 'self';";
const DOCS_CSP: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline' 'unsafe-eval'; \
    style-src 'self' 'unsafe-inline';";

fn is_docs_path(path: &str) -> bool {
    path.starts_with("/swagger-ui") || path.starts_with("/api-docs")
}

/// Middleware applying security headers to every response.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    if is_docs_path(&path) {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(DOCS_CSP),
        );
    } else {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(STRICT_CSP),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
        );
        headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
        headers.insert(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::is_docs_path;

    #[test]
    fn docs_paths_are_recognized() {
        assert!(is_docs_path("/swagger-ui"));
        assert!(is_docs_path("/swagger-ui/index.html"));
        assert!(is_docs_path("/api-docs/openapi.json"));
        assert!(!is_docs_path("/books/all"));
    }
}
