//! Dynamic statement construction for the books table
//!
//! Statement text is assembled only from the fixed column list below; caller
//! input travels exclusively through bound parameters.

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

use crate::models::book::BookUpdate;

/// Catalog column order. Row-mapping queries select exactly this list.
pub const BOOK_COLUMNS: &str = "id, title, author, publication_year, status, category, rating";

/// An ordered parameter for a dynamically built statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// Bind parameters to a query in list order.
pub fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &'q [SqlParam],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlParam::Int(v) => query.bind(*v),
            SqlParam::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

/// Build a partial `UPDATE books SET ... WHERE id = ?` statement.
///
/// Only supplied columns appear, in the fixed order title, author,
/// publication_year, status, category, rating; the row id is always the
/// last bound parameter. Returns `None` when no field is supplied, in which
/// case nothing must be executed.
pub fn build_update(id: i64, update: &BookUpdate) -> Option<(String, Vec<SqlParam>)> {
    let mut assignments: Vec<&'static str> = Vec::new();
    let mut params: Vec<SqlParam> = Vec::new();

    if let Some(ref title) = update.title {
        assignments.push("title = ?");
        params.push(SqlParam::Text(title.clone()));
    }
    if let Some(ref author) = update.author {
        assignments.push("author = ?");
        params.push(SqlParam::Text(author.clone()));
    }
    if let Some(publication_year) = update.publication_year {
        assignments.push("publication_year = ?");
        params.push(SqlParam::Int(publication_year));
    }
    if let Some(ref status) = update.status {
        assignments.push("status = ?");
        params.push(SqlParam::Text(status.clone()));
    }
    if let Some(ref category) = update.category {
        assignments.push("category = ?");
        params.push(SqlParam::Text(category.clone()));
    }
    if let Some(rating) = update.rating {
        assignments.push("rating = ?");
        params.push(SqlParam::Int(rating));
    }

    if assignments.is_empty() {
        return None;
    }

    params.push(SqlParam::Int(id));
    let sql = format!(
        "UPDATE books SET {} WHERE id = ?",
        assignments.join(", ")
    );
    Some((sql, params))
}

/// `?, ?, ...` placeholder list for an IN clause of `count` elements.
pub fn in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_contains_only_supplied_columns_in_fixed_order() {
        let update = BookUpdate {
            rating: Some(4),
            title: Some("Dune".to_string()),
            ..Default::default()
        };
        let (sql, params) = build_update(7, &update).unwrap();

        assert_eq!(sql, "UPDATE books SET title = ?, rating = ? WHERE id = ?");
        assert_eq!(
            params,
            vec![
                SqlParam::Text("Dune".to_string()),
                SqlParam::Int(4),
                SqlParam::Int(7),
            ]
        );
    }

    #[test]
    fn update_id_is_always_the_last_parameter() {
        let update = BookUpdate {
            author: Some("Herbert".to_string()),
            status: Some("AV".to_string()),
            ..Default::default()
        };
        let (_, params) = build_update(42, &update).unwrap();
        assert_eq!(params.last(), Some(&SqlParam::Int(42)));
    }

    #[test]
    fn zero_valued_rating_is_a_real_update() {
        let update = BookUpdate {
            rating: Some(0),
            ..Default::default()
        };
        let (sql, params) = build_update(1, &update).unwrap();
        assert_eq!(sql, "UPDATE books SET rating = ? WHERE id = ?");
        assert_eq!(params, vec![SqlParam::Int(0), SqlParam::Int(1)]);
    }

    #[test]
    fn empty_string_title_is_a_real_update() {
        let update = BookUpdate {
            title: Some(String::new()),
            ..Default::default()
        };
        let (sql, _) = build_update(1, &update).unwrap();
        assert_eq!(sql, "UPDATE books SET title = ? WHERE id = ?");
    }

    #[test]
    fn no_supplied_fields_builds_nothing() {
        assert!(build_update(1, &BookUpdate::default()).is_none());
    }

    #[test]
    fn all_fields_cover_the_full_allow_list() {
        let update = BookUpdate {
            title: Some("t".into()),
            author: Some("a".into()),
            publication_year: Some(1999),
            status: Some("AV".into()),
            category: Some("c".into()),
            rating: Some(5),
        };
        let (sql, params) = build_update(3, &update).unwrap();
        assert_eq!(
            sql,
            "UPDATE books SET title = ?, author = ?, publication_year = ?, \
             status = ?, category = ?, rating = ? WHERE id = ?"
        );
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn in_placeholders_matches_count() {
        assert_eq!(in_placeholders(1), "?");
        assert_eq!(in_placeholders(3), "?, ?, ?");
    }
}
