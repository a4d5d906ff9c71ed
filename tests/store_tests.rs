//! Store-level integration tests: pool bounds, scoped sessions, and the
//! partial-update path, against a temp-file SQLite database.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;

use libris_server::{
    db::Db,
    error::AppError,
    models::book::{BookUpdate, NewBook},
    repository::Repository,
    services::Services,
};

async fn test_db(max_connections: u32, acquire_timeout: Duration) -> (Db, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("books.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
        .expect("open pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    (Db::from_pool(pool), dir)
}

fn services(db: &Db) -> Services {
    Services::new(Repository::new(db.clone()))
}

fn sample_book(id: i64) -> NewBook {
    NewBook {
        id,
        title: Some(format!("Book {id}")),
        author: Some("Ursula K. Le Guin".to_string()),
        publication_year: Some(1969),
        status: Some("AV".to_string()),
        category: Some("scifi".to_string()),
        rating: Some(5),
    }
}

#[tokio::test]
async fn insert_then_get_returns_inserted_values() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);

    services.books.create(&sample_book(1)).await.unwrap();

    let book = services.books.get_by_id(1).await.unwrap();
    assert_eq!(book.id, 1);
    assert_eq!(book.title.as_deref(), Some("Book 1"));
    assert_eq!(book.author.as_deref(), Some("Ursula K. Le Guin"));
    assert_eq!(book.publication_year, Some(1969));
    assert_eq!(book.status.as_deref(), Some("AV"));
    assert_eq!(book.category.as_deref(), Some("scifi"));
    assert_eq!(book.rating, Some(5));
}

#[tokio::test]
async fn duplicate_id_insert_is_a_constraint_violation() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);

    services.books.create(&sample_book(1)).await.unwrap();
    let err = services.books.create(&sample_book(1)).await.unwrap_err();
    assert!(matches!(err, AppError::ConstraintViolation(_)));
}

#[tokio::test]
async fn partial_update_with_only_rating_zero_touches_only_rating() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);
    services.books.create(&sample_book(1)).await.unwrap();

    let update = BookUpdate {
        rating: Some(0),
        ..Default::default()
    };
    services.books.update(1, &update).await.unwrap();

    let book = services.books.get_by_id(1).await.unwrap();
    assert_eq!(book.rating, Some(0));
    assert_eq!(book.title.as_deref(), Some("Book 1"));
    assert_eq!(book.author.as_deref(), Some("Ursula K. Le Guin"));
    assert_eq!(book.publication_year, Some(1969));
    assert_eq!(book.status.as_deref(), Some("AV"));
    assert_eq!(book.category.as_deref(), Some("scifi"));
}

#[tokio::test]
async fn update_with_no_fields_is_rejected_without_touching_the_store() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);
    services.books.create(&sample_book(1)).await.unwrap();

    let err = services
        .books
        .update(1, &BookUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoUpdatesProvided));

    let book = services.books.get_by_id(1).await.unwrap();
    assert_eq!(book.rating, Some(5));
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);

    let update = BookUpdate {
        title: Some("Ghost".to_string()),
        ..Default::default()
    };
    let err = services.books.update(999, &update).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_of_missing_id_affects_zero_rows() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let repository = Repository::new(db.clone());

    // The repository reports zero affected rows, not an error.
    let affected = repository.books.delete_by_id(999).await.unwrap();
    assert_eq!(affected, 0);

    // The service translates that into NotFound.
    let services = services(&db);
    let err = services.books.delete_by_id(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_by_title_removes_every_matching_row() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);

    let mut first = sample_book(1);
    first.title = Some("Duplicate".to_string());
    let mut second = sample_book(2);
    second.title = Some("Duplicate".to_string());
    services.books.create(&first).await.unwrap();
    services.books.create(&second).await.unwrap();
    services.books.create(&sample_book(3)).await.unwrap();

    let affected = services.books.delete_by_title("Duplicate").await.unwrap();
    assert_eq!(affected, 2);

    let remaining = services.books.list_all().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 3);
}

#[tokio::test]
async fn batch_get_returns_only_existing_rows() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);
    services.books.create(&sample_book(1)).await.unwrap();
    services.books.create(&sample_book(3)).await.unwrap();

    let books = services.books.get_by_ids(&[1, 2, 3]).await.unwrap();
    let mut ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn list_available_with_no_av_rows_is_empty_not_an_error() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;
    let services = services(&db);

    let mut book = sample_book(1);
    book.status = Some("NA".to_string());
    services.books.create(&book).await.unwrap();

    let available = services.books.list_available().await.unwrap();
    assert!(available.is_empty());
}

#[tokio::test]
async fn pool_acquisition_is_bounded_and_recovers_after_release() {
    let (db, _dir) = test_db(2, Duration::from_millis(200)).await;

    let first = db.session().await.unwrap();
    let second = db.session().await.unwrap();

    // Capacity 2 is fully checked out: the third acquisition must fail fast
    // as pool exhaustion rather than wait unboundedly.
    let err = db.session().await.unwrap_err();
    assert!(matches!(err, AppError::PoolExhausted));

    drop(first);
    let third = db.session().await.unwrap();
    drop(third);
    drop(second);
}

#[tokio::test]
async fn dropped_session_rolls_back_a_completed_write() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;

    {
        let mut session = db.session().await.unwrap();
        sqlx::query("INSERT INTO books (id, title) VALUES (?, ?)")
            .bind(10_i64)
            .bind("Phantom")
            .execute(session.executor())
            .await
            .unwrap();
        // Dropped without commit: the write must not become visible.
    }

    let repository = Repository::new(db.clone());
    let book = repository.books.get_by_id(10).await.unwrap();
    assert!(book.is_none());
}

#[tokio::test]
async fn session_error_path_rolls_back_the_earlier_write() {
    let (db, _dir) = test_db(5, Duration::from_secs(5)).await;

    let mut session = db.session().await.unwrap();
    sqlx::query("INSERT INTO books (id, title) VALUES (?, ?)")
        .bind(20_i64)
        .bind("Half-done")
        .execute(session.executor())
        .await
        .unwrap();
    // Second statement fails (duplicate primary key) inside the same session.
    let failed = sqlx::query("INSERT INTO books (id, title) VALUES (?, ?)")
        .bind(20_i64)
        .bind("Half-done again")
        .execute(session.executor())
        .await;
    assert!(failed.is_err());
    session.rollback().await.unwrap();

    let repository = Repository::new(db.clone());
    assert!(repository.books.get_by_id(20).await.unwrap().is_none());
}

#[tokio::test]
async fn cancelled_task_releases_its_connection() {
    let (db, _dir) = test_db(1, Duration::from_secs(2)).await;

    let held = db.clone();
    let task = tokio::spawn(async move {
        let _session = held.session().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    // Let the task check out the only connection, then cancel it mid-session.
    tokio::time::sleep(Duration::from_millis(200)).await;
    task.abort();
    let _ = task.await;

    // The dropped session must have returned its connection to the pool.
    let session = db.session().await.unwrap();
    drop(session);
}
