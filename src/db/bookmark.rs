use crate::models;
use sqlx::{PgPool, Postgres};
use tracing::Instrument;

pub async fn fetch_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<models::BookmarkEntry>, String> {
    let query_span = tracing::info_span!("Fetch bookmarks by user.");
    sqlx::query_as::<_, models::BookmarkEntry>(
        r#"
        SELECT b.course_id, c.title, c.thumbnail_url, b.created_at
        FROM bookmark b
        INNER JOIN course c ON c.id = b.course_id
        WHERE b.user_id=$1
        AND (c.is_published = TRUE OR c.creator_id = $1)
        ORDER BY b.created_at DESC, b.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch bookmarks, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Adding an existing bookmark is a no-op.
pub async fn insert(pool: &PgPool, user_id: i32, course_id: i32) -> Result<(), String> {
    let query_span = tracing::info_span!("Saving bookmark into the database");
    sqlx::query(
        r#"
        INSERT INTO bookmark (user_id, course_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id, course_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

#[tracing::instrument(name = "Delete bookmark.", skip(pool))]
pub async fn delete(pool: &PgPool, user_id: i32, course_id: i32) -> Result<bool, String> {
    sqlx::query::<Postgres>("DELETE FROM bookmark WHERE user_id = $1 AND course_id = $2;")
        .bind(user_id)
        .bind(course_id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete bookmark: {:?}", err);
            "Failed to delete bookmark".to_string()
        })
}

#[tracing::instrument(name = "Clear bookmarks.", skip(pool))]
pub async fn clear(pool: &PgPool, user_id: i32) -> Result<u64, String> {
    sqlx::query::<Postgres>("DELETE FROM bookmark WHERE user_id = $1;")
        .bind(user_id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected())
        .map_err(|err| {
            tracing::error!("Failed to clear bookmarks: {:?}", err);
            "Failed to clear bookmarks".to_string()
        })
}
