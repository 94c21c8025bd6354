use crate::models;
use sqlx::{PgPool, Postgres};
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, course_id: i32, id: i32) -> Result<Option<models::Lecture>, String> {
    tracing::info!("Fetch lecture {} of course {}", id, course_id);
    sqlx::query_as::<_, models::Lecture>(
        r#"
        SELECT *
        FROM lecture
        WHERE id=$1
        AND course_id=$2
        LIMIT 1
        "#,
    )
    .bind(id)
    .bind(course_id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch lecture, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_course(pool: &PgPool, course_id: i32) -> Result<Vec<models::Lecture>, String> {
    let query_span = tracing::info_span!("Fetch lectures by course.");
    sqlx::query_as::<_, models::Lecture>(
        r#"
        SELECT *
        FROM lecture
        WHERE course_id=$1
        ORDER BY position ASC, id ASC
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch lectures, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn count_by_course(pool: &PgPool, course_id: i32) -> Result<i64, String> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lecture WHERE course_id=$1")
        .bind(course_id)
        .fetch_one(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to count lectures, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn insert(pool: &PgPool, mut lecture: models::Lecture) -> Result<models::Lecture, String> {
    let query_span = tracing::info_span!("Saving new lecture into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO lecture (course_id, title, video_url, is_preview_free, position, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id;
        "#,
    )
    .bind(lecture.course_id)
    .bind(&lecture.title)
    .bind(&lecture.video_url)
    .bind(lecture.is_preview_free)
    .bind(lecture.position)
    .bind(lecture.created_at)
    .bind(lecture.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        lecture.id = id;
        lecture
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, lecture: models::Lecture) -> Result<models::Lecture, String> {
    let query_span = tracing::info_span!("Updating lecture");
    sqlx::query_as::<_, models::Lecture>(
        r#"
        UPDATE lecture
        SET
            title=$2,
            video_url=$3,
            is_preview_free=$4,
            position=$5,
            updated_at=NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(lecture.id)
    .bind(&lecture.title)
    .bind(&lecture.video_url)
    .bind(lecture.is_preview_free)
    .bind(lecture.position)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update lecture".to_string()
    })
}

/// Deletes a lecture of the course. A published course left without lectures
/// is unpublished in the same transaction.
///
/// Returns `None` when the lecture does not exist, otherwise whether the
/// course was unpublished.
#[tracing::instrument(name = "Delete lecture.", skip(pool))]
pub async fn delete(pool: &PgPool, course_id: i32, id: i32) -> Result<Option<bool>, String> {
    async {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query::<Postgres>("DELETE FROM lecture WHERE id = $1 AND course_id = $2;")
            .bind(id)
            .bind(course_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await?;
            return Ok::<_, sqlx::Error>(None);
        }

        let unpublished = sqlx::query::<Postgres>(
            r#"
            UPDATE course
            SET is_published = FALSE, updated_at = NOW()
            WHERE id = $1
            AND is_published = TRUE
            AND NOT EXISTS (SELECT 1 FROM lecture WHERE course_id = $1)
            "#,
        )
        .bind(course_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        tx.commit().await?;
        Ok::<_, sqlx::Error>(Some(unpublished))
    }
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete lecture: {:?}", err);
        "Failed to delete lecture".to_string()
    })
}
