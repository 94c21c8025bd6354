use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(
    pool: &PgPool,
    user_id: i32,
    course_id: i32,
) -> Result<Option<models::CourseProgress>, String> {
    let query_span = tracing::info_span!("Fetch course progress.");
    sqlx::query_as::<_, models::CourseProgress>(
        r#"
        SELECT *
        FROM course_progress
        WHERE user_id=$1
        AND course_id=$2
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch course progress, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_lectures(
    pool: &PgPool,
    progress_id: i32,
) -> Result<Vec<models::LectureProgress>, String> {
    let query_span = tracing::info_span!("Fetch lecture progress.");
    sqlx::query_as::<_, models::LectureProgress>(
        r#"
        SELECT *
        FROM lecture_progress
        WHERE progress_id=$1
        ORDER BY lecture_id
        "#,
    )
    .bind(progress_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch lecture progress, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Returns the (user, course) progress row, creating it on first use.
pub async fn fetch_or_create(
    pool: &PgPool,
    user_id: i32,
    course_id: i32,
) -> Result<models::CourseProgress, String> {
    let query_span = tracing::info_span!("Upsert course progress.");
    sqlx::query_as::<_, models::CourseProgress>(
        r#"
        INSERT INTO course_progress (user_id, course_id, completed, created_at, updated_at)
        VALUES ($1, $2, FALSE, NOW(), NOW())
        ON CONFLICT (user_id, course_id) DO UPDATE SET updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to upsert course progress, error: {:?}", err);
        "Failed to save progress".to_string()
    })
}

pub async fn set_lecture_viewed(
    pool: &PgPool,
    progress_id: i32,
    lecture_id: i32,
) -> Result<(), String> {
    let query_span = tracing::info_span!("Mark lecture viewed.");
    sqlx::query(
        r#"
        INSERT INTO lecture_progress (progress_id, lecture_id, viewed, updated_at)
        VALUES ($1, $2, TRUE, NOW())
        ON CONFLICT (progress_id, lecture_id) DO UPDATE SET viewed = TRUE, updated_at = NOW()
        "#,
    )
    .bind(progress_id)
    .bind(lecture_id)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to mark lecture viewed, error: {:?}", err);
        "Failed to save progress".to_string()
    })
}

pub async fn set_completed(pool: &PgPool, progress_id: i32, completed: bool) -> Result<(), String> {
    sqlx::query("UPDATE course_progress SET completed=$2, updated_at=NOW() WHERE id=$1")
        .bind(progress_id)
        .bind(completed)
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Failed to update course completion, error: {:?}", err);
            "Failed to save progress".to_string()
        })
}

/// Sets every lecture of the course to `viewed` and the course completion to match.
pub async fn mark_all(
    pool: &PgPool,
    progress_id: i32,
    course_id: i32,
    viewed: bool,
) -> Result<(), String> {
    let query_span = tracing::info_span!("Mark all lectures.", viewed);
    async move {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO lecture_progress (progress_id, lecture_id, viewed, updated_at)
            SELECT $1, l.id, $3, NOW()
            FROM lecture l
            WHERE l.course_id = $2
            ON CONFLICT (progress_id, lecture_id) DO UPDATE SET viewed = EXCLUDED.viewed, updated_at = NOW()
            "#,
        )
        .bind(progress_id)
        .bind(course_id)
        .bind(viewed)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE course_progress SET completed=$2, updated_at=NOW() WHERE id=$1")
            .bind(progress_id)
            .bind(viewed)
            .execute(&mut *tx)
            .await?;

        tx.commit().await
    }
    .instrument(query_span)
    .await
    .map_err(|err: sqlx::Error| {
        tracing::error!("Failed to mark lectures, error: {:?}", err);
        "Failed to save progress".to_string()
    })
}
