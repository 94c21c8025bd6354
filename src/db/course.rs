use crate::models;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Course>, String> {
    tracing::info!("Fetch course {}", id);
    sqlx::query_as::<_, models::Course>(
        r#"
        SELECT *
        FROM course
        WHERE id=$1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch course, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_creator(pool: &PgPool, creator_id: i32) -> Result<Vec<models::Course>, String> {
    let query_span = tracing::info_span!("Fetch courses by creator.");
    sqlx::query_as::<_, models::Course>(
        r#"
        SELECT *
        FROM course
        WHERE creator_id=$1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(creator_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch courses, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

const PUBLISHED_WITH_CREATOR: &str = r#"
    SELECT c.*, u.name AS creator_name, u.photo_url AS creator_photo_url
    FROM course c
    INNER JOIN users u ON u.id = c.creator_id
    WHERE c.is_published = TRUE
"#;

pub async fn fetch_published(pool: &PgPool) -> Result<Vec<models::CourseWithCreator>, String> {
    let query_span = tracing::info_span!("Fetch published courses.");
    sqlx::query_as::<_, models::CourseWithCreator>(&format!(
        "{} ORDER BY c.created_at DESC, c.id DESC",
        PUBLISHED_WITH_CREATOR
    ))
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch published courses, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub fn search_query(search: &models::CourseSearch) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(PUBLISHED_WITH_CREATOR);

    if let Some(pattern) = search.like_pattern() {
        builder
            .push(" AND (c.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.subtitle ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR c.category ILIKE ")
            .push_bind(pattern)
            .push(")");
    }

    let categories = search.normalized_categories();
    if !categories.is_empty() {
        builder
            .push(" AND LOWER(c.category) = ANY(")
            .push_bind(categories)
            .push(")");
    }

    match search.sort_by_price {
        Some(models::PriceSort::Low) => builder.push(" ORDER BY c.price ASC, c.id ASC"),
        Some(models::PriceSort::High) => builder.push(" ORDER BY c.price DESC, c.id ASC"),
        None => builder.push(" ORDER BY c.created_at DESC, c.id DESC"),
    };

    builder
}

pub async fn search(
    pool: &PgPool,
    search: &models::CourseSearch,
) -> Result<Vec<models::CourseWithCreator>, String> {
    let query_span = tracing::info_span!("Search published courses.");
    search_query(search)
        .build_query_as::<models::CourseWithCreator>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to search courses, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Courses the user has a completed purchase for.
pub async fn fetch_enrolled(pool: &PgPool, user_id: i32) -> Result<Vec<models::Course>, String> {
    let query_span = tracing::info_span!("Fetch enrolled courses.");
    sqlx::query_as::<_, models::Course>(
        r#"
        SELECT DISTINCT c.*
        FROM course c
        INNER JOIN purchase p ON p.course_id = c.id
        WHERE p.user_id=$1
        AND p.status='completed'
        ORDER BY c.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch enrolled courses, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, mut course: models::Course) -> Result<models::Course, String> {
    let query_span = tracing::info_span!("Saving new course into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO course (creator_id, title, subtitle, description, category, level, price,
            thumbnail_url, is_published, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id;
        "#,
    )
    .bind(course.creator_id)
    .bind(&course.title)
    .bind(&course.subtitle)
    .bind(&course.description)
    .bind(&course.category)
    .bind(&course.level)
    .bind(course.price)
    .bind(&course.thumbnail_url)
    .bind(course.is_published)
    .bind(course.created_at)
    .bind(course.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        course.id = id;
        course
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, course: models::Course) -> Result<models::Course, String> {
    let query_span = tracing::info_span!("Updating course");
    sqlx::query_as::<_, models::Course>(
        r#"
        UPDATE course
        SET
            title=$2,
            subtitle=$3,
            description=$4,
            category=$5,
            level=$6,
            price=$7,
            thumbnail_url=$8,
            is_published=$9,
            updated_at=NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(course.id)
    .bind(&course.title)
    .bind(&course.subtitle)
    .bind(&course.description)
    .bind(&course.category)
    .bind(&course.level)
    .bind(course.price)
    .bind(&course.thumbnail_url)
    .bind(course.is_published)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|result| {
        tracing::info!("Course {} has been saved to database", result.id);
        result
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update course".to_string()
    })
}

/// Completed purchases and issued certificates that tie the course to its
/// students.
pub async fn count_enrollments(pool: &PgPool, id: i32) -> Result<(i64, i64), String> {
    let query_span = tracing::info_span!("Count course enrollments.");
    sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM purchase WHERE course_id = $1 AND status = 'completed'),
            (SELECT COUNT(*) FROM certificate WHERE course_id = $1)
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to count enrollments, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Deletes the course with its pending and failed checkouts. Lectures,
/// quizzes, progress and bookmarks cascade. Completed purchases and
/// certificates reference the course with `ON DELETE RESTRICT`, so the
/// delete fails while any exist.
#[tracing::instrument(name = "Delete course.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, String> {
    async {
        let mut tx = pool.begin().await?;

        sqlx::query::<Postgres>("DELETE FROM purchase WHERE course_id = $1 AND status <> 'completed';")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query::<Postgres>("DELETE FROM course WHERE id = $1;")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        tx.commit().await?;
        Ok::<_, sqlx::Error>(deleted)
    }
    .await
    .map_err(|err| {
        tracing::error!("Failed to delete course: {:?}", err);
        "Failed to delete course".to_string()
    })
}
