use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_order(pool: &PgPool, order_id: &str) -> Result<Option<models::Purchase>, String> {
    let query_span = tracing::info_span!("Fetch purchase by gateway order id.");
    sqlx::query_as::<_, models::Purchase>(
        r#"
        SELECT *
        FROM purchase
        WHERE order_id=$1
        LIMIT 1
        "#,
    )
    .bind(order_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch purchase, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn is_enrolled(pool: &PgPool, user_id: i32, course_id: i32) -> Result<bool, String> {
    let query_span = tracing::info_span!("Check completed purchase.");
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM purchase
            WHERE user_id=$1
            AND course_id=$2
            AND status='completed'
        )
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to check enrollment, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<models::PurchaseWithCourse>, String> {
    let query_span = tracing::info_span!("Fetch purchases by user.");
    sqlx::query_as::<_, models::PurchaseWithCourse>(
        r#"
        SELECT p.*, c.title AS course_title, c.thumbnail_url AS course_thumbnail_url
        FROM purchase p
        INNER JOIN course c ON c.id = p.course_id
        WHERE p.user_id=$1
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch purchases, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::PurchaseWithCourse>, String> {
    let query_span = tracing::info_span!("Fetch all purchases.");
    sqlx::query_as::<_, models::PurchaseWithCourse>(
        r#"
        SELECT p.*, c.title AS course_title, c.thumbnail_url AS course_thumbnail_url
        FROM purchase p
        INNER JOIN course c ON c.id = p.course_id
        ORDER BY p.created_at DESC, p.id DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch purchases, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Returns `None` when the row conflicts with an existing one: the order id
/// is taken, or the user already has a completed purchase for the course.
pub async fn insert(pool: &PgPool, mut purchase: models::Purchase) -> Result<Option<models::Purchase>, String> {
    let query_span = tracing::info_span!("Saving new purchase into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO purchase (course_id, user_id, amount, currency, status, order_id, payment_id,
            created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT DO NOTHING
        RETURNING id;
        "#,
    )
    .bind(purchase.course_id)
    .bind(purchase.user_id)
    .bind(purchase.amount)
    .bind(&purchase.currency)
    .bind(&purchase.status)
    .bind(&purchase.order_id)
    .bind(&purchase.payment_id)
    .bind(purchase.created_at)
    .bind(purchase.updated_at)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        id.map(|id| {
            purchase.id = id;
            purchase
        })
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

/// Moves a purchase to a new status. Completed purchases never change again.
pub async fn set_status(
    pool: &PgPool,
    id: i32,
    status: models::PurchaseStatus,
    payment_id: Option<&str>,
) -> Result<Option<models::Purchase>, String> {
    let query_span = tracing::info_span!("Updating purchase status");
    sqlx::query_as::<_, models::Purchase>(
        r#"
        UPDATE purchase
        SET
            status=$2,
            payment_id=COALESCE($3, payment_id),
            updated_at=NOW()
        WHERE id = $1
        AND status <> 'completed'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(status.to_string())
    .bind(payment_id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update purchase".to_string()
    })
}
