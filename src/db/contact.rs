use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn insert(pool: &PgPool, mut item: models::ContactMessage) -> Result<models::ContactMessage, String> {
    let query_span = tracing::info_span!("Saving contact message into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO contact_message (name, email, subject, message, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id;
        "#,
    )
    .bind(&item.name)
    .bind(&item.email)
    .bind(&item.subject)
    .bind(&item.message)
    .bind(item.created_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        item.id = id;
        item
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::ContactMessage>, String> {
    let query_span = tracing::info_span!("Fetch contact messages.");
    sqlx::query_as::<_, models::ContactMessage>(
        r#"
        SELECT *
        FROM contact_message
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch contact messages, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
