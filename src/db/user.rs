use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by id.");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT *
        FROM users
        WHERE id=$1
        LIMIT 1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn fetch_by_email(pool: &PgPool, email: &str) -> Result<Option<models::User>, String> {
    let query_span = tracing::info_span!("Fetch user by email.");
    sqlx::query_as::<_, models::User>(
        r#"
        SELECT *
        FROM users
        WHERE email=$1
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch user by email, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn insert(pool: &PgPool, mut user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Saving new user into the database");
    sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO users (name, email, password_hash, role, photo_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id;
        "#,
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.role)
    .bind(&user.photo_url)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |id| {
        user.id = id;
        user
    })
    .map_err(|e| {
        tracing::error!("Failed to execute query: {:?}", e);
        "Failed to insert".to_string()
    })
}

pub async fn update(pool: &PgPool, mut user: models::User) -> Result<models::User, String> {
    let query_span = tracing::info_span!("Updating user");
    sqlx::query_as::<_, models::User>(
        r#"
        UPDATE users
        SET
            name=$2,
            role=$3,
            photo_url=$4,
            updated_at=NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.role)
    .bind(&user.photo_url)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(|result| {
        tracing::info!("User {} has been saved to database", user.id);
        user.updated_at = result.updated_at;
        user
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        "Failed to update user".to_string()
    })
}
