mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn register_login_and_profile() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.register("Ada Lovelace", "Ada@Example.com").await;
    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("ada@example.com", body["item"]["email"]);
    assert_eq!("student", body["item"]["role"]);
    assert!(body["item"].get("password_hash").is_none());

    let response = app.login("ada@example.com", common::PASSWORD).await;
    assert_eq!(200, response.status().as_u16());
    let cookies: Vec<String> = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("access_token=") && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));

    let body: Value = response.json().await.unwrap();
    let token = body["item"]["access_token"].as_str().unwrap();

    let response = app.get("/api/v1/user/profile", Some(token)).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Ada Lovelace", body["item"]["name"]);
    assert_eq!(0, body["item"]["enrolled_courses"].as_array().unwrap().len());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    assert_eq!(201, app.register("Ada", "ada@example.com").await.status().as_u16());
    assert_eq!(409, app.register("Ada Again", "ADA@example.com").await.status().as_u16());
}

#[tokio::test]
async fn invalid_registration_is_rejected() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app
        .post(
            "/api/v1/user/register",
            None,
            json!({ "name": "Ada", "email": "not-an-email", "password": "short" }),
        )
        .await;
    assert_eq!(422, response.status().as_u16());
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    app.register("Ada", "ada@example.com").await;
    let response = app.login("ada@example.com", "wrong password").await;
    assert_eq!(401, response.status().as_u16());

    let response = app.login("nobody@example.com", common::PASSWORD).await;
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn profile_requires_authentication() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let response = app.get("/api/v1/user/profile", None).await;
    assert_eq!(401, response.status().as_u16());

    let response = app.get("/api/v1/user/profile", Some("not-a-jwt")).await;
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn refresh_is_throttled() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    app.register("Ada", "ada@example.com").await;
    let response = app.login("ada@example.com", common::PASSWORD).await;
    let body: Value = response.json().await.unwrap();
    let refresh_token = body["item"]["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/api/v1/user/refresh-token",
            None,
            json!({ "refresh_token": refresh_token }),
        )
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let access_token = body["access_token"].as_str().unwrap();
    assert_eq!(
        200,
        app.get("/api/v1/user/profile", Some(access_token)).await.status().as_u16()
    );

    let response = app
        .post(
            "/api/v1/user/refresh-token",
            None,
            json!({ "refresh_token": refresh_token }),
        )
        .await;
    assert_eq!(429, response.status().as_u16());
}

#[tokio::test]
async fn access_token_cannot_refresh() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let user = app.signup("ada@example.com", "student").await;
    let response = app
        .post(
            "/api/v1/user/refresh-token",
            None,
            json!({ "refresh_token": user.token }),
        )
        .await;
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn admin_changes_roles() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let admin = app.signup("admin@example.com", "admin").await;
    let student = app.signup("student@example.com", "student").await;

    let response = app
        .client
        .put(app.url(&format!("/api/v1/admin/user/{}/role", student.id)))
        .bearer_auth(&student.token)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(403, response.status().as_u16());

    let response = app
        .client
        .put(app.url(&format!("/api/v1/admin/user/{}/role", student.id)))
        .bearer_auth(&admin.token)
        .json(&json!({ "role": "instructor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(200, response.status().as_u16());

    // the role is read from the database on every request
    let response = app
        .post(
            "/api/v1/course",
            Some(&student.token),
            json!({ "title": "Intro", "category": "Programming" }),
        )
        .await;
    assert_eq!(201, response.status().as_u16());
}
