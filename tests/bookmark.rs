mod common;

use serde_json::{json, Value};

async fn bookmarked_course_ids(app: &common::TestApp, token: &str) -> Vec<i64> {
    let body: Value = app.get("/api/v1/bookmark", Some(token)).await.json().await.unwrap();
    body["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["course_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn add_is_idempotent_and_listed_newest_first() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (first, _) = app.published_course(&instructor.token, 0, 1).await;
    let (second, _) = app.published_course(&instructor.token, 0, 1).await;

    for course_id in [first, second, first] {
        let response = app
            .post("/api/v1/bookmark", Some(&student.token), json!({ "course_id": course_id }))
            .await;
        assert_eq!(201, response.status().as_u16());
    }

    assert_eq!(
        bookmarked_course_ids(&app, &student.token).await,
        vec![second as i64, first as i64]
    );

    let body: Value = app.get("/api/v1/bookmark", Some(&student.token)).await.json().await.unwrap();
    assert_eq!("Rust from scratch", body["list"][0]["title"]);
}

#[tokio::test]
async fn toggling_twice_restores_the_state() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, _) = app.published_course(&instructor.token, 0, 1).await;
    let toggle = format!("/api/v1/bookmark/{}/toggle", course_id);

    let body: Value = app.post(&toggle, Some(&student.token), json!({})).await.json().await.unwrap();
    assert_eq!(true, body["item"]["bookmarked"]);
    assert_eq!(bookmarked_course_ids(&app, &student.token).await, vec![course_id as i64]);

    let body: Value = app.post(&toggle, Some(&student.token), json!({})).await.json().await.unwrap();
    assert_eq!(false, body["item"]["bookmarked"]);
    assert!(bookmarked_course_ids(&app, &student.token).await.is_empty());
}

#[tokio::test]
async fn delete_and_clear() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (first, _) = app.published_course(&instructor.token, 0, 1).await;
    let (second, _) = app.published_course(&instructor.token, 0, 1).await;
    for course_id in [first, second] {
        app.post("/api/v1/bookmark", Some(&student.token), json!({ "course_id": course_id }))
            .await;
    }

    let path = format!("/api/v1/bookmark/{}", first);
    assert_eq!(200, app.delete(&path, &student.token).await.status().as_u16());
    assert_eq!(404, app.delete(&path, &student.token).await.status().as_u16());

    assert_eq!(200, app.delete("/api/v1/bookmark", &student.token).await.status().as_u16());
    assert!(bookmarked_course_ids(&app, &student.token).await.is_empty());
}

#[tokio::test]
async fn unknown_course_cannot_be_bookmarked() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let student = app.signup("student@example.com", "student").await;
    let response = app
        .post("/api/v1/bookmark", Some(&student.token), json!({ "course_id": 4242 }))
        .await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn unpublished_courses_drop_out_of_the_list() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, _) = app.published_course(&instructor.token, 0, 1).await;

    let response = app
        .post("/api/v1/bookmark", Some(&student.token), json!({ "course_id": course_id }))
        .await;
    assert_eq!(201, response.status().as_u16());

    let response = app
        .client
        .patch(app.url(&format!("/api/v1/course/{}/publish?publish=false", course_id)))
        .bearer_auth(&instructor.token)
        .send()
        .await
        .unwrap();
    assert_eq!(200, response.status().as_u16());

    assert!(bookmarked_course_ids(&app, &student.token).await.is_empty());
}
