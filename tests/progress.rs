mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn viewing_every_lecture_completes_the_course() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, lectures) = app.published_course(&instructor.token, 0, 2).await;
    let progress_path = format!("/api/v1/progress/{}", course_id);

    // not enrolled yet
    assert_eq!(403, app.get(&progress_path, Some(&student.token)).await.status().as_u16());
    app.enroll_free(&student.token, course_id).await;

    let body: Value = app.get(&progress_path, Some(&student.token)).await.json().await.unwrap();
    assert_eq!(false, body["item"]["completed"]);
    assert_eq!(0, body["item"]["viewed_lecture_ids"].as_array().unwrap().len());

    let view = |lecture_id: i32| format!("/api/v1/progress/{}/lecture/{}/view", course_id, lecture_id);

    let body: Value = app
        .post(&view(lectures[0]), Some(&student.token), json!({}))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(false, body["item"]["completed"]);

    let response = app.post(&view(lectures[1]), Some(&student.token), json!({})).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(true, body["item"]["completed"]);
    assert_eq!(2, body["item"]["viewed_lecture_ids"].as_array().unwrap().len());
}

#[tokio::test]
async fn lecture_must_belong_to_the_course() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, _) = app.published_course(&instructor.token, 0, 1).await;
    let (_, other_lectures) = app.published_course(&instructor.token, 0, 1).await;
    app.enroll_free(&student.token, course_id).await;

    let response = app
        .post(
            &format!("/api/v1/progress/{}/lecture/{}/view", course_id, other_lectures[0]),
            Some(&student.token),
            json!({}),
        )
        .await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn complete_and_incomplete_toggle_everything() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, _) = app.published_course(&instructor.token, 0, 3).await;
    app.enroll_free(&student.token, course_id).await;

    let response = app
        .post(
            &format!("/api/v1/progress/{}/complete", course_id),
            Some(&student.token),
            json!({}),
        )
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(true, body["item"]["completed"]);
    assert_eq!(3, body["item"]["viewed_lecture_ids"].as_array().unwrap().len());

    let response = app
        .post(
            &format!("/api/v1/progress/{}/incomplete", course_id),
            Some(&student.token),
            json!({}),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(false, body["item"]["completed"]);
    assert_eq!(0, body["item"]["viewed_lecture_ids"].as_array().unwrap().len());
}
