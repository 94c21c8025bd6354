mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn students_cannot_create_courses() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let student = app.signup("student@example.com", "student").await;
    let response = app
        .post(
            "/api/v1/course",
            Some(&student.token),
            json!({ "title": "Intro", "category": "Programming" }),
        )
        .await;
    assert_eq!(403, response.status().as_u16());

    let response = app
        .post(
            "/api/v1/course",
            None,
            json!({ "title": "Intro", "category": "Programming" }),
        )
        .await;
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn unpublished_course_is_visible_to_its_creator_only() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let course_id = app.create_course(&instructor.token, "Draft", 0).await;
    let path = format!("/api/v1/course/{}", course_id);

    assert_eq!(200, app.get(&path, Some(&instructor.token)).await.status().as_u16());
    assert_eq!(404, app.get(&path, Some(&student.token)).await.status().as_u16());
    assert_eq!(404, app.get(&path, None).await.status().as_u16());

    let response = app.get("/api/v1/course", Some(&instructor.token)).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(1, body["list"].as_array().unwrap().len());
}

#[tokio::test]
async fn publishing_requires_a_lecture() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let course_id = app.create_course(&instructor.token, "Empty", 0).await;

    assert_eq!(400, app.publish(&instructor.token, course_id).await.status().as_u16());

    app.add_lecture(&instructor.token, course_id, "Welcome", 0).await;
    assert_eq!(200, app.publish(&instructor.token, course_id).await.status().as_u16());

    let response = app.get("/api/v1/course/published-courses", None).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let list = body["list"].as_array().unwrap();
    assert_eq!(1, list.len());
    assert_eq!("Test User", list[0]["creator_name"]);
}

#[tokio::test]
async fn only_the_creator_edits_a_course() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let owner = app.signup("owner@example.com", "instructor").await;
    let other = app.signup("other@example.com", "instructor").await;
    let course_id = app.create_course(&owner.token, "Mine", 100).await;
    let path = format!("/api/v1/course/{}", course_id);
    let update = json!({ "title": "Renamed", "category": "Design" });

    let response = app
        .client
        .put(app.url(&path))
        .bearer_auth(&other.token)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(403, response.status().as_u16());

    let response = app
        .client
        .put(app.url(&path))
        .bearer_auth(&owner.token)
        .json(&update)
        .send()
        .await
        .unwrap();
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Renamed", body["item"]["title"]);
    assert_eq!(100, body["item"]["price"]);

    assert_eq!(403, app.delete(&path, &other.token).await.status().as_u16());
    assert_eq!(200, app.delete(&path, &owner.token).await.status().as_u16());
    assert_eq!(404, app.get(&path, Some(&owner.token)).await.status().as_u16());
}

#[tokio::test]
async fn search_filters_and_sorts() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    for (title, category, price) in [
        ("Rust Basics", "Programming", 500),
        ("Advanced Rust", "Programming", 100),
        ("Rusty Watercolours", "Art", 300),
    ] {
        let response = app
            .post(
                "/api/v1/course",
                Some(&instructor.token),
                json!({ "title": title, "category": category, "price": price }),
            )
            .await;
        let body: Value = response.json().await.unwrap();
        let course_id = body["id"].as_i64().unwrap() as i32;
        app.add_lecture(&instructor.token, course_id, "Intro", 0).await;
        app.publish(&instructor.token, course_id).await;
    }
    app.create_course(&instructor.token, "Rust Draft", 0).await;

    let response = app
        .get("/api/v1/course/search?query=rust&sort_by_price=low", None)
        .await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let titles: Vec<&str> = body["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|course| course["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Advanced Rust", "Rusty Watercolours", "Rust Basics"]);

    let response = app
        .get("/api/v1/course/search?query=rust&categories=Art", None)
        .await;
    let body: Value = response.json().await.unwrap();
    let list = body["list"].as_array().unwrap();
    assert_eq!(1, list.len());
    assert_eq!("Rusty Watercolours", list[0]["title"]);
}

#[tokio::test]
async fn lecture_videos_are_locked_without_enrollment() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let course_id = app.create_course(&instructor.token, "Paid", 499).await;
    app.add_lecture(&instructor.token, course_id, "Second", 1).await;
    let response = app
        .post(
            &format!("/api/v1/course/{}/lecture", course_id),
            Some(&instructor.token),
            json!({
                "title": "Preview",
                "video_url": "https://videos.example.com/preview.mp4",
                "is_preview_free": true,
                "position": 0,
            }),
        )
        .await;
    assert_eq!(201, response.status().as_u16());
    app.publish(&instructor.token, course_id).await;

    let path = format!("/api/v1/course/{}/lecture", course_id);
    let body: Value = app.get(&path, Some(&student.token)).await.json().await.unwrap();
    let lectures = body["list"].as_array().unwrap();
    assert_eq!("Preview", lectures[0]["title"]);
    assert!(lectures[0]["video_url"].is_string());
    assert_eq!("Second", lectures[1]["title"]);
    assert!(lectures[1]["video_url"].is_null());

    let body: Value = app.get(&path, Some(&instructor.token)).await.json().await.unwrap();
    assert!(body["list"][1]["video_url"].is_string());
}

#[tokio::test]
async fn deleting_the_last_lecture_unpublishes_the_course() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let (course_id, lecture_ids) = app.published_course(&instructor.token, 0, 2).await;
    let course_path = format!("/api/v1/course/{}", course_id);
    let lecture_path = |id: i32| format!("/api/v1/course/{}/lecture/{}", course_id, id);

    let response = app.delete(&lecture_path(lecture_ids[0]), &instructor.token).await;
    assert_eq!(200, response.status().as_u16());
    assert_eq!(200, app.get(&course_path, None).await.status().as_u16());

    let response = app.delete(&lecture_path(lecture_ids[1]), &instructor.token).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!("Lecture deleted, course unpublished", body["message"]);

    assert_eq!(404, app.get(&course_path, None).await.status().as_u16());
    let body: Value = app
        .get("/api/v1/course/published-courses", None)
        .await
        .json()
        .await
        .unwrap();
    assert!(body["list"].as_array().unwrap().is_empty());

    let body: Value = app
        .get(&course_path, Some(&instructor.token))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(false, body["item"]["is_published"]);

    assert_eq!(
        404,
        app.delete(&lecture_path(lecture_ids[1]), &instructor.token)
            .await
            .status()
            .as_u16()
    );
}

#[tokio::test]
async fn course_with_students_cannot_be_deleted() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, _) = app.published_course(&instructor.token, 0, 1).await;
    app.enroll_free(&student.token, course_id).await;
    app.post(
        &format!("/api/v1/progress/{}/complete", course_id),
        Some(&student.token),
        json!({}),
    )
    .await;
    let body: Value = app
        .post(&format!("/api/v1/certificate/{}", course_id), Some(&student.token), json!({}))
        .await
        .json()
        .await
        .unwrap();
    let certificate_id = body["item"]["id"].as_str().unwrap().to_string();

    let course_path = format!("/api/v1/course/{}", course_id);
    assert_eq!(409, app.delete(&course_path, &instructor.token).await.status().as_u16());

    let purchases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchase WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(1, purchases);

    let verify = format!("/api/v1/certificate/verify/{}", certificate_id);
    assert_eq!(200, app.get(&verify, None).await.status().as_u16());
    let pdf = std::path::Path::new(&app.settings.certificates.storage_dir)
        .join(format!("{}.pdf", certificate_id));
    assert!(pdf.is_file());
}

#[tokio::test]
async fn pending_checkouts_go_with_the_course() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let student = app.signup("student@example.com", "student").await;
    let (course_id, _) = app.published_course(&instructor.token, 499, 1).await;

    let response = app
        .post(
            "/api/v1/purchase/checkout",
            Some(&student.token),
            json!({ "course_id": course_id }),
        )
        .await;
    assert_eq!(201, response.status().as_u16());

    let course_path = format!("/api/v1/course/{}", course_id);
    assert_eq!(200, app.delete(&course_path, &instructor.token).await.status().as_u16());

    let purchases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM purchase WHERE course_id = $1")
        .bind(course_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(0, purchases);
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };

    let instructor = app.signup("instructor@example.com", "instructor").await;
    let response = app
        .post(
            "/api/v1/course",
            Some(&instructor.token),
            json!({ "title": "    ", "category": "Programming" }),
        )
        .await;
    assert_eq!(422, response.status().as_u16());
}
