//! Lookups shared by handlers that act on a course.

use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::Error;
use sqlx::PgPool;

pub(crate) async fn fetch_course(pool: &PgPool, course_id: i32) -> Result<models::Course, Error> {
    db::course::fetch(pool, course_id)
        .await
        .map_err(|err| JsonResponse::<models::Course>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Course>::build().not_found("Course not found"))
}

/// A course as seen by `user`: unpublished courses exist only for their
/// creator and admins.
pub(crate) async fn fetch_visible_course(
    pool: &PgPool,
    course_id: i32,
    user: Option<&models::User>,
) -> Result<models::Course, Error> {
    let course = fetch_course(pool, course_id).await?;
    let can_manage = user.map_or(false, |user| can_manage(&course, user));
    if !course.is_published && !can_manage {
        return Err(JsonResponse::<models::Course>::build().not_found("Course not found"));
    }

    Ok(course)
}

/// A course the user is allowed to edit.
pub(crate) async fn fetch_managed_course(
    pool: &PgPool,
    course_id: i32,
    user: &models::User,
) -> Result<models::Course, Error> {
    let course = fetch_course(pool, course_id).await?;
    if !can_manage(&course, user) {
        return Err(JsonResponse::<models::Course>::build()
            .forbidden("Only the course creator can change this course"));
    }

    Ok(course)
}

pub(crate) fn can_manage(course: &models::Course, user: &models::User) -> bool {
    course.is_owned_by(user.id) || user.is_admin()
}

pub(crate) async fn is_enrolled(pool: &PgPool, user_id: i32, course_id: i32) -> Result<bool, Error> {
    db::purchase::is_enrolled(pool, user_id, course_id)
        .await
        .map_err(|err| JsonResponse::<models::Purchase>::build().internal_server_error(err))
}

/// Enrolled users and whoever manages the course see the full content.
pub(crate) async fn has_content_access(
    pool: &PgPool,
    course: &models::Course,
    user: &models::User,
) -> Result<bool, Error> {
    if can_manage(course, user) {
        return Ok(true);
    }
    is_enrolled(pool, user.id, course.id).await
}

/// Like [`has_content_access`] but answers 403 when access is missing.
pub(crate) async fn require_content_access(
    pool: &PgPool,
    course: &models::Course,
    user: &models::User,
) -> Result<(), Error> {
    if has_content_access(pool, course, user).await? {
        Ok(())
    } else {
        Err(JsonResponse::<models::Course>::build().forbidden("You are not enrolled in this course"))
    }
}
