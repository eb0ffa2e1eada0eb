use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::CourseService;
use crate::media::MediaStore;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{entities::Course, requests::UpdateCourseRequest},
};
use crate::services::lms_error_response;

pub fn get_course_settings(course: Course) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course settings retrieved successfully",
    )))
}

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course: Course,
    body: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let media = service.get_media(request);
    let draft = match course.to_draft().merge(body, media.default_thumbnail()) {
        Ok(draft) => draft,
        Err(e) => {
            return Ok(lms_error_response(
                &e,
                ErrorCode::CourseUpdateFailed,
                ErrorCode::CourseAlreadyExists,
            ));
        }
    };

    match service.lifecycle(request).update(course.id, draft).await {
        Ok(Some(updated)) => {
            // 缩略图被重置时清理原文件
            if updated.thumbnail != course.thumbnail {
                discard_thumbnail(&media, &course.thumbnail);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Course updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::CourseUpdateFailed,
            ErrorCode::CourseAlreadyExists,
        )),
    }
}

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course: Course,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_course(course.id).await {
        Ok(true) => {
            discard_thumbnail(&service.get_media(request), &course.thumbnail);
            info!("Course {} ({}) deleted", course.id, course.title);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            error!("Failed to delete course {}: {}", course.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::CourseDeleteFailed,
                    format!("Failed to delete course: {e}"),
                )),
            )
        }
    }
}

// 默认引用与已不存在的文件由 MediaStore::remove 忽略
fn discard_thumbnail(media: &MediaStore, reference: &str) {
    if let Err(e) = media.remove(reference) {
        warn!("Failed to remove thumbnail {}: {}", reference, e);
    }
}
