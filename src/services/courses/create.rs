use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{entities::check_thumbnail_reference, requests::CreateCourseRequest},
};
use crate::services::lms_error_response;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    body: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();

    // 新课程只能使用默认缩略图，图片在创建后通过上传接口附加
    if let Some(thumbnail) = &body.thumbnail
        && let Err(e) =
            check_thumbnail_reference(thumbnail, None, service.get_media(request).default_thumbnail())
    {
        return Ok(lms_error_response(
            &e,
            ErrorCode::CourseCreationFailed,
            ErrorCode::CourseAlreadyExists,
        ));
    }

    let draft = body.into_draft(&config.course.default_time_zone, chrono::Utc::now());

    match service.lifecycle(request).create(draft).await {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::CourseCreationFailed,
            ErrorCode::CourseAlreadyExists,
        )),
    }
}
