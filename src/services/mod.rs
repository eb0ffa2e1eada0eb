pub mod accounts;
pub mod courses;
pub mod dashboard;
pub mod grading;
pub mod sections;

pub use accounts::AccountService;
pub use courses::{CourseLifecycle, CourseService};
pub use dashboard::DashboardService;
pub use grading::GradingService;
pub use sections::SectionService;

use actix_web::HttpResponse;
use tracing::{debug, error};

use crate::errors::LmsError;
use crate::models::{ApiResponse, ErrorCode, common::FieldError};

/// 将字段校验错误转换为字段级反馈
pub(crate) fn field_error(err: &LmsError) -> FieldError {
    let (field, message) = match err {
        LmsError::ScoreRange(msg) => ("score_range_end", msg.as_str()),
        LmsError::DateRange(msg) => ("start_date", msg.as_str()),
        other => other
            .message()
            .split_once(": ")
            .unwrap_or(("__all__", other.message())),
    };

    let error_type = match err {
        LmsError::ScoreRange(_) => "range_error",
        LmsError::DateRange(_) => "date_range_error",
        _ => "invalid",
    };

    FieldError {
        field: field.to_string(),
        error_type: error_type.to_string(),
        message: message.to_string(),
    }
}

/// 业务错误到 HTTP 响应的统一映射
///
/// `failure` 用于无法归类的存储故障，`conflict` 用于唯一约束冲突。
pub(crate) fn lms_error_response(
    err: &LmsError,
    failure: ErrorCode,
    conflict: ErrorCode,
) -> HttpResponse {
    match err {
        LmsError::Validation(_) | LmsError::ScoreRange(_) | LmsError::DateRange(_) => {
            debug!("Validation rejected: {}", err);
            let code = match err {
                LmsError::ScoreRange(_) => ErrorCode::GradingSchemeRangeInvalid,
                LmsError::DateRange(_) => ErrorCode::CourseDateRangeInvalid,
                _ => ErrorCode::ValidationFailed,
            };
            HttpResponse::BadRequest().json(ApiResponse::error(
                code,
                vec![field_error(err)],
                err.message(),
            ))
        }
        LmsError::ImageDecode(msg) => {
            error!("{}", err);
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ThumbnailDecodeFailed,
                format!("Thumbnail could not be decoded: {msg}"),
            ))
        }
        LmsError::Conflict(msg) => {
            debug!("Unique constraint violated: {}", msg);
            HttpResponse::Conflict().json(ApiResponse::error_empty(
                conflict,
                "A record with the same unique value already exists",
            ))
        }
        LmsError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        _ => {
            error!("{}", err);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                failure,
                format!("Internal error: {}", err.message()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_field_error_from_validation_message() {
        let fe = field_error(&LmsError::validation("title: this field is required"));
        assert_eq!(fe.field, "title");
        assert_eq!(fe.message, "this field is required");

        let fe = field_error(&LmsError::score_range("end < begin"));
        assert_eq!(fe.field, "score_range_end");
        assert_eq!(fe.error_type, "range_error");
    }

    #[test]
    fn test_status_mapping() {
        let resp = lms_error_response(
            &LmsError::date_range("bad"),
            ErrorCode::CourseUpdateFailed,
            ErrorCode::CourseAlreadyExists,
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = lms_error_response(
            &LmsError::conflict("courses.title"),
            ErrorCode::CourseUpdateFailed,
            ErrorCode::CourseAlreadyExists,
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = lms_error_response(
            &LmsError::database_operation("disk I/O error"),
            ErrorCode::CourseUpdateFailed,
            ErrorCode::CourseAlreadyExists,
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
