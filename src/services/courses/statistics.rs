use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use super::details::load_scheme_detail;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{
        entities::{Course, CourseSchedule},
        requests::CourseStatisticsQuery,
        responses::CourseStatisticsResponse,
    },
    grading::{
        entities::GradingBands,
        responses::{GradeLookup, GradingSchemeStatistics},
    },
};
use crate::services::lms_error_response;

pub async fn get_course_statistics(
    service: &CourseService,
    request: &HttpRequest,
    course: Course,
    query: CourseStatisticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let schedule = match CourseSchedule::compute(&course, chrono::Utc::now()) {
        Ok(schedule) => schedule,
        Err(e) => {
            return Ok(lms_error_response(
                &e,
                ErrorCode::InternalServerError,
                ErrorCode::InternalServerError,
            ));
        }
    };

    let detail = match course.grading_scheme_id {
        Some(scheme_name_id) => match load_scheme_detail(&storage, scheme_name_id).await {
            Ok(detail) => detail,
            Err(e) => {
                return Ok(lms_error_response(
                    &e,
                    ErrorCode::InternalServerError,
                    ErrorCode::InternalServerError,
                ));
            }
        },
        None => None,
    };

    let (grading, bands) = match detail {
        Some(detail) => {
            let bands = GradingBands::new(detail.bands);
            let stats = GradingSchemeStatistics {
                scheme: detail.scheme,
                coverage: bands.coverage(),
            };
            (Some(stats), bands)
        }
        None => (None, GradingBands::default()),
    };

    let grade_lookup = query.score.map(|score| GradeLookup {
        score,
        grade: bands.grade_for(score).map(str::to_string),
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseStatisticsResponse {
            course_id: course.id,
            schedule,
            grading,
            grade_lookup,
        },
        "Course statistics retrieved successfully",
    )))
}
