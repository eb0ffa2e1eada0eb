use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::CourseService;
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::{entities::Course, responses::CourseDetailResponse},
    grading::{entities::GradingBands, responses::GradingSchemeDetail},
};
use crate::services::lms_error_response;
use crate::storage::Storage;

pub async fn get_course_details(
    service: &CourseService,
    request: &HttpRequest,
    course: Course,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let grading_scheme = match course.grading_scheme_id {
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

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseDetailResponse {
            course,
            grading_scheme,
        },
        "Course details retrieved successfully",
    )))
}

/// 读取评分方案及其区间（按下界排序）
pub(crate) async fn load_scheme_detail(
    storage: &Arc<dyn Storage>,
    scheme_name_id: i64,
) -> Result<Option<GradingSchemeDetail>> {
    let Some(scheme) = storage.get_grading_scheme_name_by_id(scheme_name_id).await? else {
        return Ok(None);
    };
    let bands = GradingBands::new(storage.list_grading_schemes(scheme_name_id).await?);

    Ok(Some(GradingSchemeDetail {
        scheme,
        bands: bands.into_bands(),
    }))
}
