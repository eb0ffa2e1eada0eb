use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::DashboardService;
use crate::errors::Result;
use crate::models::{ApiResponse, ErrorCode, dashboard::responses::DashboardHomeResponse};
use crate::services::lms_error_response;

// 每个分组最多展示的课程数
const SECTION_LIMIT: u64 = 10;

pub async fn dashboard_home(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match build_home(service, request).await {
        Ok(home) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            home,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::InternalServerError,
        )),
    }
}

async fn build_home(service: &DashboardService, request: &HttpRequest) -> Result<DashboardHomeResponse> {
    let storage = service.get_storage(request);
    let now = Utc::now();

    Ok(DashboardHomeResponse {
        running: storage.list_running_courses(now, SECTION_LIMIT).await?,
        upcoming: storage.list_upcoming_courses(now, SECTION_LIMIT).await?,
        open_enrollment: storage
            .list_open_enrollment_courses(now, SECTION_LIMIT)
            .await?,
        generated_at: now,
    })
}
