use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SectionService;
use crate::models::{ApiResponse, ErrorCode, sections::requests::SectionQueryParams};
use crate::services::lms_error_response;

pub async fn list_sections(
    service: &SectionService,
    request: &HttpRequest,
    query: SectionQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_sections_with_pagination(query.pagination).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Section list retrieved successfully",
        ))),
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::InternalServerError,
        )),
    }
}
