use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SectionService;
use crate::models::{ApiResponse, ErrorCode, sections::requests::CreateSectionRequest};
use crate::services::lms_error_response;

pub async fn create_section(
    service: &SectionService,
    request: &HttpRequest,
    body: CreateSectionRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = body.validate() {
        return Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::SectionAlreadyExists,
        ));
    }

    let storage = service.get_storage(request);
    match storage.create_section(&body.name).await {
        Ok(section) => {
            info!("Section {} ({}) created", section.id, section.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(section, "Section created successfully")))
        }
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::SectionAlreadyExists,
        )),
    }
}
