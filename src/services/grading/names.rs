use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradingService;
use crate::models::{
    ApiResponse, ErrorCode,
    grading::{
        entities::GradingSchemeName, requests::CreateGradingSchemeNameRequest,
        responses::GradingSchemeNameListResponse,
    },
};
use crate::services::lms_error_response;

pub async fn list_scheme_names(
    service: &GradingService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_grading_scheme_names().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradingSchemeNameListResponse { items },
            "Grading schemes retrieved successfully",
        ))),
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::InternalServerError,
        )),
    }
}

pub async fn create_scheme_name(
    service: &GradingService,
    request: &HttpRequest,
    body: CreateGradingSchemeNameRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = GradingSchemeName::validate_name(&body.name) {
        return Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::GradingSchemeNameAlreadyExists,
        ));
    }

    let storage = service.get_storage(request);
    match storage.create_grading_scheme_name(&body.name).await {
        Ok(scheme) => {
            info!("Grading scheme {} ({}) created", scheme.id, scheme.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(scheme, "Grading scheme created successfully")))
        }
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::GradingSchemeNameAlreadyExists,
        )),
    }
}

pub async fn delete_scheme_name(
    service: &GradingService,
    request: &HttpRequest,
    scheme_name_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_grading_scheme_name(scheme_name_id).await {
        Ok(Some(deletion)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            deletion,
            "Grading scheme deleted successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradingSchemeNameNotFound,
            "Grading scheme not found",
        ))),
        Err(e) => Ok(lms_error_response(
            &e,
            ErrorCode::InternalServerError,
            ErrorCode::InternalServerError,
        )),
    }
}
