use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::GradingService;
use crate::errors::{LmsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    courses::entities::Course,
    grading::{
        entities::{GradingScheme, GradingSchemeDraft},
        requests::{CreateGradingSchemeRequest, GradingSchemeChanges, UpdateGradingSchemeRequest},
    },
};
use crate::services::courses::details::load_scheme_detail;
use crate::services::lms_error_response;
use crate::storage::Storage;
use crate::utils::validate::{MAX_CHAR_FIELD_LENGTH, validate_char_field, validate_score_range};

pub async fn create_band(
    service: &GradingService,
    request: &HttpRequest,
    course: Course,
    body: CreateGradingSchemeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 未指定方案时使用课程当前的评分方案
    let Some(scheme_name_id) = body.scheme_name_id.or(course.grading_scheme_id) else {
        return Ok(not_assigned());
    };

    // 已有评分方案的课程只能向自身方案添加区间
    if let Some(current) = course.grading_scheme_id
        && current != scheme_name_id
    {
        return Ok(failure(&LmsError::validation(format!(
            "scheme_name_id: course uses grading scheme {current}"
        ))));
    }

    match storage.get_grading_scheme_name_by_id(scheme_name_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradingSchemeNameNotFound,
                "Grading scheme not found",
            )));
        }
        Err(e) => return Ok(failure(&e)),
    }

    let draft = match build_draft(scheme_name_id, body) {
        Ok(draft) => draft,
        Err(e) => return Ok(failure(&e)),
    };

    let band = match storage.create_grading_scheme(draft).await {
        Ok(band) => band,
        Err(e) => return Ok(failure(&e)),
    };

    if course.grading_scheme_id.is_none()
        && let Err(e) = assign_scheme(&storage, &course, scheme_name_id).await
    {
        return Ok(failure(&e));
    }

    info!(
        "Grade band {} [{}, {}) added to grading scheme {} via course {}",
        band.grade, band.score_range_begin, band.score_range_end, scheme_name_id, course.id
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(band, "Grade band created successfully")))
}

pub async fn list_bands(
    service: &GradingService,
    request: &HttpRequest,
    course: Course,
) -> ActixResult<HttpResponse> {
    let Some(scheme_name_id) = course.grading_scheme_id else {
        return Ok(not_assigned());
    };

    let storage = service.get_storage(request);
    match load_scheme_detail(&storage, scheme_name_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Grading scheme retrieved successfully",
        ))),
        Ok(None) => Ok(not_assigned()),
        Err(e) => Ok(failure(&e)),
    }
}

pub async fn update_band(
    service: &GradingService,
    request: &HttpRequest,
    course: Course,
    body: UpdateGradingSchemeRequest,
) -> ActixResult<HttpResponse> {
    let Some(scheme_name_id) = course.grading_scheme_id else {
        return Ok(not_assigned());
    };

    let storage = service.get_storage(request);

    // 只能修改课程自身评分方案下的区间
    let band = match storage.get_grading_scheme_by_id(body.id).await {
        Ok(Some(band)) if band.scheme_name_id == scheme_name_id => band,
        Ok(_) => return Ok(band_not_found()),
        Err(e) => return Ok(failure(&e)),
    };

    let changes = match build_changes(&band, body) {
        Ok(changes) => changes,
        Err(e) => return Ok(failure(&e)),
    };

    match storage.update_grading_scheme(band.id, changes).await {
        Ok(Some(band)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            band,
            "Grade band updated successfully",
        ))),
        Ok(None) => Ok(band_not_found()),
        Err(e) => Ok(failure(&e)),
    }
}

/// 先做区间校验，再检查必填字段
fn build_draft(scheme_name_id: i64, body: CreateGradingSchemeRequest) -> Result<GradingSchemeDraft> {
    validate_score_range(body.score_range_begin, body.score_range_end)?;

    let score_range_begin = body
        .score_range_begin
        .ok_or_else(|| LmsError::validation("score_range_begin: this field is required"))?;
    let score_range_end = body
        .score_range_end
        .ok_or_else(|| LmsError::validation("score_range_end: this field is required"))?;

    let draft = GradingSchemeDraft {
        scheme_name_id,
        grade: body.grade,
        score_range_begin,
        score_range_end,
    };
    draft.validate()?;
    Ok(draft)
}

/// 将部分更新与当前值合并后校验
fn build_changes(band: &GradingScheme, body: UpdateGradingSchemeRequest) -> Result<GradingSchemeChanges> {
    if let Some(grade) = &body.grade {
        validate_char_field("grade", grade, MAX_CHAR_FIELD_LENGTH)?;
    }
    validate_score_range(
        Some(body.score_range_begin.unwrap_or(band.score_range_begin)),
        Some(body.score_range_end.unwrap_or(band.score_range_end)),
    )?;

    Ok(GradingSchemeChanges {
        grade: body.grade,
        score_range_begin: body.score_range_begin,
        score_range_end: body.score_range_end,
    })
}

async fn assign_scheme(storage: &Arc<dyn Storage>, course: &Course, scheme_name_id: i64) -> Result<()> {
    let mut draft = course.to_draft();
    draft.grading_scheme_id = Some(scheme_name_id);
    storage.update_course(course.id, draft).await?;
    info!("Course {} now uses grading scheme {}", course.id, scheme_name_id);
    Ok(())
}

fn failure(e: &LmsError) -> HttpResponse {
    lms_error_response(e, ErrorCode::InternalServerError, ErrorCode::InternalServerError)
}

fn not_assigned() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::GradingSchemeNotAssigned,
        "Course has no grading scheme",
    ))
}

fn band_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradingSchemeNotFound,
        "Grade band not found in this course's grading scheme",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(begin: Option<i16>, end: Option<i16>) -> CreateGradingSchemeRequest {
        CreateGradingSchemeRequest {
            scheme_name_id: None,
            grade: "A".to_string(),
            score_range_begin: begin,
            score_range_end: end,
        }
    }

    #[test]
    fn test_build_draft_reports_range_before_missing_fields() {
        assert!(matches!(
            build_draft(1, request(Some(90), Some(80))),
            Err(LmsError::ScoreRange(_))
        ));
        assert!(matches!(
            build_draft(1, request(Some(90), None)),
            Err(LmsError::Validation(_))
        ));
        let draft = build_draft(1, request(Some(0), Some(0))).unwrap();
        assert_eq!((draft.score_range_begin, draft.score_range_end), (0, 0));
    }

    #[test]
    fn test_build_changes_checks_merged_range() {
        let band = GradingScheme {
            id: 1,
            scheme_name_id: 1,
            grade: "B".to_string(),
            score_range_begin: 80,
            score_range_end: 90,
        };
        let lower_end = UpdateGradingSchemeRequest {
            id: 1,
            grade: None,
            score_range_begin: None,
            score_range_end: Some(70),
        };
        assert!(matches!(
            build_changes(&band, lower_end),
            Err(LmsError::ScoreRange(_))
        ));

        let rename = UpdateGradingSchemeRequest {
            id: 1,
            grade: Some("B+".to_string()),
            score_range_begin: None,
            score_range_end: None,
        };
        let changes = build_changes(&band, rename).unwrap();
        assert_eq!(changes.grade.as_deref(), Some("B+"));
    }
}
