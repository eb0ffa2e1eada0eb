use actix_web::{HttpRequest, HttpResponse, Resource, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireCourse;
use crate::models::grading::requests::{
    CreateGradingSchemeNameRequest, CreateGradingSchemeRequest, UpdateGradingSchemeRequest,
};
use crate::services::GradingService;
use crate::utils::SafePk;

// 懒加载的全局 GradingService 实例
static GRADING_SERVICE: Lazy<GradingService> = Lazy::new(GradingService::new_lazy);

// 列出评分方案名称
pub async fn list_scheme_names(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.list_scheme_names(&req).await
}

// 创建评分方案名称
pub async fn create_scheme_name(
    req: HttpRequest,
    body: web::Json<CreateGradingSchemeNameRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE
        .create_scheme_name(&req, body.into_inner())
        .await
}

// 删除评分方案名称（级联删除区间，清除课程引用）
pub async fn delete_scheme_name(req: HttpRequest, path: SafePk) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.delete_scheme_name(&req, path.0).await
}

// 为课程新增评分区间
pub async fn create_band(
    req: HttpRequest,
    body: web::Json<CreateGradingSchemeRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.create_band(&req, body.into_inner()).await
}

// 查看课程评分区间
pub async fn list_bands(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.list_bands(&req).await
}

// 修改课程评分区间
pub async fn update_band(
    req: HttpRequest,
    body: web::Json<UpdateGradingSchemeRequest>,
) -> ActixResult<HttpResponse> {
    GRADING_SERVICE.update_band(&req, body.into_inner()).await
}

pub(super) fn mount_grading_scheme_create(resource: Resource) -> Resource {
    resource.route(web::post().to(create_band).wrap(RequireCourse))
}

pub(super) fn mount_grading_scheme_update(resource: Resource) -> Resource {
    resource
        .route(web::get().to(list_bands).wrap(RequireCourse))
        .route(web::put().to(update_band).wrap(RequireCourse))
}

pub(super) fn mount_scheme_names(resource: Resource) -> Resource {
    resource
        .route(web::get().to(list_scheme_names))
        .route(web::post().to(create_scheme_name))
}

pub(super) fn mount_scheme_name_delete(resource: Resource) -> Resource {
    resource.route(web::delete().to(delete_scheme_name))
}
