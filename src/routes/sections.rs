use actix_web::{HttpRequest, HttpResponse, Resource, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireCourse;
use crate::models::sections::requests::{CreateSectionRequest, SectionQueryParams};
use crate::services::SectionService;

// 懒加载的全局 SectionService 实例
static SECTION_SERVICE: Lazy<SectionService> = Lazy::new(SectionService::new_lazy);

// 列出分组
pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<SectionQueryParams>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.list_sections(&req, query.into_inner()).await
}

// 创建分组
pub async fn create_section(
    req: HttpRequest,
    body: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    SECTION_SERVICE.create_section(&req, body.into_inner()).await
}

pub(super) fn mount_course_sections(resource: Resource) -> Resource {
    resource
        .route(web::get().to(list_sections).wrap(RequireCourse))
        .route(web::post().to(create_section).wrap(RequireCourse))
}
