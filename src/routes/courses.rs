use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Resource, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireCourse;
use crate::models::courses::requests::{
    CourseQueryParams, CourseStatisticsQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// 首页：课程列表
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

// 创建课程
pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(&req, body.into_inner()).await
}

// 课程详情
pub async fn course_details(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course_details(&req).await
}

// 课程设置
pub async fn course_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course_settings(&req).await
}

// 更新课程设置
pub async fn update_course(
    req: HttpRequest,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.update_course(&req, body.into_inner()).await
}

// 上传课程缩略图
pub async fn upload_thumbnail(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.upload_thumbnail(&req, payload).await
}

// 删除课程
pub async fn delete_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req).await
}

// 课程统计
pub async fn course_statistics(
    req: HttpRequest,
    query: web::Query<CourseStatisticsQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .get_course_statistics(&req, query.into_inner())
        .await
}

pub(super) fn mount_home(resource: Resource) -> Resource {
    resource.route(web::get().to(list_courses))
}

pub(super) fn mount_course_create(resource: Resource) -> Resource {
    resource.route(web::post().to(create_course))
}

pub(super) fn mount_course_details(resource: Resource) -> Resource {
    resource.route(web::get().to(course_details).wrap(RequireCourse))
}

pub(super) fn mount_course_manage(resource: Resource) -> Resource {
    resource
        .route(web::get().to(course_settings).wrap(RequireCourse))
        .route(web::put().to(update_course).wrap(RequireCourse))
        .route(web::post().to(upload_thumbnail).wrap(RequireCourse))
        .route(web::delete().to(delete_course).wrap(RequireCourse))
}

pub(super) fn mount_course_statistics(resource: Resource) -> Resource {
    resource.route(web::get().to(course_statistics).wrap(RequireCourse))
}
