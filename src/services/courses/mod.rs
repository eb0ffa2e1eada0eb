pub mod create;
pub mod details;
pub mod lifecycle;
pub mod list;
pub mod manage;
pub mod statistics;
pub mod thumbnail;

pub use lifecycle::CourseLifecycle;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::media::MediaStore;
use crate::middlewares::RequireCourse;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{
    CourseQueryParams, CourseStatisticsQuery, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
    media: Option<MediaStore>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            media: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_media(&self, request: &HttpRequest) -> MediaStore {
        if let Some(media) = &self.media {
            media.clone()
        } else {
            request
                .app_data::<web::Data<MediaStore>>()
                .expect("MediaStore not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn lifecycle(&self, request: &HttpRequest) -> CourseLifecycle {
        CourseLifecycle::new(self.get_storage(request), self.get_media(request))
    }

    // 首页：分页列出课程
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        body: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, body).await
    }

    // 课程详情
    pub async fn get_course_details(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        with_course(request, |course| details::get_course_details(self, request, course)).await
    }

    // 课程设置
    pub async fn get_course_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        with_course(request, |course| async move {
            manage::get_course_settings(course)
        })
        .await
    }

    // 更新课程设置
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        body: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |course| manage::update_course(self, request, course, body)).await
    }

    // 上传课程缩略图
    pub async fn upload_thumbnail(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |course| {
            thumbnail::upload_thumbnail(self, request, course, payload)
        })
        .await
    }

    // 删除课程
    pub async fn delete_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        with_course(request, |course| manage::delete_course(self, request, course)).await
    }

    // 课程统计
    pub async fn get_course_statistics(
        &self,
        request: &HttpRequest,
        query: CourseStatisticsQuery,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |course| {
            statistics::get_course_statistics(self, request, course, query)
        })
        .await
    }
}

/// 取出 RequireCourse 已加载的课程后执行处理
pub(crate) async fn with_course<F, Fut>(request: &HttpRequest, handler: F) -> ActixResult<HttpResponse>
where
    F: FnOnce(Course) -> Fut,
    Fut: std::future::Future<Output = ActixResult<HttpResponse>>,
{
    match RequireCourse::extract_course(request) {
        Some(course) => handler(course).await,
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
    }
}
