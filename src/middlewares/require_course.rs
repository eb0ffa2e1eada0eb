/*!
 * 课程加载中间件
 *
 * 用于 `/course/{pk}/...` 下的路由：解析 `pk`，从存储中读取课程并放入请求扩展，
 * 课程不存在时直接返回 404，处理器无需重复查询。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::web;
 * use crate::middlewares::RequireCourse;
 *
 * web::resource("/course/{pk:[0-9]+}/details/")
 *     .route(web::get().to(course_details).wrap(RequireCourse));
 *
 * // 处理器中
 * let course = RequireCourse::extract_course(&req);
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::error;

use crate::{
    models::{ErrorCode, courses::entities::Course},
    storage::Storage,
    utils::SafePk,
};

use super::create_error_response;

#[derive(Clone, Copy, Default)]
pub struct RequireCourse;

impl<S, B> Transform<S, ServiceRequest> for RequireCourse
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireCourseMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireCourseMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            // 1. 校验 pk
            let pk = match SafePk::parse(req.match_info().get("pk")) {
                Ok(SafePk(pk)) => pk,
                Err(msg) => {
                    return Ok(req.into_response(
                        create_error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &msg)
                            .map_into_right_body(),
                    ));
                }
            };

            // 2. 获取存储
            let storage = match req.app_data::<web::Data<Arc<dyn Storage>>>() {
                Some(storage) => storage.get_ref().clone(),
                None => {
                    error!("Storage not found in app data");
                    return Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Storage unavailable",
                        )
                        .map_into_right_body(),
                    ));
                }
            };

            // 3. 查询课程
            match storage.get_course_by_id(pk).await {
                Ok(Some(course)) => {
                    req.extensions_mut().insert(course);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Ok(None) => Ok(req.into_response(
                    create_error_response(
                        StatusCode::NOT_FOUND,
                        ErrorCode::CourseNotFound,
                        "Course not found",
                    )
                    .map_into_right_body(),
                )),
                Err(e) => {
                    error!("Failed to load course {}: {}", pk, e);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Failed to load course",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireCourse {
    /// 从请求扩展中取出已加载的课程
    /// 仅在应用了 RequireCourse 中间件的路由中可用
    pub fn extract_course(req: &actix_web::HttpRequest) -> Option<Course> {
        req.extensions().get::<Course>().cloned()
    }
}
