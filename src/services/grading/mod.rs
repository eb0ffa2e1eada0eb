pub mod bands;
pub mod names;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::grading::requests::{
    CreateGradingSchemeNameRequest, CreateGradingSchemeRequest, UpdateGradingSchemeRequest,
};
use crate::services::courses::with_course;
use crate::storage::Storage;

pub struct GradingService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
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

    // 列出评分方案名称
    pub async fn list_scheme_names(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        names::list_scheme_names(self, request).await
    }

    // 创建评分方案名称
    pub async fn create_scheme_name(
        &self,
        request: &HttpRequest,
        body: CreateGradingSchemeNameRequest,
    ) -> ActixResult<HttpResponse> {
        names::create_scheme_name(self, request, body).await
    }

    // 删除评分方案名称
    pub async fn delete_scheme_name(
        &self,
        request: &HttpRequest,
        scheme_name_id: i64,
    ) -> ActixResult<HttpResponse> {
        names::delete_scheme_name(self, request, scheme_name_id).await
    }

    // 为课程新增评分区间
    pub async fn create_band(
        &self,
        request: &HttpRequest,
        body: CreateGradingSchemeRequest,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |course| bands::create_band(self, request, course, body)).await
    }

    // 查看课程评分方案的全部区间
    pub async fn list_bands(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        with_course(request, |course| bands::list_bands(self, request, course)).await
    }

    // 修改课程评分方案中的区间
    pub async fn update_band(
        &self,
        request: &HttpRequest,
        body: UpdateGradingSchemeRequest,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |course| bands::update_band(self, request, course, body)).await
    }
}
