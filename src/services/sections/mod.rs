pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::models::sections::requests::{CreateSectionRequest, SectionQueryParams};
use crate::services::courses::with_course;
use crate::storage::Storage;

pub struct SectionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SectionService {
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

    // 列出分组
    pub async fn list_sections(
        &self,
        request: &HttpRequest,
        query: SectionQueryParams,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |_| list::list_sections(self, request, query)).await
    }

    // 创建分组
    pub async fn create_section(
        &self,
        request: &HttpRequest,
        body: CreateSectionRequest,
    ) -> ActixResult<HttpResponse> {
        with_course(request, |_| create::create_section(self, request, body)).await
    }
}
