//! 分组存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::sections::{ActiveModel, Column, Entity as Sections};
use crate::errors::Result;
use crate::models::{
    PaginationInfo, PaginationQuery,
    sections::{entities::Section, responses::SectionListResponse},
};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建分组
    pub async fn create_section_impl(&self, name: &str) -> Result<Section> {
        let model = ActiveModel {
            name: Set(name.trim().to_string()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create section"))?;

        Ok(result.into_section())
    }

    /// 分页列出分组，按名称升序
    pub async fn list_sections_with_pagination_impl(
        &self,
        query: PaginationQuery,
    ) -> Result<SectionListResponse> {
        let (page, size) = query.normalized();

        let paginator = Sections::find()
            .order_by_asc(Column::Name)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count sections"))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count section pages"))?;
        let sections = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list sections"))?;

        Ok(SectionListResponse {
            items: sections.into_iter().map(|m| m.into_section()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
