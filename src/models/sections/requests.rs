use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{MAX_CHAR_FIELD_LENGTH, validate_char_field};

// 创建分组请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct CreateSectionRequest {
    pub name: String,
}

impl CreateSectionRequest {
    pub fn validate(&self) -> Result<()> {
        validate_char_field("name", &self.name, MAX_CHAR_FIELD_LENGTH)
    }
}

// 分组列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct SectionQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
}
