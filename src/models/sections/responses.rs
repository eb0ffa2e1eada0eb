use super::entities::Section;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 分组列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct SectionListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Section>,
}
