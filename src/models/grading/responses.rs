use super::entities::{BandCoverage, GradingScheme, GradingSchemeName};
use serde::Serialize;
use ts_rs::TS;

// 评分方案及其全部区间
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingSchemeDetail {
    pub scheme: GradingSchemeName,
    pub bands: Vec<GradingScheme>,
}

// 评分方案名称列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingSchemeNameListResponse {
    pub items: Vec<GradingSchemeName>,
}

// 删除评分方案名称的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingSchemeNameDeletion {
    pub scheme_name_id: i64,
    pub deleted_bands: u64,
    pub cleared_courses: u64,
}

// 分数换算结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradeLookup {
    pub score: i16,
    pub grade: Option<String>,
}

// 课程评分方案统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct GradingSchemeStatistics {
    pub scheme: GradingSchemeName,
    pub coverage: BandCoverage,
}
