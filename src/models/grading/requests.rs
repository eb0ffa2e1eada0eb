use serde::Deserialize;
use ts_rs::TS;

// 创建评分方案名称请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct CreateGradingSchemeNameRequest {
    pub name: String,
}

// 为课程新增评分区间
//
// `scheme_name_id` 缺省时使用课程当前的评分方案；
// 课程尚未设置评分方案时，指定的方案会同时成为课程的评分方案。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct CreateGradingSchemeRequest {
    pub scheme_name_id: Option<i64>,
    pub grade: String,
    pub score_range_begin: Option<i16>,
    pub score_range_end: Option<i16>,
}

// 更新课程评分方案中的某个区间
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "grading.ts")]
pub struct UpdateGradingSchemeRequest {
    pub id: i64,
    pub grade: Option<String>,
    pub score_range_begin: Option<i16>,
    pub score_range_end: Option<i16>,
}

// 评分区间的部分更新（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradingSchemeChanges {
    pub grade: Option<String>,
    pub score_range_begin: Option<i16>,
    pub score_range_end: Option<i16>,
}
