use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 课程学生的分组
///
/// 目前分组与课程之间没有关联字段，名称全局唯一。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "section.ts")]
pub struct Section {
    pub id: i64,
    pub name: String,
}
