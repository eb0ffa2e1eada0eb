use crate::models::courses::entities::Course;
use serde::Serialize;
use ts_rs::TS;

/// 学生仪表盘首页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "dashboard.ts")]
pub struct DashboardHomeResponse {
    // 正在进行的课程
    pub running: Vec<Course>,
    // 即将开始的课程
    pub upcoming: Vec<Course>,
    // 开放报名且允许自行加入的课程
    pub open_enrollment: Vec<Course>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
