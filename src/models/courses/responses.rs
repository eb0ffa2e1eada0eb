use super::entities::{Course, CourseSchedule};
use crate::models::common::PaginationInfo;
use crate::models::grading::responses::{GradeLookup, GradingSchemeDetail, GradingSchemeStatistics};
use serde::Serialize;
use ts_rs::TS;

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Course>,
}

// 课程详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseDetailResponse {
    pub course: Course,
    pub grading_scheme: Option<GradingSchemeDetail>,
}

// 课程统计响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseStatisticsResponse {
    pub course_id: i64,
    pub schedule: CourseSchedule,
    pub grading: Option<GradingSchemeStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_lookup: Option<GradeLookup>,
}
