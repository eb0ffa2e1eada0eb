use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use super::entities::CourseDraft;
use crate::models::common::PaginationQuery;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

impl From<CourseQueryParams> for CourseListQuery {
    fn from(params: CourseQueryParams) -> Self {
        Self {
            pagination: params.pagination,
            search: params.search,
        }
    }
}

// 创建课程请求
//
// 未提供的字段使用默认值：时区取配置中的默认时区，起止时间取当前时间，
// 允许自行加入，默认不对所有人开放报名。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub time_zone: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub grading_scheme_id: Option<i64>,
    pub allow_self_enroll: Option<bool>,
    pub enrollment_open_to_all: Option<bool>,
}

impl CreateCourseRequest {
    pub fn into_draft(self, default_time_zone: &str, now: DateTime<Utc>) -> CourseDraft {
        CourseDraft {
            title: self.title,
            thumbnail: self.thumbnail,
            time_zone: self
                .time_zone
                .unwrap_or_else(|| default_time_zone.to_string()),
            start_date: self.start_date.unwrap_or(now),
            end_date: self.end_date.unwrap_or(now),
            grading_scheme_id: self.grading_scheme_id,
            description: self.description,
            allow_self_enroll: self.allow_self_enroll.unwrap_or(true),
            enrollment_open_to_all: self.enrollment_open_to_all.unwrap_or(false),
        }
    }
}

// 更新课程请求
//
// `grading_scheme_id` 省略表示不修改，显式传 null 表示清除评分方案。
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub time_zone: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_explicit_null")]
    #[ts(optional)]
    pub grading_scheme_id: Option<Option<i64>>,
    pub allow_self_enroll: Option<bool>,
    pub enrollment_open_to_all: Option<bool>,
}

// 课程统计查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseStatisticsQuery {
    pub score: Option<i16>,
}

// 区分“字段缺失”与“字段为 null”
fn deserialize_explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateCourseRequest =
            serde_json::from_str(r#"{"title":"Rust","description":"Ownership"}"#).unwrap();
        let now = Utc::now();
        let draft = req.into_draft("Asia/Kolkata", now);

        assert_eq!(draft.time_zone, "Asia/Kolkata");
        assert_eq!(draft.start_date, now);
        assert_eq!(draft.end_date, now);
        assert!(draft.allow_self_enroll);
        assert!(!draft.enrollment_open_to_all);
        assert_eq!(draft.thumbnail, None);
    }

    #[test]
    fn test_update_request_distinguishes_null() {
        let missing: UpdateCourseRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.grading_scheme_id, None);

        let cleared: UpdateCourseRequest =
            serde_json::from_str(r#"{"grading_scheme_id":null}"#).unwrap();
        assert_eq!(cleared.grading_scheme_id, Some(None));

        let set: UpdateCourseRequest = serde_json::from_str(r#"{"grading_scheme_id":3}"#).unwrap();
        assert_eq!(set.grading_scheme_id, Some(Some(3)));
    }
}
