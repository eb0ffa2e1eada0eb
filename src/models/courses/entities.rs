use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::requests::UpdateCourseRequest;
use crate::errors::{LmsError, Result};
use crate::utils::validate::{
    MAX_CHAR_FIELD_LENGTH, validate_char_field, validate_date_range, validate_text_field,
    validate_time_zone,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 课程标题（唯一）
    pub title: String,
    // 缩略图引用（相对媒体根目录）
    pub thumbnail: String,
    // IANA 时区
    pub time_zone: String,
    // 开课时间
    pub start_date: DateTime<Utc>,
    // 结课时间
    pub end_date: DateTime<Utc>,
    // 评分方案ID
    pub grading_scheme_id: Option<i64>,
    // 课程描述
    pub description: String,
    // 是否允许学生自行加入
    pub allow_self_enroll: bool,
    // 是否对所有人开放报名
    pub enrollment_open_to_all: bool,
    // 创建时间
    pub created_at: DateTime<Utc>,
    // 更新时间
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// 以当前记录为基础生成可保存的草稿
    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            title: self.title.clone(),
            thumbnail: Some(self.thumbnail.clone()),
            time_zone: self.time_zone.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            grading_scheme_id: self.grading_scheme_id,
            description: self.description.clone(),
            allow_self_enroll: self.allow_self_enroll,
            enrollment_open_to_all: self.enrollment_open_to_all,
        }
    }
}

/// 课程的全部可写字段，由生命周期流程校验、规范化后写入存储
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    // None 或空字符串表示未附加缩略图
    pub thumbnail: Option<String>,
    pub time_zone: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub grading_scheme_id: Option<i64>,
    pub description: String,
    pub allow_self_enroll: bool,
    pub enrollment_open_to_all: bool,
}

impl CourseDraft {
    /// 字段级校验，不访问存储
    pub fn validate(&self) -> Result<()> {
        validate_char_field("title", &self.title, MAX_CHAR_FIELD_LENGTH)?;
        validate_text_field("description", &self.description)?;
        validate_time_zone(&self.time_zone)?;
        validate_date_range(self.start_date, self.end_date)
    }

    /// 是否附加了缩略图
    pub fn attached_thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref().filter(|name| !name.is_empty())
    }

    /// 合并部分更新
    ///
    /// 缩略图只能保持不变或重置为默认，新文件只能经由上传接口附加。
    pub fn merge(mut self, update: UpdateCourseRequest, default_thumbnail: &str) -> Result<Self> {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(thumbnail) = update.thumbnail {
            check_thumbnail_reference(&thumbnail, self.thumbnail.as_deref(), default_thumbnail)?;
            self.thumbnail = Some(thumbnail);
        }
        if let Some(time_zone) = update.time_zone {
            self.time_zone = time_zone;
        }
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(grading_scheme_id) = update.grading_scheme_id {
            self.grading_scheme_id = grading_scheme_id;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(allow_self_enroll) = update.allow_self_enroll {
            self.allow_self_enroll = allow_self_enroll;
        }
        if let Some(enrollment_open_to_all) = update.enrollment_open_to_all {
            self.enrollment_open_to_all = enrollment_open_to_all;
        }
        Ok(self)
    }
}

/// 客户端提交的缩略图引用只允许为空、默认引用或课程当前的引用
pub fn check_thumbnail_reference(
    requested: &str,
    current: Option<&str>,
    default_thumbnail: &str,
) -> Result<()> {
    if requested.is_empty() || requested == default_thumbnail || Some(requested) == current {
        return Ok(());
    }
    Err(LmsError::validation(
        "thumbnail: a new thumbnail can only be attached by uploading a file",
    ))
}

/// 课程进度状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "course.ts")]
pub enum CourseStatus {
    NotStarted,
    Running,
    Finished,
}

/// 课程排期统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "course.ts")]
pub struct CourseSchedule {
    pub status: CourseStatus,
    pub total_days: i64,
    pub elapsed_days: i64,
    pub remaining_days: i64,
    pub progress_percent: f64,
    // 按课程时区显示的起止时间
    pub local_start: String,
    pub local_end: String,
}

impl CourseSchedule {
    pub fn compute(course: &Course, now: DateTime<Utc>) -> Result<Self> {
        let tz = validate_time_zone(&course.time_zone)?;

        let total = course.end_date - course.start_date;
        let status = if now < course.start_date {
            CourseStatus::NotStarted
        } else if now > course.end_date {
            CourseStatus::Finished
        } else {
            CourseStatus::Running
        };

        let elapsed = match status {
            CourseStatus::NotStarted => chrono::Duration::zero(),
            CourseStatus::Finished => total,
            CourseStatus::Running => now - course.start_date,
        };

        let progress_percent = match status {
            CourseStatus::NotStarted => 0.0,
            CourseStatus::Finished => 100.0,
            CourseStatus::Running if total.num_seconds() == 0 => 100.0,
            CourseStatus::Running => {
                let ratio = elapsed.num_seconds() as f64 / total.num_seconds() as f64;
                (ratio * 10000.0).round() / 100.0
            }
        };

        Ok(Self {
            status,
            total_days: total.num_days(),
            elapsed_days: elapsed.num_days(),
            remaining_days: (total - elapsed).num_days(),
            progress_percent,
            local_start: course.start_date.with_timezone(&tz).to_rfc3339(),
            local_end: course.end_date.with_timezone(&tz).to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_course() -> Course {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Course {
            id: 1,
            title: "Distributed Systems".into(),
            thumbnail: "default.png".into(),
            time_zone: "Asia/Kolkata".into(),
            start_date: start,
            end_date: start + chrono::Duration::days(100),
            grading_scheme_id: None,
            description: "Consensus and replication".into(),
            allow_self_enroll: true,
            enrollment_open_to_all: false,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_draft_validation_rejects_inverted_dates() {
        let mut draft = sample_course().to_draft();
        std::mem::swap(&mut draft.start_date, &mut draft.end_date);
        assert!(matches!(
            draft.validate(),
            Err(crate::errors::LmsError::DateRange(_))
        ));
    }

    #[test]
    fn test_draft_validation_rejects_unknown_time_zone() {
        let mut draft = sample_course().to_draft();
        draft.time_zone = "Nowhere/Atlantis".into();
        assert!(draft.validate().is_err());

        let draft = sample_course().to_draft();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_attached_thumbnail() {
        let mut draft = sample_course().to_draft();
        assert_eq!(draft.attached_thumbnail(), Some("default.png"));
        draft.thumbnail = Some(String::new());
        assert_eq!(draft.attached_thumbnail(), None);
        draft.thumbnail = None;
        assert_eq!(draft.attached_thumbnail(), None);
    }

    #[test]
    fn test_merge_can_clear_grading_scheme() {
        let mut course = sample_course();
        course.grading_scheme_id = Some(7);

        let update: UpdateCourseRequest =
            serde_json::from_str(r#"{"grading_scheme_id": null, "title": "DS"}"#).unwrap();
        let merged = course.to_draft().merge(update, "default.png").unwrap();
        assert_eq!(merged.grading_scheme_id, None);
        assert_eq!(merged.title, "DS");

        let update: UpdateCourseRequest = serde_json::from_str(r#"{}"#).unwrap();
        let merged = course.to_draft().merge(update, "default.png").unwrap();
        assert_eq!(merged.grading_scheme_id, Some(7));
    }

    #[test]
    fn test_merge_rejects_foreign_thumbnail_reference() {
        let mut course = sample_course();
        course.thumbnail = "course_thumbnails/own.png".into();

        let update: UpdateCourseRequest =
            serde_json::from_str(r#"{"thumbnail": "course_thumbnails/other.png"}"#).unwrap();
        let err = course.to_draft().merge(update, "default.png").unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
        assert!(err.message().starts_with("thumbnail: "));

        for allowed in ["course_thumbnails/own.png", "", "default.png"] {
            let update = UpdateCourseRequest {
                thumbnail: Some(allowed.to_string()),
                ..Default::default()
            };
            let merged = course.to_draft().merge(update, "default.png").unwrap();
            assert_eq!(merged.thumbnail.as_deref(), Some(allowed));
        }
    }

    #[test]
    fn test_schedule_running() {
        let course = sample_course();
        let now = course.start_date + chrono::Duration::days(25);
        let schedule = CourseSchedule::compute(&course, now).unwrap();
        assert_eq!(schedule.status, CourseStatus::Running);
        assert_eq!(schedule.total_days, 100);
        assert_eq!(schedule.elapsed_days, 25);
        assert_eq!(schedule.remaining_days, 75);
        assert_eq!(schedule.progress_percent, 25.0);
        assert!(schedule.local_start.ends_with("+05:30"));
    }

    #[test]
    fn test_schedule_before_and_after() {
        let course = sample_course();

        let before = CourseSchedule::compute(&course, course.start_date - chrono::Duration::days(1))
            .unwrap();
        assert_eq!(before.status, CourseStatus::NotStarted);
        assert_eq!(before.progress_percent, 0.0);
        assert_eq!(before.remaining_days, 100);

        let after =
            CourseSchedule::compute(&course, course.end_date + chrono::Duration::days(1)).unwrap();
        assert_eq!(after.status, CourseStatus::Finished);
        assert_eq!(after.progress_percent, 100.0);
        assert_eq!(after.remaining_days, 0);
    }
}
