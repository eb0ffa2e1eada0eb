use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    PaginationQuery,
    courses::{
        entities::{Course, CourseDraft},
        requests::CourseListQuery,
        responses::CourseListResponse,
    },
    grading::{
        entities::{GradingScheme, GradingSchemeDraft, GradingSchemeName},
        requests::GradingSchemeChanges,
        responses::GradingSchemeNameDeletion,
    },
    sections::{entities::Section, responses::SectionListResponse},
};

use crate::config::AppConfig;
use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 评分方案名称管理方法
    // 创建评分方案名称
    async fn create_grading_scheme_name(&self, name: &str) -> Result<GradingSchemeName>;
    // 通过ID获取评分方案名称
    async fn get_grading_scheme_name_by_id(&self, id: i64) -> Result<Option<GradingSchemeName>>;
    // 列出全部评分方案名称
    async fn list_grading_scheme_names(&self) -> Result<Vec<GradingSchemeName>>;
    // 删除评分方案名称：级联删除其区间，并清除课程上的引用
    async fn delete_grading_scheme_name(
        &self,
        id: i64,
    ) -> Result<Option<GradingSchemeNameDeletion>>;

    /// 评分区间管理方法
    // 创建评分区间
    async fn create_grading_scheme(&self, draft: GradingSchemeDraft) -> Result<GradingScheme>;
    // 通过ID获取评分区间
    async fn get_grading_scheme_by_id(&self, id: i64) -> Result<Option<GradingScheme>>;
    // 列出某个评分方案下的全部区间
    async fn list_grading_schemes(&self, scheme_name_id: i64) -> Result<Vec<GradingScheme>>;
    // 更新评分区间
    async fn update_grading_scheme(
        &self,
        id: i64,
        changes: GradingSchemeChanges,
    ) -> Result<Option<GradingScheme>>;

    /// 课程管理方法
    // 创建课程（草稿须已通过校验，缩略图引用已解析）
    async fn create_course(&self, draft: CourseDraft) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 分页列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 列出正在进行的课程
    async fn list_running_courses(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Course>>;
    // 列出即将开始的课程
    async fn list_upcoming_courses(&self, now: DateTime<Utc>, limit: u64)
    -> Result<Vec<Course>>;
    // 列出开放报名的课程
    async fn list_open_enrollment_courses(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Course>>;
    // 覆盖写入课程的全部可写字段
    async fn update_course(&self, id: i64, draft: CourseDraft) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 分组管理方法
    // 创建分组
    async fn create_section(&self, name: &str) -> Result<Section>;
    // 分页列出分组
    async fn list_sections_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<SectionListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    let storage = sea_orm_storage::SeaOrmStorage::connect(&config.database).await?;
    Ok(Arc::new(storage))
}
