//! 课程存储操作

use super::{SeaOrmStorage, db_err};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::Result;
use crate::models::{
    PaginationInfo,
    courses::{
        entities::{Course, CourseDraft},
        requests::CourseListQuery,
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, draft: CourseDraft) -> Result<Course> {
        let now = Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(draft.title.trim().to_string()),
            thumbnail: Set(draft.thumbnail.unwrap_or_default()),
            time_zone: Set(draft.time_zone),
            start_date: Set(draft.start_date.timestamp()),
            end_date: Set(draft.end_date.timestamp()),
            grading_scheme_id: Set(draft.grading_scheme_id),
            description: Set(draft.description),
            allow_self_enroll: Set(draft.allow_self_enroll),
            enrollment_open_to_all: Set(draft.enrollment_open_to_all),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_err("Failed to create course"))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err("Failed to query course"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程，按开课时间倒序
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Courses::find();

        // 标题搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select
                .filter(Column::Title.like(LikeExpr::new(format!("%{escaped}%")).escape('\\')));
        }

        select = select
            .order_by_desc(Column::StartDate)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("Failed to count courses"))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(db_err("Failed to count course pages"))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("Failed to list courses"))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 正在进行的课程：start_date <= now <= end_date
    pub async fn list_running_courses_impl(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Course>> {
        let ts = now.timestamp();
        let select = Courses::find()
            .filter(Column::StartDate.lte(ts))
            .filter(Column::EndDate.gte(ts))
            .order_by_asc(Column::EndDate);

        self.fetch_courses(select, limit).await
    }

    /// 即将开始的课程：start_date > now
    pub async fn list_upcoming_courses_impl(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Course>> {
        let select = Courses::find()
            .filter(Column::StartDate.gt(now.timestamp()))
            .order_by_asc(Column::StartDate);

        self.fetch_courses(select, limit).await
    }

    /// 开放报名的课程：对所有人开放、允许自行加入且尚未结课
    pub async fn list_open_enrollment_courses_impl(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Course>> {
        let select = Courses::find()
            .filter(Column::EnrollmentOpenToAll.eq(true))
            .filter(Column::AllowSelfEnroll.eq(true))
            .filter(Column::EndDate.gte(now.timestamp()))
            .order_by_asc(Column::StartDate);

        self.fetch_courses(select, limit).await
    }

    /// 覆盖写入课程
    pub async fn update_course_impl(&self, id: i64, draft: CourseDraft) -> Result<Option<Course>> {
        // 先检查课程是否存在
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            title: Set(draft.title.trim().to_string()),
            thumbnail: Set(draft.thumbnail.unwrap_or_default()),
            time_zone: Set(draft.time_zone),
            start_date: Set(draft.start_date.timestamp()),
            end_date: Set(draft.end_date.timestamp()),
            grading_scheme_id: Set(draft.grading_scheme_id),
            description: Set(draft.description),
            allow_self_enroll: Set(draft.allow_self_enroll),
            enrollment_open_to_all: Set(draft.enrollment_open_to_all),
            updated_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(db_err("Failed to update course"))?;

        self.get_course_by_id_impl(id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err("Failed to delete course"))?;

        Ok(result.rows_affected > 0)
    }

    async fn fetch_courses(&self, select: Select<Courses>, limit: u64) -> Result<Vec<Course>> {
        let result = select
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_err("Failed to list courses"))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }
}
