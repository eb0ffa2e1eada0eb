//! 课程保存流程：校验 -> 处理缩略图 -> 持久化
//!
//! 每一步都可以单独调用，HTTP 处理器与测试都通过这里保存课程。

use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::{LmsError, Result};
use crate::media::{MediaStore, ThumbnailOutcome};
use crate::models::courses::entities::{Course, CourseDraft};
use crate::storage::Storage;

pub struct CourseLifecycle {
    storage: Arc<dyn Storage>,
    media: MediaStore,
}

impl CourseLifecycle {
    pub fn new(storage: Arc<dyn Storage>, media: MediaStore) -> Self {
        Self { storage, media }
    }

    /// 第一步：字段校验与评分方案存在性检查
    pub async fn validate(&self, draft: &CourseDraft) -> Result<()> {
        draft.validate()?;

        if let Some(scheme_name_id) = draft.grading_scheme_id
            && self
                .storage
                .get_grading_scheme_name_by_id(scheme_name_id)
                .await?
                .is_none()
        {
            return Err(LmsError::validation(format!(
                "grading_scheme_id: grading scheme {scheme_name_id} does not exist"
            )));
        }

        Ok(())
    }

    /// 第二步：未附加缩略图时使用默认引用，不做任何文件操作
    pub fn resolve_thumbnail(&self, draft: &mut CourseDraft) {
        if draft.attached_thumbnail().is_none() {
            draft.thumbnail = Some(self.media.default_thumbnail().to_string());
        }
    }

    /// 第三步：规范化已附加的缩略图；默认引用返回 `None`
    pub async fn normalize_thumbnail(&self, draft: &CourseDraft) -> Result<Option<ThumbnailOutcome>> {
        match draft.attached_thumbnail() {
            Some(reference) => self.media.normalize(reference).await,
            None => Ok(None),
        }
    }

    async fn prepare(&self, draft: &mut CourseDraft) -> Result<()> {
        self.validate(draft).await?;
        self.resolve_thumbnail(draft);
        if let Some(outcome) = self.normalize_thumbnail(draft).await? {
            debug!(
                "Course thumbnail ready: {}x{} (resized: {})",
                outcome.width, outcome.height, outcome.resized
            );
        }
        Ok(())
    }

    /// 创建课程
    pub async fn create(&self, mut draft: CourseDraft) -> Result<Course> {
        self.prepare(&mut draft).await?;
        let course = self.storage.create_course(draft).await?;
        info!("Course {} ({}) created", course.id, course.title);
        Ok(course)
    }

    /// 保存对已有课程的修改，课程不存在时返回 `None`
    pub async fn update(&self, id: i64, mut draft: CourseDraft) -> Result<Option<Course>> {
        self.prepare(&mut draft).await?;
        let course = self.storage.update_course(id, draft).await?;
        if let Some(course) = &course {
            info!("Course {} ({}) updated", course.id, course.title);
        }
        Ok(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use chrono::{Duration, Utc};
    use image::{Rgb, RgbImage};

    async fn lifecycle(media_root: &std::path::Path) -> CourseLifecycle {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let media = MediaStore::new(media_root, "course_thumbnails", "default.png", 300);
        media.ensure_dirs().unwrap();
        CourseLifecycle::new(storage, media)
    }

    fn draft(title: &str) -> CourseDraft {
        let now = Utc::now();
        CourseDraft {
            title: title.to_string(),
            thumbnail: None,
            time_zone: "Asia/Kolkata".to_string(),
            start_date: now,
            end_date: now + Duration::days(90),
            grading_scheme_id: None,
            description: "An introduction".to_string(),
            allow_self_enroll: true,
            enrollment_open_to_all: false,
        }
    }

    #[actix_web::test]
    async fn test_create_without_thumbnail_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let lifecycle = lifecycle(dir.path()).await;

        let course = lifecycle.create(draft("Operating Systems")).await.unwrap();
        assert_eq!(course.thumbnail, "default.png");

        let mut empty = draft("Networks");
        empty.thumbnail = Some(String::new());
        let course = lifecycle.create(empty).await.unwrap();
        assert_eq!(course.thumbnail, "default.png");
    }

    #[actix_web::test]
    async fn test_create_downscales_attached_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let lifecycle = lifecycle(dir.path()).await;

        let reference = "course_thumbnails/cover.png";
        let path = dir.path().join(reference);
        RgbImage::from_pixel(600, 400, Rgb([0, 0, 0])).save(&path).unwrap();

        let mut with_cover = draft("Graphics");
        with_cover.thumbnail = Some(reference.to_string());
        let course = lifecycle.create(with_cover).await.unwrap();

        assert_eq!(course.thumbnail, reference);
        assert_eq!(image::image_dimensions(&path).unwrap(), (300, 200));
    }

    #[actix_web::test]
    async fn test_validation_runs_before_any_file_work() {
        let dir = tempfile::tempdir().unwrap();
        let lifecycle = lifecycle(dir.path()).await;

        let mut inverted = draft("Compilers");
        inverted.end_date = inverted.start_date - Duration::days(1);
        // 缩略图不存在，但日期错误应先被发现
        inverted.thumbnail = Some("course_thumbnails/missing.png".to_string());
        let err = lifecycle.create(inverted).await.unwrap_err();
        assert!(matches!(err, LmsError::DateRange(_)));

        let mut unknown_scheme = draft("Compilers");
        unknown_scheme.grading_scheme_id = Some(42);
        let err = lifecycle.create(unknown_scheme).await.unwrap_err();
        assert!(matches!(err, LmsError::Validation(_)));
    }

    #[actix_web::test]
    async fn test_missing_thumbnail_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let lifecycle = lifecycle(dir.path()).await;

        let mut broken = draft("Robotics");
        broken.thumbnail = Some("course_thumbnails/missing.png".to_string());
        let err = lifecycle.create(broken).await.unwrap_err();
        assert!(matches!(err, LmsError::ImageDecode(_)));
    }

    #[actix_web::test]
    async fn test_update_unknown_course() {
        let dir = tempfile::tempdir().unwrap();
        let lifecycle = lifecycle(dir.path()).await;
        assert!(lifecycle.update(77, draft("Ghost")).await.unwrap().is_none());
    }
}
