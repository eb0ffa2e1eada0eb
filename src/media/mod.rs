//! 课程缩略图的本地媒体存储
//!
//! 缩略图引用是相对媒体根目录的路径，例如 `course_thumbnails/<uuid>.png`。
//! 默认引用 `default.png` 只是占位，不对应需要处理的文件。

pub mod thumbnail;

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use actix_web::web;
use dashmap::DashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::MediaConfig;
use crate::errors::{LmsError, Result};
pub use thumbnail::{ThumbnailOutcome, normalize_thumbnail_file};

#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
    thumbnail_dir: String,
    default_thumbnail: String,
    max_dimension: u32,
    // 同一路径上的规范化串行执行
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl MediaStore {
    pub fn new(
        root: impl Into<PathBuf>,
        thumbnail_dir: impl Into<String>,
        default_thumbnail: impl Into<String>,
        max_dimension: u32,
    ) -> Self {
        Self {
            root: root.into(),
            thumbnail_dir: thumbnail_dir.into(),
            default_thumbnail: default_thumbnail.into(),
            max_dimension,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(
            &config.root,
            &config.thumbnail_dir,
            &config.default_thumbnail,
            config.thumbnail_max_dimension,
        )
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_thumbnail(&self) -> &str {
        &self.default_thumbnail
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    pub fn is_default(&self, reference: &str) -> bool {
        reference == self.default_thumbnail
    }

    /// 创建媒体根目录与缩略图目录
    pub fn ensure_dirs(&self) -> Result<()> {
        let dir = self.root.join(&self.thumbnail_dir);
        fs::create_dir_all(&dir).map_err(|e| {
            LmsError::file_operation(format!("Failed to create {}: {e}", dir.display()))
        })
    }

    /// 将引用解析为媒体根目录下的路径，拒绝绝对路径与 `..`
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let relative = Path::new(reference);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if reference.is_empty() || escapes {
            return Err(LmsError::validation(format!(
                "thumbnail: invalid thumbnail reference '{reference}'"
            )));
        }
        Ok(self.root.join(relative))
    }

    /// 为新上传的缩略图生成唯一引用
    pub fn new_thumbnail_reference(&self, extension: &str) -> String {
        let extension = extension.trim_start_matches('.').to_lowercase();
        format!("{}/{}.{extension}", self.thumbnail_dir, Uuid::new_v4())
    }

    /// 删除缩略图文件，默认占位引用与不存在的文件会被忽略
    pub fn remove(&self, reference: &str) -> Result<()> {
        if self.is_default(reference) {
            return Ok(());
        }
        let path = self.resolve(reference)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// 在阻塞线程池中规范化缩略图
    ///
    /// 默认占位引用直接返回 `None`。
    pub async fn normalize(&self, reference: &str) -> Result<Option<ThumbnailOutcome>> {
        if self.is_default(reference) {
            return Ok(None);
        }

        let path = self.resolve(reference)?;
        let lock = self
            .locks
            .entry(path.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let max_dimension = self.max_dimension;
        let job_path = path.clone();

        let result = web::block(move || {
            let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            normalize_thumbnail_file(&job_path, max_dimension)
        })
        .await
        .map_err(|e| LmsError::file_operation(format!("Thumbnail worker failed: {e}")));

        // 没有其他任务持有时回收锁
        self.locks
            .remove_if(&path, |_, lock| Arc::strong_count(lock) == 1);

        let outcome = result?.map_err(|e| self.hide_path(reference, &path, e))?;

        if outcome.resized {
            info!(
                "Thumbnail {} resized from {}x{} to {}x{}",
                reference, outcome.original_width, outcome.original_height, outcome.width,
                outcome.height
            );
        } else {
            debug!("Thumbnail {} already within bounds", reference);
        }

        Ok(Some(outcome))
    }

    // 错误信息会返回给客户端，绝对路径只写入日志
    fn hide_path(&self, reference: &str, path: &Path, err: LmsError) -> LmsError {
        let absolute = path.display().to_string();
        if !err.message().contains(&absolute) {
            return err;
        }
        warn!("Thumbnail {} failed at {}: {}", reference, absolute, err);
        let message = err.message().replace(&absolute, reference);
        match err {
            LmsError::ImageDecode(_) => LmsError::image_decode(message),
            LmsError::FileOperation(_) => LmsError::file_operation(message),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn store(root: &Path) -> MediaStore {
        MediaStore::new(root, "course_thumbnails", "default.png", 300)
    }

    #[test]
    fn test_resolve_rejects_escaping_references() {
        let dir = tempfile::tempdir().unwrap();
        let media = store(dir.path());

        assert!(media.resolve("course_thumbnails/a.png").is_ok());
        assert!(media.resolve("../secret.png").is_err());
        assert!(media.resolve("course_thumbnails/../../x.png").is_err());
        assert!(media.resolve("/etc/passwd").is_err());
        assert!(media.resolve("").is_err());
    }

    #[test]
    fn test_new_reference_lives_in_thumbnail_dir() {
        let dir = tempfile::tempdir().unwrap();
        let media = store(dir.path());
        let reference = media.new_thumbnail_reference(".PNG");
        assert!(reference.starts_with("course_thumbnails/"));
        assert!(reference.ends_with(".png"));
        assert_ne!(reference, media.new_thumbnail_reference(".png"));
    }

    #[actix_web::test]
    async fn test_default_reference_is_never_opened() {
        let dir = tempfile::tempdir().unwrap();
        let media = store(dir.path());
        // default.png 并不存在，但也不应报错
        assert_eq!(media.normalize("default.png").await.unwrap(), None);
        assert!(media.remove("default.png").is_ok());
    }

    #[actix_web::test]
    async fn test_normalize_downscales_and_releases_lock() {
        let dir = tempfile::tempdir().unwrap();
        let media = store(dir.path());
        media.ensure_dirs().unwrap();

        let reference = "course_thumbnails/banner.png";
        RgbImage::from_pixel(600, 400, Rgb([200, 30, 30]))
            .save(media.resolve(reference).unwrap())
            .unwrap();

        let outcome = media.normalize(reference).await.unwrap().unwrap();
        assert_eq!((outcome.width, outcome.height), (300, 200));
        assert!(media.locks.is_empty());

        media.remove(reference).unwrap();
        assert!(!media.resolve(reference).unwrap().exists());
        assert!(media.remove(reference).is_ok());
    }

    #[actix_web::test]
    async fn test_normalize_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let media = store(dir.path());
        let err = media
            .normalize("course_thumbnails/missing.png")
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::ImageDecode(_)));
        // 对外信息只包含相对引用
        assert!(err.message().contains("course_thumbnails/missing.png"));
        assert!(!err.message().contains(&dir.path().display().to_string()));
    }

    #[actix_web::test]
    async fn test_corrupt_file_error_hides_media_root() {
        let dir = tempfile::tempdir().unwrap();
        let media = store(dir.path());
        media.ensure_dirs().unwrap();
        let reference = "course_thumbnails/broken.png";
        fs::write(media.resolve(reference).unwrap(), b"not an image").unwrap();

        let err = media.normalize(reference).await.unwrap_err();
        assert!(matches!(err, LmsError::ImageDecode(_)));
        assert!(err.message().starts_with(reference));
    }
}
