use crate::config::AppConfig;
use crate::media::MediaStore;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub media: MediaStore,
}

/// 准备媒体目录
/// 目录创建失败不阻止启动，上传时会再次尝试
fn prepare_media() -> MediaStore {
    let config = AppConfig::get();
    let media = MediaStore::from_config(&config.media);

    match media.ensure_dirs() {
        Ok(()) => info!(
            "Media root ready at {} (thumbnails <= {}px)",
            media.root().display(),
            media.max_dimension()
        ),
        Err(e) => warn!("{}; thumbnail uploads may fail", e),
    }

    media
}

/// 检查默认时区配置，无效时仅记录警告
fn check_course_defaults() {
    let config = AppConfig::get();
    match crate::utils::validate::validate_time_zone(&config.course.default_time_zone) {
        Ok(tz) => debug!("Default course time zone: {}", tz),
        Err(e) => warn!(
            "Configured default time zone is invalid ({}); new courses must specify one",
            e
        ),
    }
}

/// 准备服务器启动的上下文
/// 包括存储与媒体目录
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let media = prepare_media();
    check_course_defaults();

    StartupContext { storage, media }
}
