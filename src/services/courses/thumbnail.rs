use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{error, warn};

use super::CourseService;
use crate::config::AppConfig;
use crate::errors::LmsError;
use crate::media::MediaStore;
use crate::models::{ApiResponse, ErrorCode, courses::entities::Course};
use crate::services::lms_error_response;
use crate::utils::validate_magic_bytes;

pub async fn upload_thumbnail(
    service: &CourseService,
    request: &HttpRequest,
    course: Course,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let media = service.get_media(request);

    let reference = match receive_upload(&media, payload).await {
        Ok(reference) => reference,
        Err(resp) => return Ok(resp),
    };

    let previous = course.thumbnail.clone();
    let mut draft = course.to_draft();
    draft.thumbnail = Some(reference.clone());

    match service.lifecycle(request).update(course.id, draft).await {
        Ok(Some(updated)) => {
            // 替换成功后清理旧文件
            if previous != reference
                && let Err(e) = media.remove(&previous)
            {
                warn!("Failed to remove old thumbnail {}: {}", previous, e);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                updated,
                "Course thumbnail updated successfully",
            )))
        }
        Ok(None) => {
            discard(&media, &reference);
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )))
        }
        Err(e) => {
            discard(&media, &reference);
            Ok(lms_error_response(
                &e,
                ErrorCode::ThumbnailUploadFailed,
                ErrorCode::CourseAlreadyExists,
            ))
        }
    }
}

/// 接收 multipart 中的 `file` 字段并写入缩略图目录，返回新引用
async fn receive_upload(media: &MediaStore, mut payload: Multipart) -> Result<String, HttpResponse> {
    let config = &AppConfig::get().media;

    if let Err(e) = media.ensure_dirs() {
        error!("{}", e);
        return Err(upload_failed("Failed to create thumbnail directory"));
    }

    let mut reference: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }

        if let Some(stored) = &reference {
            discard(media, stored);
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        // 提取扩展名并校验
        let extension = Path::new(&original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();

        if !config
            .allowed_types
            .iter()
            .any(|t| t.to_lowercase() == extension)
        {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileTypeNotAllowed,
                "File type not allowed",
            )));
        }

        let stored = media.new_thumbnail_reference(&extension);
        let path = match media.resolve(&stored) {
            Ok(path) => path,
            Err(e) => {
                error!("{}", e);
                return Err(upload_failed("Failed to allocate thumbnail path"));
            }
        };

        let mut f = match File::create(&path) {
            Ok(file) => file,
            Err(e) => {
                error!("{}", LmsError::file_operation(format!("{e}")));
                return Err(upload_failed("Failed to create thumbnail file"));
            }
        };

        let mut total_size: usize = 0;
        let mut first_chunk = true;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    let _ = fs::remove_file(&path);
                    warn!("Thumbnail upload interrupted: {}", e);
                    return Err(upload_failed("Upload interrupted"));
                }
            };

            // 第一个 chunk 时验证魔术字节
            if first_chunk {
                first_chunk = false;
                if !validate_magic_bytes(&data, &extension) {
                    let _ = fs::remove_file(&path);
                    return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileTypeNotAllowed,
                        "File content does not match its extension",
                    )));
                }
            }

            total_size += data.len();
            if total_size > config.max_upload_size {
                let _ = fs::remove_file(&path);
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileSizeExceeded,
                    "File size exceeds the limit",
                )));
            }

            if let Err(e) = f.write_all(&data) {
                let _ = fs::remove_file(&path);
                error!("{}", LmsError::from(e));
                return Err(upload_failed("Failed to write thumbnail file"));
            }
        }

        if first_chunk {
            let _ = fs::remove_file(&path);
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Uploaded file is empty",
            )));
        }

        reference = Some(stored);
    }

    reference.ok_or_else(|| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        ))
    })
}

fn discard(media: &MediaStore, reference: &str) {
    if let Err(e) = media.remove(reference) {
        warn!("Failed to discard thumbnail {}: {}", reference, e);
    }
}

fn upload_failed(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::ThumbnailUploadFailed,
        message,
    ))
}
