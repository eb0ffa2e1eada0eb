//! 缩略图规范化
//!
//! 打开图片，若任一边超过上限则按比例缩小到上限以内，并原子地写回同一路径。
//! 这里只做同步的文件与像素处理，调度与加锁由 [`super::MediaStore`] 负责。

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::errors::{LmsError, Result};

/// 一次规范化的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "media.ts")]
pub struct ThumbnailOutcome {
    pub original_width: u32,
    pub original_height: u32,
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

/// 规范化磁盘上的缩略图文件
///
/// 文件缺失或无法解码时返回 `ImageDecode`；已在上限以内的图片不会被重写。
pub fn normalize_thumbnail_file(path: &Path, max_dimension: u32) -> Result<ThumbnailOutcome> {
    if !path.is_file() {
        return Err(LmsError::image_decode(format!(
            "Thumbnail file not found: {}",
            path.display()
        )));
    }

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| LmsError::image_decode(format!("{}: {e}", path.display())))?;
    let format = reader
        .format()
        .ok_or_else(|| LmsError::image_decode(format!("{}: unknown image format", path.display())))?;
    let image = reader
        .decode()
        .map_err(|e| LmsError::image_decode(format!("{}: {e}", path.display())))?;

    let (original_width, original_height) = (image.width(), image.height());
    if original_width <= max_dimension && original_height <= max_dimension {
        return Ok(ThumbnailOutcome {
            original_width,
            original_height,
            width: original_width,
            height: original_height,
            resized: false,
        });
    }

    // thumbnail 保持宽高比，结果落在 max x max 以内
    let resized = image.thumbnail(max_dimension, max_dimension);
    let (width, height) = (resized.width(), resized.height());

    replace_atomically(path, &resized, format)?;

    Ok(ThumbnailOutcome {
        original_width,
        original_height,
        width,
        height,
        resized: true,
    })
}

// 先写入同目录的临时文件，再 rename 覆盖原文件
fn replace_atomically(path: &Path, image: &DynamicImage, format: ImageFormat) -> Result<()> {
    let tmp = temp_sibling(path);

    let encoded = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image.clone(),
    };

    if let Err(e) = encoded.save_with_format(&tmp, format) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        LmsError::file_operation(format!("Failed to replace {}: {e}", path.display()))
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 120, 200, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_large_image_is_downscaled_with_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 600, 400);

        let outcome = normalize_thumbnail_file(&path, 300).unwrap();
        assert!(outcome.resized);
        assert_eq!((outcome.width, outcome.height), (300, 200));
        assert_eq!(image::image_dimensions(&path).unwrap(), (300, 200));

        // 目录中不应残留临时文件
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_tall_jpeg_is_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tall.jpg");
        RgbImage::from_pixel(200, 900, Rgb([1, 2, 3])).save(&path).unwrap();

        let outcome = normalize_thumbnail_file(&path, 300).unwrap();
        assert!(outcome.resized);
        assert_eq!(outcome.height, 300);
        assert!(outcome.width <= 67 && outcome.width >= 66);
        let (w, h) = image::image_dimensions(&path).unwrap();
        assert_eq!((w, h), (outcome.width, outcome.height));
    }

    #[test]
    fn test_small_image_is_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "small.png", 300, 120);
        let before = fs::read(&path).unwrap();

        let outcome = normalize_thumbnail_file(&path, 300).unwrap();
        assert!(!outcome.resized);
        assert_eq!((outcome.width, outcome.height), (300, 120));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_normalizing_twice_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "square.png", 900, 900);

        normalize_thumbnail_file(&path, 300).unwrap();
        let second = normalize_thumbnail_file(&path, 300).unwrap();
        assert!(!second.resized);
        assert_eq!((second.width, second.height), (300, 300));
    }

    #[test]
    fn test_missing_and_corrupt_files_fail_to_decode() {
        let dir = tempfile::tempdir().unwrap();

        let missing = normalize_thumbnail_file(&dir.path().join("nope.png"), 300);
        assert!(matches!(missing, Err(LmsError::ImageDecode(_))));

        let corrupt = dir.path().join("broken.png");
        fs::write(&corrupt, b"definitely not an image").unwrap();
        let result = normalize_thumbnail_file(&corrupt, 300);
        assert!(matches!(result, Err(LmsError::ImageDecode(_))));
    }
}
