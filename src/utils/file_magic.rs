/// 验证缩略图内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".png"）
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    match image_extension_for(data) {
        Some(detected) => {
            let ext = extension.to_lowercase();
            ext == detected || (detected == ".jpg" && ext == ".jpeg")
        }
        None => false,
    }
}

/// 根据魔术字节识别图片格式，返回规范扩展名
pub fn image_extension_for(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(".png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(".jpg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some(".gif")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some(".webp")
    } else if data.starts_with(b"BM") {
        Some(".bmp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpg"));
        assert!(validate_magic_bytes(&jpeg_header, ".jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, ".png"));
    }

    #[test]
    fn test_webp_magic() {
        let webp = b"RIFF\x00\x00\x00\x00WEBPVP8 ";
        assert_eq!(image_extension_for(webp), Some(".webp"));
        assert!(!validate_magic_bytes(b"RIFF\x00\x00\x00\x00WAVE", ".webp"));
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(!validate_magic_bytes(b"%PDF-1.4", ".png"));
        assert!(!validate_magic_bytes(&[], ".png"));
        assert_eq!(image_extension_for(b"hello"), None);
    }
}
