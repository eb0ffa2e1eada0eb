//! 保存前校验
//!
//! 每个不变量对应一个独立的校验函数，不依赖存储层。
//! `Validation` 错误的消息格式为 `字段: 说明`，服务层据此生成字段级反馈。

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{LmsError, Result};

/// 标题、名称、等级等字符字段的最大长度
pub const MAX_CHAR_FIELD_LENGTH: usize = 250;
/// 时区字段的最大长度
pub const MAX_TIME_ZONE_LENGTH: usize = 35;

static UIDB64_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_\-]+$").expect("Invalid uidb64 regex"));

static ACTIVATION_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Za-z]{1,13}-[0-9A-Za-z]{1,32}$").expect("Invalid activation token regex")
});

/// 校验评分区间 `[begin, end)`
///
/// 任一端缺失时跳过校验；`end < begin` 时返回 `ScoreRange` 错误。
pub fn validate_score_range(begin: Option<i16>, end: Option<i16>) -> Result<()> {
    if let (Some(begin), Some(end)) = (begin, end)
        && end < begin
    {
        return Err(LmsError::score_range(format!(
            "Score end value ({end}) is less than the score begin value ({begin})"
        )));
    }
    Ok(())
}

/// 校验课程起止时间，`start > end` 时返回 `DateRange` 错误
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if start > end {
        return Err(LmsError::date_range(
            "Start date cannot be greater than the end date",
        ));
    }
    Ok(())
}

/// 校验 IANA 时区标识
pub fn validate_time_zone(time_zone: &str) -> Result<Tz> {
    if time_zone.len() > MAX_TIME_ZONE_LENGTH {
        return Err(LmsError::validation(format!(
            "time_zone: must be at most {MAX_TIME_ZONE_LENGTH} characters"
        )));
    }
    time_zone
        .parse::<Tz>()
        .map_err(|_| LmsError::validation(format!("time_zone: unknown time zone '{time_zone}'")))
}

/// 校验必填字符字段：非空白且不超过最大长度
pub fn validate_char_field(field: &str, value: &str, max_length: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LmsError::validation(format!("{field}: this field is required")));
    }
    if value.chars().count() > max_length {
        return Err(LmsError::validation(format!(
            "{field}: must be at most {max_length} characters"
        )));
    }
    Ok(())
}

/// 校验必填长文本字段
pub fn validate_text_field(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LmsError::validation(format!("{field}: this field is required")));
    }
    Ok(())
}

/// 校验激活链接参数的格式
pub fn validate_activation_params(uidb64: &str, token: &str) -> Result<()> {
    if !UIDB64_RE.is_match(uidb64) {
        return Err(LmsError::validation("uidb64: malformed user identifier"));
    }
    if !ACTIVATION_TOKEN_RE.is_match(token) {
        return Err(LmsError::validation("token: malformed activation token"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_score_range_rejects_inverted_bounds() {
        let err = validate_score_range(Some(90), Some(80)).unwrap_err();
        assert!(matches!(err, LmsError::ScoreRange(_)));
        assert!(validate_score_range(Some(0), Some(-1)).is_err());
    }

    #[test]
    fn test_score_range_accepts_ordered_and_empty_bounds() {
        assert!(validate_score_range(Some(80), Some(90)).is_ok());
        assert!(validate_score_range(Some(80), Some(80)).is_ok());
        assert!(validate_score_range(None, Some(10)).is_ok());
        assert!(validate_score_range(Some(10), None).is_ok());
        assert!(validate_score_range(None, None).is_ok());
    }

    #[test]
    fn test_date_range() {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 5, 10, 0, 0, 0).unwrap();

        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());

        let err = validate_date_range(end, start).unwrap_err();
        assert!(matches!(err, LmsError::DateRange(_)));
    }

    #[test]
    fn test_time_zone() {
        assert!(validate_time_zone("Asia/Kolkata").is_ok());
        assert!(validate_time_zone("UTC").is_ok());
        assert!(validate_time_zone("America/Argentina/Buenos_Aires").is_ok());
        assert!(validate_time_zone("Mars/Olympus_Mons").is_err());
        assert!(validate_time_zone("").is_err());
    }

    #[test]
    fn test_char_field() {
        assert!(validate_char_field("title", "Rust 101", MAX_CHAR_FIELD_LENGTH).is_ok());

        let err = validate_char_field("title", "   ", MAX_CHAR_FIELD_LENGTH).unwrap_err();
        assert!(err.message().starts_with("title:"));

        let long = "x".repeat(MAX_CHAR_FIELD_LENGTH + 1);
        assert!(validate_char_field("title", &long, MAX_CHAR_FIELD_LENGTH).is_err());

        let exact = "é".repeat(MAX_CHAR_FIELD_LENGTH);
        assert!(validate_char_field("title", &exact, MAX_CHAR_FIELD_LENGTH).is_ok());
    }

    #[test]
    fn test_activation_params() {
        assert!(validate_activation_params("MTI", "5k2-8f0a1b2c3d4e5f6a7b8c").is_ok());
        assert!(validate_activation_params("MT I", "5k2-abc").is_err());
        assert!(validate_activation_params("MTI", "no_dash_here").is_err());
    }
}
