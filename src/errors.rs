//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    ScoreRange("E006", "Range Error"),
    DateRange("E007", "Date Range Error"),
    ImageDecode("E008", "Image Decode Error"),
    NotFound("E009", "Resource Not Found"),
    Conflict("E010", "Unique Constraint Violation"),
    Serialization("E011", "Serialization Error"),
    DateParse("E012", "Date Parse Error"),
    Route("E013", "Route Error"),
}

impl LmsError {
    /// 是否为保存前的校验错误（应作为字段反馈返回给调用方，而不是记录为系统故障）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LmsError::Validation(_) | LmsError::ScoreRange(_) | LmsError::DateRange(_)
        )
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => LmsError::Conflict(detail),
            _ => LmsError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for LmsError {
    fn from(err: std::io::Error) -> Self {
        LmsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LmsError {
    fn from(err: serde_json::Error) -> Self {
        LmsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LmsError {
    fn from(err: chrono::ParseError) -> Self {
        LmsError::DateParse(err.to_string())
    }
}

impl From<image::ImageError> for LmsError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => LmsError::FileOperation(e.to_string()),
            other => LmsError::ImageDecode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LmsError::database_config("test").code(), "E001");
        assert_eq!(LmsError::validation("test").code(), "E005");
        assert_eq!(LmsError::score_range("test").code(), "E006");
        assert_eq!(LmsError::date_range("test").code(), "E007");
        assert_eq!(LmsError::image_decode("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(LmsError::score_range("test").error_type(), "Range Error");
        assert_eq!(LmsError::date_range("test").error_type(), "Date Range Error");
        assert_eq!(
            LmsError::image_decode("test").error_type(),
            "Image Decode Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = LmsError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = LmsError::date_range("Start date cannot be greater than the end date");
        let formatted = err.format_simple();
        assert!(formatted.contains("Date Range Error"));
        assert!(formatted.contains("Start date"));
    }

    #[test]
    fn test_validation_classification() {
        assert!(LmsError::score_range("x").is_validation());
        assert!(LmsError::date_range("x").is_validation());
        assert!(LmsError::validation("x").is_validation());
        assert!(!LmsError::image_decode("x").is_validation());
        assert!(!LmsError::database_operation("x").is_validation());
    }
}
