//! 业务数据模型
//!
//! 按领域划分：`courses`、`grading`、`sections`、`dashboard`、`accounts`，
//! 以及通用的分页与响应结构。

pub mod accounts;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod grading;
pub mod sections;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    PayloadTooLarge = 1006,

    // 账户 2xxx
    AccountServiceUnavailable = 2000,
    ActivationLinkInvalid = 2001,

    // 课程 3xxx
    CourseNotFound = 3000,
    CourseAlreadyExists = 3001,
    CourseCreationFailed = 3002,
    CourseUpdateFailed = 3003,
    CourseDeleteFailed = 3004,
    CourseDateRangeInvalid = 3005,

    // 缩略图 31xx
    ThumbnailUploadFailed = 3100,
    ThumbnailDecodeFailed = 3101,
    FileTypeNotAllowed = 3102,
    FileSizeExceeded = 3103,
    MultifileUploadNotAllowed = 3104,
    FileNotFound = 3105,

    // 评分方案 4xxx
    GradingSchemeNotFound = 4000,
    GradingSchemeNameNotFound = 4001,
    GradingSchemeNameAlreadyExists = 4002,
    GradingSchemeRangeInvalid = 4003,
    GradingSchemeNotAssigned = 4004,

    // 分组 5xxx
    SectionNotFound = 5000,
    SectionAlreadyExists = 5001,
}
