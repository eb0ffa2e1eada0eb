pub mod extractor;
pub mod file_magic;
pub mod parameter_error_handler;
pub mod sql;
pub mod validate;

pub use extractor::SafePk;
pub use file_magic::{image_extension_for, validate_magic_bytes};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
