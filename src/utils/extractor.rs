//! 路径参数提取器
//!
//! 路由模式已经限制 `pk` 只能由数字组成，这里再排除 0 与溢出值。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 正整数主键 `<pk>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafePk(pub i64);

impl SafePk {
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        let raw = raw.ok_or_else(|| "Missing path parameter: pk".to_string())?;
        match raw.parse::<i64>() {
            Ok(pk) if pk > 0 => Ok(Self(pk)),
            _ => Err(format!("Invalid pk: {raw}")),
        }
    }
}

impl FromRequest for SafePk {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::parse(req.match_info().get("pk")).map_err(|msg| {
            let response =
                HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &msg));
            InternalError::from_response(msg, response).into()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pk() {
        assert_eq!(SafePk::parse(Some("42")), Ok(SafePk(42)));
        assert!(SafePk::parse(Some("0")).is_err());
        assert!(SafePk::parse(Some("-3")).is_err());
        assert!(SafePk::parse(Some("99999999999999999999")).is_err());
        assert!(SafePk::parse(None).is_err());
    }
}
