//! 账户入口
//!
//! 登录、注册与激活流程不在本服务中实现；这些路由保留在路由表中，
//! 统一返回 501，激活链接只做格式校验。

use actix_web::{HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode, accounts::requests::ActivationPath};
use crate::utils::validate::validate_activation_params;

#[derive(Default)]
pub struct AccountService;

impl AccountService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub async fn unavailable(&self, action: &str) -> ActixResult<HttpResponse> {
        debug!("Account action '{}' requested", action);
        Ok(unavailable_response(action))
    }

    pub async fn activation_sent(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Please confirm your email address to complete the registration",
        )))
    }

    pub async fn activate(&self, path: ActivationPath) -> ActixResult<HttpResponse> {
        if let Err(e) = validate_activation_params(&path.uidb64, &path.token) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ActivationLinkInvalid,
                format!("Activation link is invalid: {}", e.message()),
            )));
        }
        Ok(unavailable_response("activate"))
    }
}

fn unavailable_response(action: &str) -> HttpResponse {
    HttpResponse::NotImplemented().json(ApiResponse::error_empty(
        ErrorCode::AccountServiceUnavailable,
        format!("Account service is not available: {action}"),
    ))
}
