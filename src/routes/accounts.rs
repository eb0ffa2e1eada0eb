use actix_web::{HttpResponse, Resource, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::accounts::requests::ActivationPath;
use crate::services::AccountService;

static ACCOUNT_SERVICE: Lazy<AccountService> = Lazy::new(AccountService::new_lazy);

pub async fn login() -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.unavailable("login").await
}

pub async fn register() -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.unavailable("register").await
}

pub async fn logout() -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.unavailable("logout").await
}

pub async fn account_activation_sent() -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.activation_sent().await
}

pub async fn activate(path: web::Path<ActivationPath>) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.activate(path.into_inner()).await
}

pub(super) fn mount_login(resource: Resource) -> Resource {
    resource
        .route(web::get().to(login))
        .route(web::post().to(login))
}

pub(super) fn mount_register(resource: Resource) -> Resource {
    resource
        .route(web::get().to(register))
        .route(web::post().to(register))
}

pub(super) fn mount_logout(resource: Resource) -> Resource {
    resource
        .route(web::get().to(logout))
        .route(web::post().to(logout))
}

pub(super) fn mount_activation_sent(resource: Resource) -> Resource {
    resource.route(web::get().to(account_activation_sent))
}

pub(super) fn mount_activate(resource: Resource) -> Resource {
    resource.route(web::get().to(activate))
}
