use actix_web::{HttpRequest, HttpResponse, Resource, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::DashboardService;

// 懒加载的全局 DashboardService 实例
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);

// 学生仪表盘首页
pub async fn dashboard_home(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.home(&req).await
}

pub(super) fn mount_dashboard_home(resource: Resource) -> Resource {
    resource.route(web::get().to(dashboard_home))
}
