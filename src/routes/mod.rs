//! 路由表
//!
//! 所有路由集中登记在 [`ROUTES`] 中：路径模式、唯一的路由名与挂载函数。
//! 路由名同时注册到 actix 的资源表，因此 `HttpRequest::url_for` 与 [`reverse`]
//! 对同一名称给出相同的路径。

pub mod accounts;
pub mod courses;
pub mod dashboard;
pub mod grading;
pub mod sections;

use actix_web::{Resource, web};

use crate::errors::{LmsError, Result};
use crate::utils::SafePk;

/// 路由表中的一项
pub struct RouteEntry {
    pub name: &'static str,
    pub pattern: &'static str,
    pub mount: fn(Resource) -> Resource,
}

/// 按匹配顺序排列的全部路由
pub static ROUTES: &[RouteEntry] = &[
    RouteEntry {
        name: "home",
        pattern: "/",
        mount: courses::mount_home,
    },
    RouteEntry {
        name: "login",
        pattern: "/account/login/",
        mount: accounts::mount_login,
    },
    RouteEntry {
        name: "register",
        pattern: "/account/register/",
        mount: accounts::mount_register,
    },
    RouteEntry {
        name: "logout",
        pattern: "/account/logout/",
        mount: accounts::mount_logout,
    },
    RouteEntry {
        name: "account_activation_sent",
        pattern: "/account_activation_sent/",
        mount: accounts::mount_activation_sent,
    },
    RouteEntry {
        name: "activate",
        pattern: "/activate/{uidb64}/{token}/",
        mount: accounts::mount_activate,
    },
    RouteEntry {
        name: "dashboard_home",
        pattern: "/student/dashboard/home/",
        mount: dashboard::mount_dashboard_home,
    },
    RouteEntry {
        name: "course_create",
        pattern: "/course/new/",
        mount: courses::mount_course_create,
    },
    RouteEntry {
        name: "course_details",
        pattern: "/course/{pk:[0-9]+}/details/",
        mount: courses::mount_course_details,
    },
    RouteEntry {
        name: "course_manage",
        pattern: "/course/{pk:[0-9]+}/manage/",
        mount: courses::mount_course_manage,
    },
    RouteEntry {
        name: "course_sections",
        pattern: "/course/{pk:[0-9]+}/sections/",
        mount: sections::mount_course_sections,
    },
    RouteEntry {
        name: "course_statistics",
        pattern: "/course/{pk:[0-9]+}/statistics/",
        mount: courses::mount_course_statistics,
    },
    RouteEntry {
        name: "course_grading_scheme_create",
        pattern: "/course/{pk:[0-9]+}/grading_scheme/new",
        mount: grading::mount_grading_scheme_create,
    },
    RouteEntry {
        name: "course_grading_scheme_update",
        pattern: "/course/{pk:[0-9]+}/grading_scheme/update",
        mount: grading::mount_grading_scheme_update,
    },
    RouteEntry {
        name: "grading_scheme_names",
        pattern: "/grading_schemes/",
        mount: grading::mount_scheme_names,
    },
    RouteEntry {
        name: "grading_scheme_name_delete",
        pattern: "/grading_schemes/{pk:[0-9]+}/",
        mount: grading::mount_scheme_name_delete,
    },
];

// 配置路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for entry in ROUTES {
        cfg.service((entry.mount)(
            web::resource(entry.pattern).name(entry.name),
        ));
    }
}

/// 路径模式中的参数名，按出现顺序
pub fn placeholders(pattern: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let inner = &rest[open + 1..open + close];
        names.push(inner.split(':').next().unwrap_or(inner));
        rest = &rest[open + close + 1..];
    }
    names
}

/// 由路由名和参数生成路径
pub fn reverse(name: &str, params: &[&str]) -> Result<String> {
    let entry = ROUTES
        .iter()
        .find(|e| e.name == name)
        .ok_or_else(|| LmsError::route(format!("Unknown route name: {name}")))?;

    let expected = placeholders(entry.pattern);
    if expected.len() != params.len() {
        return Err(LmsError::route(format!(
            "Route {name} expects {} parameter(s), got {}",
            expected.len(),
            params.len()
        )));
    }

    for (param_name, value) in expected.iter().zip(params) {
        let valid = match *param_name {
            "pk" => SafePk::parse(Some(value)).is_ok(),
            _ => !value.is_empty() && !value.contains('/'),
        };
        if !valid {
            return Err(LmsError::route(format!(
                "Invalid value for {param_name} in route {name}: {value:?}"
            )));
        }
    }

    let mut path = String::with_capacity(entry.pattern.len());
    let mut rest = entry.pattern;
    let mut values = params.iter();
    while let Some(open) = rest.find('{') {
        let close = rest[open..].find('}').map_or(rest.len(), |c| open + c);
        path.push_str(&rest[..open]);
        if let Some(value) = values.next() {
            path.push_str(value);
        }
        rest = rest.get(close + 1..).unwrap_or("");
    }
    path.push_str(rest);

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as atest;
    use actix_web::{App, HttpRequest};
    use std::collections::HashSet;

    #[test]
    fn test_route_names_are_unique() {
        let names: HashSet<&str> = ROUTES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), ROUTES.len());
        assert!(ROUTES.iter().all(|r| r.pattern.starts_with('/')));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/course/{pk:[0-9]+}/details/"), vec!["pk"]);
        assert_eq!(
            placeholders("/activate/{uidb64}/{token}/"),
            vec!["uidb64", "token"]
        );
        assert!(placeholders("/").is_empty());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse("home", &[]).unwrap(), "/");
        assert_eq!(
            reverse("course_details", &["3"]).unwrap(),
            "/course/3/details/"
        );
        assert!(reverse("no_such_route", &[]).is_err());
        assert_eq!(
            reverse("course_grading_scheme_create", &["12"]).unwrap(),
            "/course/12/grading_scheme/new"
        );
        assert_eq!(
            reverse("activate", &["MTI", "5k2-abc"]).unwrap(),
            "/activate/MTI/5k2-abc/"
        );
    }

    #[test]
    fn test_reverse_rejects_bad_parameters() {
        assert!(matches!(
            reverse("course_manage", &["0"]),
            Err(LmsError::Route(_))
        ));
        assert!(reverse("course_manage", &["abc"]).is_err());
        assert!(reverse("course_manage", &[]).is_err());
        assert!(reverse("activate", &["a/b", "t"]).is_err());
    }

    async fn probe(req: HttpRequest) -> String {
        req.url_for("course_manage", ["5"])
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_url_for_matches_reverse() {
        let app = atest::init_service(
            App::new()
                .configure(configure_routes)
                .route("/__probe", web::get().to(probe)),
        )
        .await;

        let req = atest::TestRequest::get().uri("/__probe").to_request();
        let body = atest::call_and_read_body(&app, req).await;
        assert_eq!(body, reverse("course_manage", &["5"]).unwrap().as_bytes());
    }

    #[actix_web::test]
    async fn test_non_numeric_pk_does_not_match() {
        let app = atest::init_service(App::new().configure(configure_routes)).await;
        let req = atest::TestRequest::get()
            .uri("/course/abc/details/")
            .to_request();
        let resp = atest::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
