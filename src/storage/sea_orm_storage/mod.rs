//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod courses;
mod grading;
mod sections;

use crate::config::DatabaseConfig;
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("Database migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 单连接的内存 SQLite 数据库，主要用于测试
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("Invalid SQLite URL: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // 内存数据库每个连接相互独立，不使用 WAL，且连接池只保留一个常驻连接
        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("Unable to connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or .db/.sqlite file paths"
            )))
        }
    }
}

/// 为数据库错误附加上下文，唯一约束冲突保持为 `Conflict`
pub(crate) fn db_err(context: &'static str) -> impl FnOnce(DbErr) -> LmsError {
    move |err| match LmsError::from(err) {
        LmsError::DatabaseOperation(msg) => LmsError::database_operation(format!("{context}: {msg}")),
        other => other,
    }
}

// Storage trait 实现
use crate::models::{
    PaginationQuery,
    courses::{
        entities::{Course, CourseDraft},
        requests::CourseListQuery,
        responses::CourseListResponse,
    },
    grading::{
        entities::{GradingScheme, GradingSchemeDraft, GradingSchemeName},
        requests::GradingSchemeChanges,
        responses::GradingSchemeNameDeletion,
    },
    sections::{entities::Section, responses::SectionListResponse},
};
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl Storage for SeaOrmStorage {
    // 评分方案名称模块
    async fn create_grading_scheme_name(&self, name: &str) -> Result<GradingSchemeName> {
        self.create_grading_scheme_name_impl(name).await
    }

    async fn get_grading_scheme_name_by_id(&self, id: i64) -> Result<Option<GradingSchemeName>> {
        self.get_grading_scheme_name_by_id_impl(id).await
    }

    async fn list_grading_scheme_names(&self) -> Result<Vec<GradingSchemeName>> {
        self.list_grading_scheme_names_impl().await
    }

    async fn delete_grading_scheme_name(
        &self,
        id: i64,
    ) -> Result<Option<GradingSchemeNameDeletion>> {
        self.delete_grading_scheme_name_impl(id).await
    }

    // 评分区间模块
    async fn create_grading_scheme(&self, draft: GradingSchemeDraft) -> Result<GradingScheme> {
        self.create_grading_scheme_impl(draft).await
    }

    async fn get_grading_scheme_by_id(&self, id: i64) -> Result<Option<GradingScheme>> {
        self.get_grading_scheme_by_id_impl(id).await
    }

    async fn list_grading_schemes(&self, scheme_name_id: i64) -> Result<Vec<GradingScheme>> {
        self.list_grading_schemes_impl(scheme_name_id).await
    }

    async fn update_grading_scheme(
        &self,
        id: i64,
        changes: GradingSchemeChanges,
    ) -> Result<Option<GradingScheme>> {
        self.update_grading_scheme_impl(id, changes).await
    }

    // 课程模块
    async fn create_course(&self, draft: CourseDraft) -> Result<Course> {
        self.create_course_impl(draft).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_running_courses(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Course>> {
        self.list_running_courses_impl(now, limit).await
    }

    async fn list_upcoming_courses(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Course>> {
        self.list_upcoming_courses_impl(now, limit).await
    }

    async fn list_open_enrollment_courses(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<Course>> {
        self.list_open_enrollment_courses_impl(now, limit).await
    }

    async fn update_course(&self, id: i64, draft: CourseDraft) -> Result<Option<Course>> {
        self.update_course_impl(id, draft).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 分组模块
    async fn create_section(&self, name: &str) -> Result<Section> {
        self.create_section_impl(name).await
    }

    async fn list_sections_with_pagination(
        &self,
        query: PaginationQuery,
    ) -> Result<SectionListResponse> {
        self.list_sections_with_pagination_impl(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LmsError;
    use chrono::Duration;

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::in_memory().await.unwrap()
    }

    fn draft(title: &str, start: DateTime<Utc>, days: i64) -> CourseDraft {
        CourseDraft {
            title: title.to_string(),
            thumbnail: Some("default.png".to_string()),
            time_zone: "Asia/Kolkata".to_string(),
            start_date: start,
            end_date: start + Duration::days(days),
            grading_scheme_id: None,
            description: String::new(),
            allow_self_enroll: true,
            enrollment_open_to_all: false,
        }
    }

    fn band(scheme_name_id: i64, grade: &str, begin: i16, end: i16) -> GradingSchemeDraft {
        GradingSchemeDraft {
            scheme_name_id,
            grade: grade.to_string(),
            score_range_begin: begin,
            score_range_end: end,
        }
    }

    #[actix_web::test]
    async fn test_deleting_scheme_name_cascades_bands_and_clears_courses() {
        let storage = storage().await;
        let name = storage.create_grading_scheme_name("Standard").await.unwrap();
        let other = storage.create_grading_scheme_name("Pass/Fail").await.unwrap();

        storage.create_grading_scheme(band(name.id, "A", 90, 101)).await.unwrap();
        storage.create_grading_scheme(band(name.id, "B", 80, 90)).await.unwrap();
        storage.create_grading_scheme(band(other.id, "P", 50, 101)).await.unwrap();

        let mut with_scheme = draft("Compilers", Utc::now(), 30);
        with_scheme.grading_scheme_id = Some(name.id);
        let course = storage.create_course(with_scheme).await.unwrap();

        let deletion = storage
            .delete_grading_scheme_name(name.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deletion.deleted_bands, 2);
        assert_eq!(deletion.cleared_courses, 1);

        assert!(storage.list_grading_schemes(name.id).await.unwrap().is_empty());
        assert_eq!(storage.list_grading_schemes(other.id).await.unwrap().len(), 1);

        let course = storage.get_course_by_id(course.id).await.unwrap().unwrap();
        assert_eq!(course.grading_scheme_id, None);

        assert!(storage.delete_grading_scheme_name(name.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_unique_titles_and_names_conflict() {
        let storage = storage().await;
        storage.create_course(draft("Algorithms", Utc::now(), 10)).await.unwrap();
        let err = storage
            .create_course(draft("Algorithms", Utc::now(), 20))
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Conflict(_)));

        storage.create_section("Morning").await.unwrap();
        let err = storage.create_section("Morning").await.unwrap_err();
        assert!(matches!(err, LmsError::Conflict(_)));
    }

    #[actix_web::test]
    async fn test_course_windows() {
        let storage = storage().await;
        let now = Utc::now();

        storage
            .create_course(draft("Running", now - Duration::days(5), 10))
            .await
            .unwrap();
        storage
            .create_course(draft("Upcoming", now + Duration::days(5), 10))
            .await
            .unwrap();
        let mut open = draft("Finished", now - Duration::days(30), 10);
        open.enrollment_open_to_all = true;
        storage.create_course(open).await.unwrap();
        let mut open = draft("Open", now + Duration::days(1), 10);
        open.enrollment_open_to_all = true;
        storage.create_course(open).await.unwrap();

        let running = storage.list_running_courses(now, 10).await.unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].title, "Running");

        let upcoming = storage.list_upcoming_courses(now, 10).await.unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Open", "Upcoming"]);

        let open = storage.list_open_enrollment_courses(now, 10).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Open");
    }

    #[actix_web::test]
    async fn test_course_search_escapes_wildcards() {
        let storage = storage().await;
        storage.create_course(draft("100% Rust", Utc::now(), 1)).await.unwrap();
        storage.create_course(draft("1000 Rust", Utc::now(), 1)).await.unwrap();

        let result = storage
            .list_courses_with_pagination(CourseListQuery {
                pagination: PaginationQuery::default(),
                search: Some("0%".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 1);
        assert_eq!(result.items[0].title, "100% Rust");
    }

    #[actix_web::test]
    async fn test_update_and_delete_course() {
        let storage = storage().await;
        let course = storage
            .create_course(draft("Databases", Utc::now(), 10))
            .await
            .unwrap();

        let mut changed = course.to_draft();
        changed.description = "B-trees".to_string();
        let updated = storage.update_course(course.id, changed).await.unwrap().unwrap();
        assert_eq!(updated.description, "B-trees");
        assert_eq!(updated.title, "Databases");

        assert!(storage.update_course(999, course.to_draft()).await.unwrap().is_none());
        assert!(storage.delete_course(course.id).await.unwrap());
        assert!(!storage.delete_course(course.id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_section_pagination() {
        let storage = storage().await;
        for name in ["C", "A", "B"] {
            storage.create_section(name).await.unwrap();
        }

        let page = storage
            .list_sections_with_pagination(PaginationQuery { page: 2, size: 2 })
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "C");
    }
}
