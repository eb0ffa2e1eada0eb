use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

// 显式环境变量 -> 配置键
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("APP_ENV", "app.environment"),
    ("RUST_LOG", "app.log_level"),
    ("SERVER_HOST", "server.host"),
    ("SERVER_PORT", "server.port"),
    ("UNIX_SOCKET", "server.unix_socket_path"),
    ("CPU_COUNT", "server.workers"),
    ("DATABASE_URL", "database.url"),
    ("MEDIA_ROOT", "media.root"),
    ("DEFAULT_TIME_ZONE", "course.default_time_zone"),
];

impl AppConfig {
    /// 加载配置
    ///
    /// 依次合并 `config.toml`、`config.<APP_ENV>.toml`、`LMS_*` 环境变量与
    /// `ENV_OVERRIDES` 中的变量，然后检查 `media` 与 `course` 段的取值。
    pub fn load() -> Result<Self, ConfigError> {
        let env_name = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name(&format!("config.{env_name}")).required(false))
            .add_source(
                Environment::with_prefix("LMS")
                    .separator("_")
                    .try_parsing(true),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let mut app_config: AppConfig = builder.build()?.try_deserialize()?;

        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.check()?;
        Ok(app_config)
    }

    /// 缩略图与课程默认值的基本约束，时区是否可识别在启动阶段检查
    fn check(&self) -> Result<(), ConfigError> {
        let media = &self.media;
        if media.thumbnail_max_dimension == 0 {
            return Err(ConfigError::Message(
                "media.thumbnail_max_dimension must be greater than 0".into(),
            ));
        }
        if media.default_thumbnail.trim().is_empty() {
            return Err(ConfigError::Message(
                "media.default_thumbnail must not be empty".into(),
            ));
        }
        if media.thumbnail_dir.trim().is_empty() || media.thumbnail_dir.contains("..") {
            return Err(ConfigError::Message(format!(
                "media.thumbnail_dir is invalid: '{}'",
                media.thumbnail_dir
            )));
        }
        if self.course.default_time_zone.trim().is_empty() {
            return Err(ConfigError::Message(
                "course.default_time_zone must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// 全局配置，首次访问时加载
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 启动时调用，重复初始化返回错误
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Unix 套接字路径，空字符串表示使用 TCP
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(extra: &str) -> Result<AppConfig, ConfigError> {
        let base = include_str!("../../config.toml");
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(base, FileFormat::Toml))
            .add_source(File::from_str(extra, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let config = from_toml("").unwrap();
        assert_eq!(config.media.default_thumbnail, "default.png");
        assert_eq!(config.media.thumbnail_max_dimension, 300);
        assert_eq!(config.course.default_time_zone, "Asia/Kolkata");
    }

    #[test]
    fn test_rejects_invalid_media_settings() {
        assert!(from_toml("[media]\nthumbnail_max_dimension = 0").is_err());
        assert!(from_toml("[media]\ndefault_thumbnail = \"\"").is_err());
        assert!(from_toml("[media]\nthumbnail_dir = \"../outside\"").is_err());
    }
}
