use crate::error::AppError;
use crate::scoring::{ScoringConfig, ScoringOverrides};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/opentender";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub scoring: ScoringOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            },
            scoring: ScoringOverrides::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 < opentender.{toml,yaml,json} < OPENTENDER__* 环境变量
    /// < DATABASE_URL / SERVER_HOST / SERVER_PORT
    pub fn load() -> Result<Self, AppError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("opentender").required(false))
            .add_source(
                Environment::with_prefix("OPENTENDER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("scoring.priority_countries")
                    .with_list_parse_key("scoring.target_sectors")
                    .with_list_parse_key("scoring.relevant_keywords")
                    .with_list_parse_key("scoring.less_relevant_types")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?;

        Ok(Self::from_builder(builder)?)
    }

    /// 内置默认值
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    /// 评分引擎配置, 未配置的列表使用内置默认值
    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig::from_overrides(self.scoring.clone())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
