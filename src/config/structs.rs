use serde::{Deserialize, Serialize};

/// 静态配置（从 TOML 加载，启动时使用）
///
/// 包含四个部分：
/// - server: HTTP 服务器地址、端口、worker 数量
/// - database: 数据库连接配置
/// - logging: 日志配置
/// - deploy: 发布自动化配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 0 表示按 CPU 数自动选择
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlite / postgres / mysql
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Connect/acquire timeout in seconds
    #[serde(default = "default_db_timeout")]
    pub timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_url: default_database_url(),
            pool_size: default_pool_size(),
            timeout: default_db_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path; empty or absent means stdout
    #[serde(default)]
    pub file: Option<String>,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            format: default_log_format(),
            enable_rotation: false,
            max_backups: default_max_backups(),
        }
    }
}

/// 发布自动化配置
///
/// `services` 列出 compose 栈里需要跟踪日志的服务名，
/// 顺序即日志跟随进程的启动顺序。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_remote")]
    pub remote: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Directory containing the tracked checkout and compose file
    #[serde(default = "default_repo_dir")]
    pub repo_dir: String,
    #[serde(default = "default_compose_file")]
    pub compose_file: String,
    #[serde(default = "default_services")]
    pub services: Vec<String>,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// Log files older than this many days are removed by `logs cleanup`
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
            repo_dir: default_repo_dir(),
            compose_file: default_compose_file(),
            services: default_services(),
            log_dir: default_log_dir(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_backend() -> String {
    "sqlite".to_string()
}

fn default_database_url() -> String {
    "sqlite://gamedex.db?mode=rwc".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_db_timeout() -> u64 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    7
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "release".to_string()
}

fn default_repo_dir() -> String {
    ".".to_string()
}

fn default_compose_file() -> String {
    "docker-compose.yml".to_string()
}

fn default_services() -> Vec<String> {
    vec!["api".to_string(), "db".to_string(), "proxy".to_string()]
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_retention_days() -> u32 {
    7
}
