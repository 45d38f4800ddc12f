use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum GamedexError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    FileOperation(String),
    GitOperation(String),
    ContainerOperation(String),
    CronOperation(String),
}

impl GamedexError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GamedexError::DatabaseConfig(_) => "E001",
            GamedexError::DatabaseConnection(_) => "E002",
            GamedexError::DatabaseOperation(_) => "E003",
            GamedexError::Validation(_) => "E004",
            GamedexError::NotFound(_) => "E005",
            GamedexError::Serialization(_) => "E006",
            GamedexError::FileOperation(_) => "E007",
            GamedexError::GitOperation(_) => "E008",
            GamedexError::ContainerOperation(_) => "E009",
            GamedexError::CronOperation(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GamedexError::DatabaseConfig(_) => "Database Configuration Error",
            GamedexError::DatabaseConnection(_) => "Database Connection Error",
            GamedexError::DatabaseOperation(_) => "Database Operation Error",
            GamedexError::Validation(_) => "Validation Error",
            GamedexError::NotFound(_) => "Resource Not Found",
            GamedexError::Serialization(_) => "Serialization Error",
            GamedexError::FileOperation(_) => "File Operation Error",
            GamedexError::GitOperation(_) => "Git Operation Error",
            GamedexError::ContainerOperation(_) => "Container Operation Error",
            GamedexError::CronOperation(_) => "Cron Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GamedexError::DatabaseConfig(msg) => msg,
            GamedexError::DatabaseConnection(msg) => msg,
            GamedexError::DatabaseOperation(msg) => msg,
            GamedexError::Validation(msg) => msg,
            GamedexError::NotFound(msg) => msg,
            GamedexError::Serialization(msg) => msg,
            GamedexError::FileOperation(msg) => msg,
            GamedexError::GitOperation(msg) => msg,
            GamedexError::ContainerOperation(msg) => msg,
            GamedexError::CronOperation(msg) => msg,
        }
    }

    /// HTTP 状态码映射（API 层使用）
    pub fn http_status(&self) -> StatusCode {
        match self {
            GamedexError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GamedexError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GamedexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GamedexError {}

// 便捷的构造函数
impl GamedexError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        GamedexError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        GamedexError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        GamedexError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        GamedexError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GamedexError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GamedexError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GamedexError::FileOperation(msg.into())
    }

    pub fn git_operation<T: Into<String>>(msg: T) -> Self {
        GamedexError::GitOperation(msg.into())
    }

    pub fn container_operation<T: Into<String>>(msg: T) -> Self {
        GamedexError::ContainerOperation(msg.into())
    }

    pub fn cron_operation<T: Into<String>>(msg: T) -> Self {
        GamedexError::CronOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for GamedexError {
    fn from(err: sea_orm::DbErr) -> Self {
        GamedexError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GamedexError {
    fn from(err: std::io::Error) -> Self {
        GamedexError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GamedexError {
    fn from(err: serde_json::Error) -> Self {
        GamedexError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GamedexError>;
