use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error, warn};

use super::AppConfig;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Load configuration from TOML file with environment variable override
    pub fn load() -> Self {
        let mut config = Self::load_from_file(None);
        config.override_with_env();
        config
    }

    /// Load configuration from TOML file
    fn load_from_file(explicit_path: Option<&str>) -> Self {
        let default_paths = [
            "gamedex.toml",
            "config/gamedex.toml",
            "/etc/gamedex/config.toml",
        ];
        let paths: Vec<&str> = match explicit_path {
            Some(p) => vec![p],
            None => default_paths.to_vec(),
        };

        for path in &paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<AppConfig>(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    /// Override configuration with environment variables
    fn override_with_env(&mut self) {
        // Server config
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                error!("Invalid SERVER_PORT: {}", port);
            }
        }
        if let Ok(workers) = env::var("SERVER_WORKERS") {
            if let Ok(count) = workers.parse() {
                self.server.workers = count;
            } else {
                error!("Invalid SERVER_WORKERS: {}", workers);
            }
        }

        // Database config
        if let Ok(backend) = env::var("DATABASE_BACKEND") {
            self.database.backend = backend;
        }
        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.database.database_url = database_url;
        }
        if let Ok(pool_size) = env::var("DATABASE_POOL_SIZE") {
            if let Ok(size) = pool_size.parse::<u32>() {
                self.database.pool_size = size;
            } else {
                error!("Invalid DATABASE_POOL_SIZE: {}", pool_size);
            }
        }
        if let Ok(timeout) = env::var("DATABASE_TIMEOUT") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.database.timeout = t;
            } else {
                error!("Invalid DATABASE_TIMEOUT: {}", timeout);
            }
        }

        // Deploy config
        if let Ok(remote) = env::var("DEPLOY_REMOTE") {
            self.deploy.remote = remote;
        }
        if let Ok(branch) = env::var("DEPLOY_BRANCH") {
            self.deploy.branch = branch;
        }
        if let Ok(repo_dir) = env::var("DEPLOY_REPO_DIR") {
            self.deploy.repo_dir = repo_dir;
        }
        if let Ok(compose_file) = env::var("DEPLOY_COMPOSE_FILE") {
            self.deploy.compose_file = compose_file;
        }
        if let Ok(log_dir) = env::var("DEPLOY_LOG_DIR") {
            self.deploy.log_dir = log_dir;
        }
        if let Ok(days) = env::var("DEPLOY_RETENTION_DAYS") {
            if let Ok(d) = days.parse::<u32>() {
                self.deploy.retention_days = d;
            } else {
                error!("Invalid DEPLOY_RETENTION_DAYS: {}", days);
            }
        }

        // Logging config
        if let Ok(log_level) = env::var("RUST_LOG") {
            self.logging.level = log_level;
        }
        if let Ok(log_file) = env::var("LOG_FILE") {
            self.logging.file = Some(log_file);
        }
    }

    /// Generate a sample TOML configuration file
    pub fn generate_sample_config() -> String {
        let sample_config = AppConfig::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

// Global configuration instance

/// Get the global configuration instance
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(AppConfig::load);
}

/// Initialize the global configuration from an explicit file path
///
/// Used by the CLI `-c/--config` flag. Falls back to the default search
/// path when the file cannot be read.
pub fn load_config_from(path: &str) -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let mut config = AppConfig::load_from_file(Some(path));
        config.override_with_env();
        config
    })
}
