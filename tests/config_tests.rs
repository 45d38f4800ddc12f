//! Configuration parsing tests

use gamedex::config::AppConfig;

#[cfg(test)]
mod default_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.workers, 0);

        assert_eq!(config.database.backend, "sqlite");
        assert!(config.database.database_url.starts_with("sqlite://"));

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
        assert!(config.logging.file.is_none());

        assert_eq!(config.deploy.remote, "origin");
        assert_eq!(config.deploy.branch, "release");
        assert_eq!(config.deploy.compose_file, "docker-compose.yml");
        assert_eq!(config.deploy.services, vec!["api", "db", "proxy"]);
        assert_eq!(config.deploy.retention_days, 7);
    }
}

#[cfg(test)]
mod toml_tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
            [server]
            port = 9000

            [deploy]
            branch = "main"
            services = ["web", "postgres"]
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.server.port, 9000);
        // Unset fields fall back to their defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.deploy.branch, "main");
        assert_eq!(config.deploy.services, vec!["web", "postgres"]);
        assert_eq!(config.deploy.remote, "origin");
        assert_eq!(config.database.backend, "sqlite");
    }

    #[test]
    fn test_parse_empty_toml_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, AppConfig::default().server.port);
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = AppConfig::generate_sample_config();
        let parsed: AppConfig = toml::from_str(&sample).expect("sample config must parse");
        assert_eq!(parsed.server.port, AppConfig::default().server.port);
        assert_eq!(parsed.deploy.branch, AppConfig::default().deploy.branch);
    }

    #[test]
    fn test_parse_full_deploy_section() {
        let toml_str = r#"
            [deploy]
            remote = "upstream"
            branch = "production"
            repo_dir = "/srv/app"
            compose_file = "compose.prod.yml"
            services = ["app"]
            log_dir = "/var/log/app"
            retention_days = 30
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.deploy.remote, "upstream");
        assert_eq!(config.deploy.branch, "production");
        assert_eq!(config.deploy.repo_dir, "/srv/app");
        assert_eq!(config.deploy.compose_file, "compose.prod.yml");
        assert_eq!(config.deploy.log_dir, "/var/log/app");
        assert_eq!(config.deploy.retention_days, 30);
    }
}
