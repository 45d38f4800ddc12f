//! CLI argument parsing tests

use clap::Parser;
use gamedex::cli::{Cli, Commands, CronAction, LogsAction};

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_server_mode() {
        let cli = Cli::try_parse_from(["gamedex"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from(["gamedex", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["gamedex", "-c", "custom.toml", "serve"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));

        let cli = Cli::try_parse_from(["gamedex", "deploy", "--config", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_deploy_flags_default_off() {
        let cli = Cli::try_parse_from(["gamedex", "deploy"]).unwrap();
        match cli.command {
            Some(Commands::Deploy {
                from_scratch,
                if_needed,
                prod,
            }) => {
                assert!(!from_scratch);
                assert!(!if_needed);
                assert!(!prod);
            }
            _ => panic!("expected deploy command"),
        }
    }

    #[test]
    fn test_deploy_flags_parse() {
        let cli = Cli::try_parse_from([
            "gamedex",
            "deploy",
            "--from-scratch",
            "--if-needed",
            "--prod",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Deploy {
                from_scratch,
                if_needed,
                prod,
            }) => {
                assert!(from_scratch);
                assert!(if_needed);
                assert!(prod);
            }
            _ => panic!("expected deploy command"),
        }
    }

    #[test]
    fn test_cron_subcommands() {
        let cli = Cli::try_parse_from(["gamedex", "cron", "install"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Cron {
                action: CronAction::Install
            })
        ));

        let cli = Cli::try_parse_from(["gamedex", "cron", "remove"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Cron {
                action: CronAction::Remove
            })
        ));
    }

    #[test]
    fn test_logs_cleanup_with_days_override() {
        let cli = Cli::try_parse_from(["gamedex", "logs", "cleanup", "--days", "30"]).unwrap();
        match cli.command {
            Some(Commands::Logs {
                action: LogsAction::Cleanup { days },
            }) => assert_eq!(days, Some(30)),
            _ => panic!("expected logs cleanup command"),
        }
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["gamedex", "frobnicate"]).is_err());
    }
}
