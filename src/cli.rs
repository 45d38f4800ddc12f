//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for gamedex using clap's derive
//! macros, plus the handlers for the release-automation subcommands.

use std::sync::Arc;

use chrono::Local;
use clap::{Parser, Subcommand};
use colored::*;

use crate::config::AppConfig;
use crate::deploy::{CronSchedule, DeployFlags, DeployOutcome, ReleaseReconciler, SystemRunner, logs};
use crate::errors::{GamedexError, Result};

/// Gamedex - games and reviews API with built-in release automation
#[derive(Parser)]
#[command(name = "gamedex")]
#[command(version)]
#[command(about = "A small CRUD API for games and game reviews", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default when no command is given)
    Serve,

    /// Reconcile the deployed stack with the release branch
    ///
    /// Fetches the tracked branch, compares commit ids, and rebuilds and
    /// restarts the compose stack when they differ. Flags also honor the
    /// FROM_SCRATCH / IF_NEEDED / PROD environment variables.
    Deploy {
        /// Rebuild images without layer cache, re-pulling base images
        #[arg(long)]
        from_scratch: bool,

        /// Only act when the release branch has new commits
        #[arg(long)]
        if_needed: bool,

        /// Reinstall the crontab after a successful deploy
        #[arg(long)]
        prod: bool,
    },

    /// Manage the scheduled-task table
    Cron {
        #[command(subcommand)]
        action: CronAction,
    },

    /// Deploy log housekeeping
    Logs {
        #[command(subcommand)]
        action: LogsAction,
    },
}

#[derive(Subcommand)]
pub enum CronAction {
    /// Replace the crontab with the three gamedex jobs
    Install,
    /// Clear the crontab
    Remove,
}

#[derive(Subcommand)]
pub enum LogsAction {
    /// Remove dated log files older than the retention window
    Cleanup {
        /// Override the configured retention window (days)
        #[arg(long)]
        days: Option<u32>,
    },
}

/// `gamedex deploy`
pub fn handle_deploy(
    config: &AppConfig,
    from_scratch: bool,
    if_needed: bool,
    prod: bool,
) -> Result<()> {
    let flags = DeployFlags {
        from_scratch,
        if_needed,
        prod,
    }
    .merged_with_env();

    let runner = Arc::new(SystemRunner);
    let reconciler = ReleaseReconciler::new(config.deploy.clone(), runner.clone());

    match reconciler.run(&flags)? {
        DeployOutcome::UpToDate => {
            println!(
                "{} Release branch already up to date, nothing to deploy",
                "✓".bold().green()
            );
        }
        DeployOutcome::Deployed { previous, current } => {
            println!(
                "{} Deployed {} -> {}",
                "✓".bold().green(),
                &previous[..previous.len().min(12)],
                &current[..current.len().min(12)]
            );
            if flags.prod {
                let schedule = CronSchedule::new(current_exe_display()?, &config.deploy);
                schedule.install(runner.as_ref())?;
                println!(
                    "{} Crontab replaced ({} entries)",
                    "✓".bold().green(),
                    schedule.entries().len()
                );
            }
        }
    }
    Ok(())
}

/// `gamedex cron install` / `gamedex cron remove`
pub fn handle_cron(config: &AppConfig, action: &CronAction) -> Result<()> {
    let runner = SystemRunner;
    let schedule = CronSchedule::new(current_exe_display()?, &config.deploy);

    match action {
        CronAction::Install => {
            schedule.install(&runner)?;
            println!(
                "{} Crontab replaced ({} entries)",
                "✓".bold().green(),
                schedule.entries().len()
            );
        }
        CronAction::Remove => {
            schedule.remove(&runner)?;
            println!("{} Crontab cleared", "✓".bold().green());
        }
    }
    Ok(())
}

/// `gamedex logs cleanup`
pub fn handle_logs(config: &AppConfig, action: &LogsAction) -> Result<()> {
    match action {
        LogsAction::Cleanup { days } => {
            let retention = days.unwrap_or(config.deploy.retention_days);
            let runner = Arc::new(SystemRunner);
            let reconciler = ReleaseReconciler::new(config.deploy.clone(), runner);
            let removed = logs::cleanup_older_than(
                &reconciler.log_dir(),
                retention,
                Local::now().date_naive(),
            )?;
            println!(
                "{} Removed {} stale log file(s)",
                "✓".bold().green(),
                removed
            );
        }
    }
    Ok(())
}

fn current_exe_display() -> Result<String> {
    std::env::current_exe()
        .map(|p| p.display().to_string())
        .map_err(|e| GamedexError::file_operation(format!("无法确定自身路径: {}", e)))
}
