//! Scheduled-task table management
//!
//! Production deploys own the whole crontab: install always writes the
//! complete table (exactly three recurring jobs), replacing whatever was
//! there before. That makes installation idempotent and the installed
//! state independent of history.

use std::path::PathBuf;

use tracing::info;

use crate::config::DeployConfig;
use crate::errors::{GamedexError, Result};

use super::runner::CommandRunner;

const CRON_HEADER: &str = "# gamedex scheduled tasks (managed, do not edit by hand)";

/// The three recurring jobs gamedex installs in production mode
pub struct CronSchedule {
    exe: String,
    repo_dir: String,
    log_dir: String,
    workdir: PathBuf,
}

impl CronSchedule {
    pub fn new(exe: impl Into<String>, config: &DeployConfig) -> Self {
        CronSchedule {
            exe: exe.into(),
            repo_dir: config.repo_dir.clone(),
            log_dir: config.log_dir.clone(),
            workdir: PathBuf::from(config.repo_dir.clone()),
        }
    }

    /// The three entries, in install order:
    /// 1. daily full rebuild
    /// 2. conditional redeploy every 5 minutes
    /// 3. weekly log cleanup
    pub fn entries(&self) -> Vec<String> {
        let cron_log = format!("{}/cron.log", self.log_dir);
        vec![
            format!(
                "0 4 * * * cd {} && {} deploy --from-scratch >> {} 2>&1",
                self.repo_dir, self.exe, cron_log
            ),
            format!(
                "*/5 * * * * cd {} && {} deploy --if-needed >> {} 2>&1",
                self.repo_dir, self.exe, cron_log
            ),
            format!(
                "0 3 * * 0 cd {} && {} logs cleanup >> {} 2>&1",
                self.repo_dir, self.exe, cron_log
            ),
        ]
    }

    /// Full table text, header included
    pub fn render(&self) -> String {
        let mut table = String::from(CRON_HEADER);
        table.push('\n');
        for entry in self.entries() {
            table.push_str(&entry);
            table.push('\n');
        }
        table
    }

    /// Replace the user crontab with this schedule
    pub fn install(&self, runner: &dyn CommandRunner) -> Result<()> {
        let table = self.render();
        let output = runner.run_with_stdin(&self.workdir, "crontab", &["-"], &table)?;
        if !output.success() {
            return Err(GamedexError::cron_operation(format!(
                "crontab install failed: {}",
                output.stderr.trim()
            )));
        }
        info!("Installed crontab with {} entries", self.entries().len());
        Ok(())
    }

    /// Clear the user crontab
    pub fn remove(&self, runner: &dyn CommandRunner) -> Result<()> {
        let output = runner.run(&self.workdir, "crontab", &["-r"])?;
        // "no crontab for <user>" 不算失败
        if !output.success() && !output.stderr.contains("no crontab") {
            return Err(GamedexError::cron_operation(format!(
                "crontab remove failed: {}",
                output.stderr.trim()
            )));
        }
        info!("Removed crontab");
        Ok(())
    }
}
