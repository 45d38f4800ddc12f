//! Release branch reconciliation
//!
//! One invocation is one reconciliation pass: fetch the tracked branch,
//! compare commit ids, and when they differ (or when unconditional mode is
//! requested) run exactly one rebuild-and-restart cycle. Up-to-date
//! detection compares resolved commit ids, never porcelain output.

use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, info};

use crate::config::DeployConfig;
use crate::errors::{GamedexError, Result};

use super::compose::ComposeStack;
use super::logs::dated_log_path;
use super::runner::{CommandOutput, CommandRunner};

/// Deploy 行为开关
///
/// CLI 标志与 `FROM_SCRATCH` / `IF_NEEDED` / `PROD` 环境变量取并集，
/// 两边任一为真即生效。
#[derive(Debug, Clone, Copy, Default)]
pub struct DeployFlags {
    /// Rebuild images without layer cache, re-pulling base images
    pub from_scratch: bool,
    /// Only act when the release branch has new commits
    pub if_needed: bool,
    /// Reinstall the crontab after a successful deploy
    pub prod: bool,
}

impl DeployFlags {
    pub fn from_env() -> Self {
        DeployFlags {
            from_scratch: env_truthy("FROM_SCRATCH"),
            if_needed: env_truthy("IF_NEEDED"),
            prod: env_truthy("PROD"),
        }
    }

    pub fn merged_with_env(self) -> Self {
        let env = Self::from_env();
        DeployFlags {
            from_scratch: self.from_scratch || env.from_scratch,
            if_needed: self.if_needed || env.if_needed,
            prod: self.prod || env.prod,
        }
    }
}

fn env_truthy(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            v == "1" || v == "true" || v == "yes" || v == "on"
        })
        .unwrap_or(false)
}

/// What a reconciliation pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// Branch already at the remote tip and if-needed was set; nothing done
    UpToDate,
    /// One rebuild-and-restart cycle completed
    Deployed { previous: String, current: String },
}

pub struct ReleaseReconciler {
    config: DeployConfig,
    runner: Arc<dyn CommandRunner>,
    stack: ComposeStack,
}

impl ReleaseReconciler {
    pub fn new(config: DeployConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let stack = ComposeStack::new(
            runner.clone(),
            config.repo_dir.clone(),
            config.compose_file.clone(),
            config.services.clone(),
        );
        ReleaseReconciler {
            config,
            runner,
            stack,
        }
    }

    fn repo_dir(&self) -> &Path {
        Path::new(&self.config.repo_dir)
    }

    fn git(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.runner.run(self.repo_dir(), "git", args)?;
        if !output.success() {
            return Err(GamedexError::git_operation(format!(
                "git {} failed: {}",
                args.join(" "),
                output.stderr.trim()
            )));
        }
        Ok(output)
    }

    /// One reconciliation pass
    pub fn run(&self, flags: &DeployFlags) -> Result<DeployOutcome> {
        let remote = self.config.remote.as_str();
        let branch = self.config.branch.as_str();
        let remote_ref = format!("{}/{}", remote, branch);

        info!("Fetching {} {}", remote, branch);
        self.git(&["fetch", remote, branch])?;

        let local = self.git(&["rev-parse", "HEAD"])?.stdout_trimmed().to_string();
        let remote_tip = self
            .git(&["rev-parse", &remote_ref])?
            .stdout_trimmed()
            .to_string();
        debug!("local {} remote {}", local, remote_tip);

        if local == remote_tip && flags.if_needed {
            info!("Release branch up to date at {}, nothing to do", &local[..local.len().min(12)]);
            return Ok(DeployOutcome::UpToDate);
        }

        self.git(&["switch", branch])?;
        self.git(&["merge", "--ff-only", &remote_ref])?;

        // 先构建后停机：构建失败时旧栈保持运行
        self.stack.build(flags.from_scratch)?;
        self.stack.down()?;
        self.stack.up_detached()?;
        self.stack.prune_dangling_images()?;

        self.start_log_followers()?;

        info!("Deploy complete: {} -> {}", &local[..local.len().min(12)], &remote_tip[..remote_tip.len().min(12)]);
        Ok(DeployOutcome::Deployed {
            previous: local,
            current: remote_tip,
        })
    }

    /// Create today's log file per service and attach a follower to each
    ///
    /// The files are created eagerly so they exist as soon as the restart
    /// phase is reached, follower lifetime notwithstanding.
    fn start_log_followers(&self) -> Result<()> {
        let log_dir = self.log_dir();
        fs::create_dir_all(&log_dir)
            .map_err(|e| GamedexError::file_operation(format!("创建日志目录失败: {}", e)))?;

        let today = Local::now().date_naive();
        for service in self.stack.services() {
            let path = dated_log_path(&log_dir, service, today);
            let file = File::create(&path)
                .map_err(|e| GamedexError::file_operation(format!("创建日志文件失败: {}", e)))?;
            self.stack.follow_logs(service, file)?;
            debug!("Log follower attached: {} -> {}", service, path.display());
        }
        Ok(())
    }

    /// Log dir; relative paths are anchored at the repo dir
    pub fn log_dir(&self) -> PathBuf {
        let dir = Path::new(&self.config.log_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.repo_dir().join(dir)
        }
    }
}
