//! Release automation
//!
//! Keeps a deployed compose stack in sync with a release branch:
//! fetch, compare commit ids, fast-forward, rebuild, restart, prune,
//! follow logs. Scheduled via cron in production mode.
//!
//! All external commands (git, docker, crontab) go through the
//! [`CommandRunner`] seam so the whole flow is testable without the
//! real binaries.

pub mod compose;
pub mod cron;
pub mod logs;
pub mod release;
pub mod runner;

pub use compose::ComposeStack;
pub use cron::CronSchedule;
pub use release::{DeployFlags, DeployOutcome, ReleaseReconciler};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
