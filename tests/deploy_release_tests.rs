//! Release reconciler tests
//!
//! All external commands are routed through a scripted runner, so the
//! full fetch → compare → rebuild → restart flow runs without git or
//! docker being present.

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tempfile::TempDir;

use gamedex::config::DeployConfig;
use gamedex::deploy::logs::dated_log_path;
use gamedex::deploy::{CommandOutput, CommandRunner, DeployFlags, DeployOutcome, ReleaseReconciler};
use gamedex::errors::{GamedexError, Result};

// =============================================================================
// Test Setup
// =============================================================================

/// Scripted command runner: records every invocation, answers rev-parse
/// from two mutable commit ids, and can be told to fail on a substring.
struct MockRunner {
    calls: Mutex<Vec<String>>,
    spawns: Mutex<Vec<String>>,
    local_rev: Mutex<String>,
    remote_rev: Mutex<String>,
    fail_on: Option<String>,
}

impl MockRunner {
    fn new(local: &str, remote: &str) -> Self {
        MockRunner {
            calls: Mutex::new(Vec::new()),
            spawns: Mutex::new(Vec::new()),
            local_rev: Mutex::new(local.to_string()),
            remote_rev: Mutex::new(remote.to_string()),
            fail_on: None,
        }
    }

    fn failing_on(local: &str, remote: &str, needle: &str) -> Self {
        let mut runner = Self::new(local, remote);
        runner.fail_on = Some(needle.to_string());
        runner
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn spawns(&self) -> Vec<String> {
        self.spawns.lock().unwrap().clone()
    }

    fn count_containing(&self, needle: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.contains(needle))
            .count()
    }

    fn index_of(&self, needle: &str) -> usize {
        self.calls()
            .iter()
            .position(|call| call.contains(needle))
            .unwrap_or_else(|| panic!("no call containing '{}'", needle))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let cmd = format!("{} {}", program, args.join(" "));
        self.calls.lock().unwrap().push(cmd.clone());

        if let Some(ref needle) = self.fail_on
            && cmd.contains(needle.as_str())
        {
            return Ok(CommandOutput {
                status: 1,
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            });
        }

        let stdout = if cmd == "git rev-parse HEAD" {
            self.local_rev.lock().unwrap().clone()
        } else if cmd.starts_with("git rev-parse ") {
            self.remote_rev.lock().unwrap().clone()
        } else {
            String::new()
        };

        // A fast-forward moves HEAD to the remote tip
        if cmd.starts_with("git merge --ff-only") {
            let remote = self.remote_rev.lock().unwrap().clone();
            *self.local_rev.lock().unwrap() = remote;
        }

        Ok(CommandOutput {
            status: 0,
            stdout,
            stderr: String::new(),
        })
    }

    fn run_with_stdin(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        _input: &str,
    ) -> Result<CommandOutput> {
        self.run(dir, program, args)
    }

    fn spawn_detached(
        &self,
        _dir: &Path,
        program: &str,
        args: &[&str],
        _log_file: File,
    ) -> Result<()> {
        if let Some(ref needle) = self.fail_on {
            let cmd = format!("{} {}", program, args.join(" "));
            if cmd.contains(needle.as_str()) {
                return Err(GamedexError::file_operation("simulated spawn failure"));
            }
        }
        self.spawns
            .lock()
            .unwrap()
            .push(format!("{} {}", program, args.join(" ")));
        Ok(())
    }
}

fn test_config(repo_dir: &Path, log_dir: &Path) -> DeployConfig {
    DeployConfig {
        remote: "origin".to_string(),
        branch: "release".to_string(),
        repo_dir: repo_dir.display().to_string(),
        compose_file: "docker-compose.yml".to_string(),
        services: vec!["api".to_string(), "db".to_string(), "proxy".to_string()],
        log_dir: log_dir.display().to_string(),
        retention_days: 7,
    }
}

fn reconciler(runner: Arc<MockRunner>, tmp: &TempDir) -> ReleaseReconciler {
    let config = test_config(tmp.path(), &tmp.path().join("logs"));
    ReleaseReconciler::new(config, runner)
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_up_to_date_with_if_needed_is_noop() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::new("abc123", "abc123"));
    let reconciler = reconciler(runner.clone(), &tmp);

    let flags = DeployFlags {
        if_needed: true,
        ..Default::default()
    };
    let outcome = reconciler.run(&flags).unwrap();

    assert_eq!(outcome, DeployOutcome::UpToDate);
    // fetch + two rev-parse calls, and not a single docker command
    assert_eq!(runner.count_containing("git fetch origin release"), 1);
    assert_eq!(runner.count_containing("docker"), 0);
    assert!(runner.spawns().is_empty());
}

#[test]
fn test_new_commits_trigger_exactly_one_cycle() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::new("aaa111", "bbb222"));
    let reconciler = reconciler(runner.clone(), &tmp);

    let outcome = reconciler
        .run(&DeployFlags {
            if_needed: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(
        outcome,
        DeployOutcome::Deployed {
            previous: "aaa111".to_string(),
            current: "bbb222".to_string(),
        }
    );

    // Exactly one build/down/up/prune, regardless of pending commit count
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml build"),
        1
    );
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml down"),
        1
    );
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml up -d"),
        1
    );
    assert_eq!(runner.count_containing("docker image prune -f"), 1);

    // Build happens while the old stack still runs
    assert!(runner.index_of(" build") < runner.index_of(" down"));
    assert!(runner.index_of(" down") < runner.index_of(" up -d"));

    // One log follower per composed service
    let spawns = runner.spawns();
    assert_eq!(spawns.len(), 3);
    for (spawn, service) in spawns.iter().zip(["api", "db", "proxy"]) {
        assert!(spawn.contains("logs -f"));
        assert!(spawn.ends_with(service));
    }
}

#[test]
fn test_rerun_after_success_is_noop() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::new("aaa111", "bbb222"));
    let reconciler = reconciler(runner.clone(), &tmp);

    let flags = DeployFlags {
        if_needed: true,
        ..Default::default()
    };

    let first = reconciler.run(&flags).unwrap();
    assert!(matches!(first, DeployOutcome::Deployed { .. }));

    // HEAD moved with the fast-forward, so the second pass has nothing to do
    let second = reconciler.run(&flags).unwrap();
    assert_eq!(second, DeployOutcome::UpToDate);
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml build"),
        1
    );
}

#[test]
fn test_always_act_mode_redeploys_when_up_to_date() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::new("abc123", "abc123"));
    let reconciler = reconciler(runner.clone(), &tmp);

    // if_needed unset: identical commit ids still get a full cycle
    let outcome = reconciler.run(&DeployFlags::default()).unwrap();
    assert!(matches!(outcome, DeployOutcome::Deployed { .. }));
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml build"),
        1
    );
}

#[test]
fn test_from_scratch_disables_layer_cache() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::new("aaa111", "bbb222"));
    let reconciler = reconciler(runner.clone(), &tmp);

    reconciler
        .run(&DeployFlags {
            from_scratch: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(runner.count_containing("build --no-cache --pull"), 1);
}

#[test]
fn test_log_files_exist_after_restart_phase() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::new("aaa111", "bbb222"));
    let reconciler = reconciler(runner.clone(), &tmp);

    reconciler.run(&DeployFlags::default()).unwrap();

    let log_dir = tmp.path().join("logs");
    let today = Local::now().date_naive();
    for service in ["api", "db", "proxy"] {
        let path = dated_log_path(&log_dir, service, today);
        assert!(path.exists(), "expected log file for {}", service);
    }
}

#[test]
fn test_failed_build_leaves_stack_running() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::failing_on("aaa111", "bbb222", "build"));
    let reconciler = reconciler(runner.clone(), &tmp);

    let err = reconciler.run(&DeployFlags::default()).unwrap_err();
    assert!(matches!(err, GamedexError::ContainerOperation(_)));

    // The old containers were never torn down
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml down"),
        0
    );
    assert_eq!(
        runner.count_containing("docker compose -f docker-compose.yml up -d"),
        0
    );
}

#[test]
fn test_git_failure_aborts_immediately() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(MockRunner::failing_on("aaa111", "bbb222", "fetch"));
    let reconciler = reconciler(runner.clone(), &tmp);

    let err = reconciler.run(&DeployFlags::default()).unwrap_err();
    assert!(matches!(err, GamedexError::GitOperation(_)));
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn test_deploy_flags_default_is_all_off() {
    let flags = DeployFlags::default();
    assert!(!flags.from_scratch);
    assert!(!flags.if_needed);
    assert!(!flags.prod);
}
