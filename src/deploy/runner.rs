//! External command execution seam

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::errors::{GamedexError, Result};

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

/// Abstraction over process execution
///
/// The deploy flow never touches `std::process` directly; everything goes
/// through this trait so tests can substitute a scripted runner.
pub trait CommandRunner: Send + Sync {
    /// Run to completion in `dir`, capturing output
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput>;

    /// Run to completion, feeding `input` to stdin
    fn run_with_stdin(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        input: &str,
    ) -> Result<CommandOutput>;

    /// Spawn without waiting; stdout and stderr both go to `log_file`
    fn spawn_detached(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        log_file: File,
    ) -> Result<()>;
}

/// Real process execution via std::process
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| GamedexError::file_operation(format!("无法执行 {}: {}", program, e)))?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_with_stdin(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        input: &str,
    ) -> Result<CommandOutput> {
        let mut child = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GamedexError::file_operation(format!("无法执行 {}: {}", program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(|e| GamedexError::file_operation(format!("写入 stdin 失败: {}", e)))?;
            // stdin 关闭后子进程才能看到 EOF
        }

        let output = child
            .wait_with_output()
            .map_err(|e| GamedexError::file_operation(format!("等待 {} 失败: {}", program, e)))?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_detached(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        log_file: File,
    ) -> Result<()> {
        let stderr_file = log_file
            .try_clone()
            .map_err(|e| GamedexError::file_operation(format!("复制日志句柄失败: {}", e)))?;

        Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(stderr_file))
            .spawn()
            .map_err(|e| GamedexError::file_operation(format!("无法启动 {}: {}", program, e)))?;

        Ok(())
    }
}
