//! Compose stack operations

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::errors::{GamedexError, Result};

use super::runner::{CommandOutput, CommandRunner};

/// A docker compose stack addressed by its compose file
pub struct ComposeStack {
    runner: Arc<dyn CommandRunner>,
    dir: PathBuf,
    compose_file: String,
    services: Vec<String>,
}

impl ComposeStack {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        dir: impl Into<PathBuf>,
        compose_file: impl Into<String>,
        services: Vec<String>,
    ) -> Self {
        ComposeStack {
            runner,
            dir: dir.into(),
            compose_file: compose_file.into(),
            services,
        }
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    fn compose(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut full_args = vec!["compose", "-f", self.compose_file.as_str()];
        full_args.extend_from_slice(args);

        let output = self.runner.run(&self.dir, "docker", &full_args)?;
        if !output.success() {
            return Err(GamedexError::container_operation(format!(
                "docker compose {} failed: {}",
                args.join(" "),
                output.stderr.trim()
            )));
        }
        Ok(output)
    }

    /// Build images for the stack
    ///
    /// `from_scratch` disables the layer cache and re-pulls base images.
    pub fn build(&self, from_scratch: bool) -> Result<()> {
        let mut args = vec!["build"];
        if from_scratch {
            args.push("--no-cache");
            args.push("--pull");
        }
        info!("Building stack images (from_scratch: {})", from_scratch);
        self.compose(&args)?;
        Ok(())
    }

    /// Tear down the running containers
    pub fn down(&self) -> Result<()> {
        info!("Stopping stack");
        self.compose(&["down"])?;
        Ok(())
    }

    /// Start the stack detached
    pub fn up_detached(&self) -> Result<()> {
        info!("Starting stack detached");
        self.compose(&["up", "-d"])?;
        Ok(())
    }

    /// Remove dangling images left behind by the rebuild
    pub fn prune_dangling_images(&self) -> Result<()> {
        let output = self.runner.run(&self.dir, "docker", &["image", "prune", "-f"])?;
        if !output.success() {
            return Err(GamedexError::container_operation(format!(
                "docker image prune failed: {}",
                output.stderr.trim()
            )));
        }
        Ok(())
    }

    /// Spawn a detached follower streaming one service's output into `log_file`
    pub fn follow_logs(&self, service: &str, log_file: File) -> Result<()> {
        self.runner.spawn_detached(
            &self.dir,
            "docker",
            &[
                "compose",
                "-f",
                self.compose_file.as_str(),
                "logs",
                "-f",
                "--no-color",
                service,
            ],
            log_file,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
