//! Clone and push step sequencing.
//!
//! A step invocation moves `Pending -> Running(op) -> {Running(next) |
//! Failed}` and terminates `Succeeded` only when every sub-operation exited
//! zero, in order. There is no retry and no rollback: a failure leaves the
//! working directory in whatever state the last successful operation
//! produced.

pub mod clone;
pub mod context;
pub mod git;
pub mod push;

use std::path::Path;

use tracing::info;

use crate::config::{JobDefinition, StepConfig};
use crate::env::EnvironmentProvider;
use crate::error::Result;
use crate::subprocess::SubprocessManager;
use crate::tools::ToolRegistry;

pub use context::ExecutionContext;
pub use git::{resolve_value, GitCli};

/// Terminal state of one step invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

impl StepOutcome {
    pub fn succeeded(self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }
}

impl From<bool> for StepOutcome {
    fn from(ok: bool) -> Self {
        if ok {
            StepOutcome::Succeeded
        } else {
            StepOutcome::Failed
        }
    }
}

/// Run one configured step with a freshly prepared execution context.
pub async fn run_step(
    step: &StepConfig,
    workspace: &Path,
    job_name: Option<&str>,
    tools: &dyn ToolRegistry,
    environment: &dyn EnvironmentProvider,
    subprocess: &SubprocessManager,
) -> Result<StepOutcome> {
    let ctx = ExecutionContext::prepare(workspace, job_name, step.tool_name(), tools, environment)?;
    match step {
        StepConfig::Clone(config) => clone::run(config, &ctx, subprocess).await,
        StepConfig::Push(config) => push::run(config, &ctx, subprocess).await,
    }
}

/// Run a job definition's steps in order, stopping at the first failure.
pub async fn run_job(
    job: &JobDefinition,
    workspace: &Path,
    job_name: Option<&str>,
    tools: &dyn ToolRegistry,
    environment: &dyn EnvironmentProvider,
    subprocess: &SubprocessManager,
) -> Result<StepOutcome> {
    for (index, step) in job.steps.iter().enumerate() {
        info!("Running step {} of {}", index + 1, job.steps.len());
        let outcome = run_step(step, workspace, job_name, tools, environment, subprocess).await?;
        if !outcome.succeeded() {
            return Ok(StepOutcome::Failed);
        }
    }
    Ok(StepOutcome::Succeeded)
}
