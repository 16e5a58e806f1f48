use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::env::{expand, EnvironmentProvider};
use crate::error::{Error, Result};
use crate::tools::ToolRegistry;

/// Per-invocation execution state of a step.
///
/// Built once per step invocation and read-only thereafter: the workspace
/// root, the merged environment table, the resolved git executable, and the
/// job name used for identity defaults. Step configurations stay immutable;
/// everything that varies between invocations lives here.
pub struct ExecutionContext {
    pub workspace: PathBuf,
    pub env: BTreeMap<String, String>,
    pub git: PathBuf,
    pub job_name: String,
}

impl ExecutionContext {
    pub fn prepare(
        workspace: &Path,
        job_name: Option<&str>,
        tool_name: Option<&str>,
        tools: &dyn ToolRegistry,
        environment: &dyn EnvironmentProvider,
    ) -> Result<Self> {
        let env = environment.merged();

        let git = tools.resolve(tool_name).ok_or_else(|| {
            match tool_name.map(str::trim).filter(|n| !n.is_empty()) {
                Some(name) => Error::ToolNotFound(name.to_string()),
                None => Error::NoToolsRegistered,
            }
        })?;

        let job_name = job_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| env.get("JOB_NAME").cloned())
            .unwrap_or_else(|| {
                workspace
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "job".to_string())
            });

        Ok(Self {
            workspace: workspace.to_path_buf(),
            env,
            git,
            job_name,
        })
    }

    /// Expand `${name}` macros against this context's environment table.
    pub fn expand(&self, value: &str) -> String {
        expand(value, &self.env)
    }

    /// The step's target directory: workspace-relative, macro-expanded.
    pub fn repository_dir(&self, directory: &str) -> PathBuf {
        self.workspace.join(self.expand(directory))
    }
}
