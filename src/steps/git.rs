use std::path::Path;

use crate::error::Result;
use crate::subprocess::{ExitStatus, ProcessCommandBuilder, SubprocessManager};

use super::context::ExecutionContext;

/// Runs git commands against a step's execution context.
///
/// Composes argument vectors, executes them with the context's environment
/// table in a chosen working directory, forwards the command's output to the
/// job log, and hands the numeric exit status back to the caller. A non-zero
/// exit is a logical failure for the caller to report, never an `Err` here.
pub struct GitCli<'a> {
    ctx: &'a ExecutionContext,
    subprocess: &'a SubprocessManager,
}

impl<'a> GitCli<'a> {
    pub fn new(ctx: &'a ExecutionContext, subprocess: &'a SubprocessManager) -> Self {
        Self { ctx, subprocess }
    }

    /// Run git with `args` in `workdir` and return its exit status.
    pub async fn run(&self, workdir: &Path, args: &[String]) -> Result<ExitStatus> {
        let command = ProcessCommandBuilder::new(&self.ctx.git.to_string_lossy())
            .args(args)
            .envs(self.ctx.env.iter())
            .current_dir(workdir)
            .build();

        let output = self.subprocess.runner().run(command).await?;

        for line in output.stdout.lines() {
            tracing::info!(target: "job", "{line}");
        }
        for line in output.stderr.lines() {
            tracing::info!(target: "job", "{line}");
        }

        Ok(output.status)
    }
}

/// Trim an optional field; a blank result selects the default instead.
pub fn resolve_value(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(trimmed) => trimmed.to_string(),
        None => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnvironment;
    use crate::steps::ExecutionContext;
    use crate::tools::{FileToolRegistry, GitTool};
    use std::path::PathBuf;

    #[test]
    fn test_resolve_value_blank_selects_default() {
        assert_eq!(resolve_value(None, "fallback"), "fallback");
        assert_eq!(resolve_value(Some(""), "fallback"), "fallback");
        assert_eq!(resolve_value(Some("   \t"), "fallback"), "fallback");
    }

    #[test]
    fn test_resolve_value_trims_and_keeps_supplied() {
        assert_eq!(resolve_value(Some("  alice  "), "fallback"), "alice");
        assert_eq!(resolve_value(Some("bob"), "fallback"), "bob");
    }

    #[tokio::test]
    async fn test_run_uses_context_executable_env_and_workdir() {
        let (subprocess, mut mock) = SubprocessManager::mock();
        mock.expect_command("/opt/git/bin/git")
            .with_args(|args| args == ["status"])
            .returns_success()
            .finish();

        let tools = FileToolRegistry::new(vec![GitTool {
            name: "Default".to_string(),
            path: PathBuf::from("/opt/git/bin/git"),
        }]);
        let environment = StaticEnvironment::from_pairs([("BUILD_NUMBER", "7")]);
        let ctx = ExecutionContext::prepare(
            Path::new("/workspace"),
            Some("job"),
            None,
            &tools,
            &environment,
        )
        .unwrap();

        let git = GitCli::new(&ctx, &subprocess);
        let status = git
            .run(Path::new("/workspace/work"), &["status".to_string()])
            .await
            .unwrap();
        assert!(status.success());

        let history = mock.get_call_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].program, "/opt/git/bin/git");
        assert_eq!(
            history[0].working_dir,
            Some(PathBuf::from("/workspace/work"))
        );
        assert_eq!(history[0].env.get("BUILD_NUMBER"), Some(&"7".to_string()));
    }

    #[tokio::test]
    async fn test_run_surfaces_exit_code_without_error() {
        let (subprocess, mut mock) = SubprocessManager::mock();
        mock.expect_command("git")
            .returns_exit_code(128)
            .finish();

        let tools = FileToolRegistry::default_git();
        let ctx = ExecutionContext::prepare(
            Path::new("/workspace"),
            Some("job"),
            None,
            &tools,
            &StaticEnvironment::empty(),
        )
        .unwrap();

        let git = GitCli::new(&ctx, &subprocess);
        let status = git
            .run(Path::new("/workspace"), &["push".to_string()])
            .await
            .unwrap();
        assert_eq!(status.code(), Some(128));
    }
}
