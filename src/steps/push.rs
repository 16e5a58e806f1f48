use std::path::Path;

use tracing::{debug, error};

use crate::config::{CommitMessage, PushConfig};
use crate::error::Result;
use crate::subprocess::SubprocessManager;

use super::context::ExecutionContext;
use super::git::GitCli;
use super::StepOutcome;

/// Run the push step: stage all changes, commit, and push to the
/// configured upstream.
pub async fn run(
    config: &PushConfig,
    ctx: &ExecutionContext,
    subprocess: &SubprocessManager,
) -> Result<StepOutcome> {
    config.validate()?;

    let repository_dir = ctx.repository_dir(&config.directory);
    let git = GitCli::new(ctx, subprocess);

    let ok = add_all(&git, &repository_dir).await?
        && commit(config, ctx, &git, &repository_dir).await?
        && push(&git, &repository_dir).await?;

    Ok(StepOutcome::from(ok))
}

async fn add_all(git: &GitCli<'_>, repository_dir: &Path) -> Result<bool> {
    let args = vec!["add".to_string(), "-A".to_string()];
    let status = git.run(repository_dir, &args).await?;
    if status.success() {
        return Ok(true);
    }
    error!("git add -A failed with exit code {}", status);
    Ok(false)
}

async fn commit(
    config: &PushConfig,
    ctx: &ExecutionContext,
    git: &GitCli<'_>,
    repository_dir: &Path,
) -> Result<bool> {
    let mut args = vec!["commit".to_string()];
    match &config.commit_message {
        CommitMessage::Literal { message } => {
            args.push("-m".to_string());
            args.push(ctx.expand(message));
        }
        CommitMessage::FromFile { message_file } => {
            // The joined path is handed to git as a literal argument; git
            // reads the file itself.
            let message_path = ctx.workspace.join(ctx.expand(message_file));
            args.push("-F".to_string());
            args.push(message_path.to_string_lossy().into_owned());
        }
    }

    debug!("Committing changes in {}", repository_dir.display());
    let status = git.run(repository_dir, &args).await?;
    if status.success() {
        return Ok(true);
    }
    error!("git commit failed with exit code {}", status);
    Ok(false)
}

async fn push(git: &GitCli<'_>, repository_dir: &Path) -> Result<bool> {
    let args = vec!["push".to_string()];
    let status = git.run(repository_dir, &args).await?;
    if status.success() {
        return Ok(true);
    }
    error!("git push failed with exit code {}", status);
    Ok(false)
}
