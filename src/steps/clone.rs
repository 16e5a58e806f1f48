use std::path::Path;

use tracing::{debug, error};

use crate::config::CloneConfig;
use crate::error::{Error, Result};
use crate::subprocess::SubprocessManager;

use super::context::ExecutionContext;
use super::git::{resolve_value, GitCli};
use super::StepOutcome;

/// Run the clone step: reset the target directory, clone the repository,
/// and configure the local commit identity.
pub async fn run(
    config: &CloneConfig,
    ctx: &ExecutionContext,
    subprocess: &SubprocessManager,
) -> Result<StepOutcome> {
    config.validate()?;

    let repository_dir = ctx.repository_dir(&config.directory);
    reset_directory(&repository_dir).await?;

    let git = GitCli::new(ctx, subprocess);
    let ok = clone_repository(config, ctx, &git).await?
        && configure_name(config, ctx, &git, &repository_dir).await?
        && configure_email(config, ctx, &git, &repository_dir).await?;

    Ok(StepOutcome::from(ok))
}

/// Idempotent reset: remove whatever sits at the target path.
/// Removal failure aborts the step; it is not a soft failure.
async fn reset_directory(path: &Path) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => {
            debug!("Removing existing {}", path.display());
            let removal = if metadata.is_dir() {
                tokio::fs::remove_dir_all(path).await
            } else {
                tokio::fs::remove_file(path).await
            };
            removal.map_err(|source| Error::DirectoryReset {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::DirectoryReset {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn clone_repository(
    config: &CloneConfig,
    ctx: &ExecutionContext,
    git: &GitCli<'_>,
) -> Result<bool> {
    let mut args = vec!["clone".to_string(), "-q".to_string()];

    let branch = ctx.expand(config.branch.as_deref().unwrap_or(""));
    let branch = branch.trim();
    if !branch.is_empty() {
        args.push("-b".to_string());
        args.push(branch.to_string());
    }

    args.push(config.repository.clone());
    args.push(ctx.expand(&config.directory));

    debug!("Cloning {} into {}", config.repository, config.directory);
    let status = git.run(&ctx.workspace, &args).await?;
    if status.success() {
        return Ok(true);
    }
    error!(
        "git clone of {} (branch '{}') failed with exit code {}",
        config.repository, branch, status
    );
    Ok(false)
}

async fn configure_name(
    config: &CloneConfig,
    ctx: &ExecutionContext,
    git: &GitCli<'_>,
    repository_dir: &Path,
) -> Result<bool> {
    let name = resolve_value(config.username.as_deref(), &ctx.job_name);
    let args = vec!["config".to_string(), "user.name".to_string(), name.clone()];

    let status = git.run(repository_dir, &args).await?;
    if status.success() {
        return Ok(true);
    }
    error!(
        "git config user.name '{}' failed with exit code {}",
        name, status
    );
    Ok(false)
}

async fn configure_email(
    config: &CloneConfig,
    ctx: &ExecutionContext,
    git: &GitCli<'_>,
    repository_dir: &Path,
) -> Result<bool> {
    let email = resolve_value(config.email.as_deref(), &default_email());
    let args = vec![
        "config".to_string(),
        "user.email".to_string(),
        email.clone(),
    ];

    let status = git.run(repository_dir, &args).await?;
    if status.success() {
        return Ok(true);
    }
    error!(
        "git config user.email '{}' failed with exit code {}",
        email, status
    );
    Ok(false)
}

/// `<os-user>@<hostname>`, the identity fallback when no email is configured.
fn default_email() -> String {
    let host = hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_string());
    format!("{}@{}", whoami::username(), host)
}
