//! CLI argument structures.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{CloneConfig, CommitMessage, PushConfig};

/// Git clone/commit/push build steps for CI jobs
#[derive(Parser)]
#[command(name = "gitstep")]
#[command(about = "gitstep - Git clone/commit/push build steps for CI jobs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Job workspace root (defaults to the current directory)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Build variable override, KEY=VALUE (repeatable; later wins)
    #[arg(long = "var", value_name = "KEY=VALUE", global = true)]
    pub vars: Vec<String>,

    /// Job display name used for commit identity defaults
    #[arg(long, global = true)]
    pub job_name: Option<String>,

    /// Tool registry file listing named git installations
    #[arg(long = "tools", value_name = "FILE", global = true)]
    pub tools: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone a repository into the workspace and configure commit identity
    Clone(CloneArgs),

    /// Stage, commit, and push changes from a workspace directory
    Push(PushArgs),

    /// Run the steps of a job-definition file in order
    Run {
        /// Job definition (YAML)
        job: PathBuf,
    },
}

#[derive(Args)]
pub struct CloneArgs {
    /// Repository URL to clone
    #[arg(long)]
    pub repository: String,

    /// Target directory, relative to the workspace
    #[arg(long)]
    pub directory: String,

    /// Branch to clone (omitted when blank)
    #[arg(long)]
    pub branch: Option<String>,

    /// Value for user.name (defaults to the job name)
    #[arg(long)]
    pub username: Option<String>,

    /// Value for user.email (defaults to <os-user>@<hostname>)
    #[arg(long)]
    pub email: Option<String>,

    /// Named git installation from the tool registry
    #[arg(long)]
    pub tool: Option<String>,
}

#[derive(Args)]
pub struct PushArgs {
    /// Directory holding the clone, relative to the workspace
    #[arg(long)]
    pub directory: String,

    /// Literal commit message
    #[arg(short = 'm', long, conflicts_with = "message_file")]
    pub message: Option<String>,

    /// Read the commit message from a workspace-relative file
    #[arg(short = 'F', long)]
    pub message_file: Option<String>,

    /// Named git installation from the tool registry
    #[arg(long)]
    pub tool: Option<String>,
}

impl From<CloneArgs> for CloneConfig {
    fn from(args: CloneArgs) -> Self {
        CloneConfig {
            tool_name: args.tool,
            repository: args.repository,
            directory: args.directory,
            branch: args.branch,
            username: args.username,
            email: args.email,
        }
    }
}

impl From<PushArgs> for PushConfig {
    fn from(args: PushArgs) -> Self {
        let commit_message = match (args.message, args.message_file) {
            (_, Some(message_file)) => CommitMessage::FromFile { message_file },
            (Some(message), None) => CommitMessage::Literal { message },
            (None, None) => CommitMessage::default(),
        };
        PushConfig {
            tool_name: args.tool,
            directory: args.directory,
            commit_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_clone_args_map_to_config() {
        let cli = Cli::parse_from([
            "gitstep",
            "clone",
            "--repository",
            "https://example/repo.git",
            "--directory",
            "work",
            "--branch",
            "main",
        ]);
        let Commands::Clone(args) = cli.command else {
            panic!("Expected clone subcommand");
        };
        let config = CloneConfig::from(args);
        assert_eq!(config.repository, "https://example/repo.git");
        assert_eq!(config.directory, "work");
        assert_eq!(config.branch.as_deref(), Some("main"));
        assert!(config.username.is_none());
    }

    #[test]
    fn test_push_message_file_selects_file_mode() {
        let cli = Cli::parse_from(["gitstep", "push", "--directory", "work", "-F", "MSG.txt"]);
        let Commands::Push(args) = cli.command else {
            panic!("Expected push subcommand");
        };
        let config = PushConfig::from(args);
        assert_eq!(
            config.commit_message,
            CommitMessage::FromFile {
                message_file: "MSG.txt".to_string()
            }
        );
        assert!(config.commit_message.uses_file());
    }

    #[test]
    fn test_push_literal_message_selects_message_mode() {
        let cli = Cli::parse_from(["gitstep", "push", "--directory", "work", "-m", "CI update"]);
        let Commands::Push(args) = cli.command else {
            panic!("Expected push subcommand");
        };
        let config = PushConfig::from(args);
        assert!(!config.commit_message.uses_file());
    }

    #[test]
    fn test_push_without_message_uses_default() {
        let cli = Cli::parse_from(["gitstep", "push", "--directory", "work"]);
        let Commands::Push(args) = cli.command else {
            panic!("Expected push subcommand");
        };
        let config = PushConfig::from(args);
        assert_eq!(config.commit_message, CommitMessage::default());
    }

    #[test]
    fn test_push_rejects_both_message_sources() {
        let result = Cli::try_parse_from([
            "gitstep",
            "push",
            "--directory",
            "work",
            "-m",
            "msg",
            "-F",
            "MSG.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_vars_are_collected() {
        let cli = Cli::parse_from([
            "gitstep",
            "--var",
            "A=1",
            "--var",
            "B=2",
            "push",
            "--directory",
            "work",
        ]);
        assert_eq!(cli.vars, vec!["A=1", "B=2"]);
    }
}
