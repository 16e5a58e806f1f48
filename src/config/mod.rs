//! Step configuration records.
//!
//! Configurations are immutable string-field records created at
//! job-definition time and serialized with the job definition. All
//! per-invocation state lives in [`crate::steps::ExecutionContext`], never
//! here.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Commit message used by a push step when the job definition omits one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Automatic update from ${JOB_NAME}";

/// Configuration of a clone step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneConfig {
    /// Named git installation; blank selects the default installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    pub repository: String,
    pub directory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl CloneConfig {
    pub fn validate(&self) -> Result<()> {
        require("repository", &self.repository)?;
        require("directory", &self.directory)
    }
}

/// Configuration of a push step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    pub directory: String,
    #[serde(default)]
    pub commit_message: CommitMessage,
}

impl PushConfig {
    pub fn validate(&self) -> Result<()> {
        require("directory", &self.directory)?;
        match &self.commit_message {
            CommitMessage::Literal { message } => require("message", message),
            CommitMessage::FromFile { message_file } => require("message_file", message_file),
        }
    }
}

/// Source of a push step's commit message.
///
/// The variant is chosen explicitly at configuration time; commit-command
/// construction matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum CommitMessage {
    /// `commit -m <message>`, message macro-expanded.
    #[serde(rename = "message")]
    Literal { message: String },
    /// `commit -F <file>`, path macro-expanded and resolved against the
    /// workspace; the file is read by git itself.
    #[serde(rename = "file")]
    FromFile { message_file: String },
}

impl CommitMessage {
    pub fn uses_file(&self) -> bool {
        matches!(self, CommitMessage::FromFile { .. })
    }
}

impl Default for CommitMessage {
    fn default() -> Self {
        CommitMessage::Literal {
            message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }
}

/// One configured step of a job definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepConfig {
    Clone(CloneConfig),
    Push(PushConfig),
}

impl StepConfig {
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            StepConfig::Clone(config) => config.tool_name.as_deref(),
            StepConfig::Push(config) => config.tool_name.as_deref(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            StepConfig::Clone(config) => config.validate(),
            StepConfig::Push(config) => config.validate(),
        }
    }
}

/// An ordered list of steps, loaded from a YAML job file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDefinition {
    pub steps: Vec<StepConfig>,
}

impl JobDefinition {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let job: JobDefinition = serde_yaml::from_str(&raw)?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<()> {
        for step in &self.steps {
            step.validate()?;
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("required field '{field}' is blank")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_message_mode_discriminator() {
        let literal: CommitMessage =
            serde_yaml::from_str("mode: message\nmessage: CI update").unwrap();
        assert_eq!(
            literal,
            CommitMessage::Literal {
                message: "CI update".to_string()
            }
        );
        assert!(!literal.uses_file());

        let file: CommitMessage =
            serde_yaml::from_str("mode: file\nmessage_file: MSG.txt").unwrap();
        assert_eq!(
            file,
            CommitMessage::FromFile {
                message_file: "MSG.txt".to_string()
            }
        );
        assert!(file.uses_file());
    }

    #[test]
    fn test_job_definition_round_trip() {
        let yaml = r#"
steps:
  - type: clone
    repository: https://example/repo.git
    directory: work
    branch: main
  - type: push
    directory: work
    commit_message:
      mode: file
      message_file: MSG.txt
"#;
        let job: JobDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(job.steps.len(), 2);

        let serialized = serde_yaml::to_string(&job).unwrap();
        let reparsed: JobDefinition = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.steps.len(), 2);
        match &reparsed.steps[1] {
            StepConfig::Push(push) => assert!(push.commit_message.uses_file()),
            other => panic!("Expected push step, got {other:?}"),
        }
    }

    #[test]
    fn test_push_without_commit_message_uses_default() {
        let yaml = "steps:\n  - type: push\n    directory: work\n";
        let job: JobDefinition = serde_yaml::from_str(yaml).unwrap();
        match &job.steps[0] {
            StepConfig::Push(push) => {
                assert_eq!(
                    push.commit_message,
                    CommitMessage::Literal {
                        message: DEFAULT_COMMIT_MESSAGE.to_string()
                    }
                );
            }
            other => panic!("Expected push step, got {other:?}"),
        }
        job.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_blank_repository() {
        let config = CloneConfig {
            tool_name: None,
            repository: "   ".to_string(),
            directory: "work".to_string(),
            branch: None,
            username: None,
            email: None,
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_message_file() {
        let config = PushConfig {
            tool_name: None,
            directory: "work".to_string(),
            commit_message: CommitMessage::FromFile {
                message_file: "".to_string(),
            },
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_literal_message() {
        let config = PushConfig {
            tool_name: None,
            directory: "work".to_string(),
            commit_message: CommitMessage::Literal {
                message: " ".to_string(),
            },
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("job.yaml");
        std::fs::write(
            &path,
            "steps:\n  - type: clone\n    repository: ''\n    directory: work\n",
        )
        .unwrap();

        assert!(matches!(
            JobDefinition::load(&path),
            Err(Error::Config(_))
        ));
    }
}
