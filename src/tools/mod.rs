//! Registry of named git installations.
//!
//! A CI node may carry several git installations under configured names; a
//! step picks one by name or falls back to the first registered entry.
//! Lookup failure is a fatal configuration error for the step, surfaced
//! before any command runs.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A named git installation on the current execution node.
#[derive(Debug, Clone, Deserialize)]
pub struct GitTool {
    pub name: String,
    pub path: PathBuf,
}

pub trait ToolRegistry: Send + Sync {
    /// Registered installations, in registration order.
    fn installations(&self) -> &[GitTool];

    /// Resolve the executable for a named installation.
    ///
    /// A missing or blank name selects the first registered installation.
    /// Returns `None` when no installation matches; the caller must treat
    /// that as a fatal configuration error.
    fn resolve(&self, name: Option<&str>) -> Option<PathBuf> {
        let tools = self.installations();
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => tools.first().map(|tool| tool.path.clone()),
            Some(name) => tools
                .iter()
                .find(|tool| tool.name == name)
                .map(|tool| tool.path.clone()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    tool: Vec<GitTool>,
}

/// Registry backed by a TOML file of `[[tool]]` entries.
pub struct FileToolRegistry {
    tools: Vec<GitTool>,
}

impl FileToolRegistry {
    pub fn new(tools: Vec<GitTool>) -> Self {
        Self { tools }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: RegistryFile = toml::from_str(&raw)?;
        Ok(Self::new(file.tool))
    }

    /// Registry used when no file is given: a single `git` resolved from PATH.
    pub fn default_git() -> Self {
        Self::new(vec![GitTool {
            name: "Default".to_string(),
            path: PathBuf::from("git"),
        }])
    }
}

impl ToolRegistry for FileToolRegistry {
    fn installations(&self) -> &[GitTool] {
        &self.tools
    }
}
