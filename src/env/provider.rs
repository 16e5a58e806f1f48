use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Source of the environment table used for macro expansion.
///
/// Implementations supply the surrounding job's environment variables and the
/// build-scoped variable overrides; [`EnvironmentProvider::merged`] combines
/// them into the single table a step consumes.
pub trait EnvironmentProvider: Send + Sync {
    /// Environment variables of the surrounding job.
    fn job_environment(&self) -> BTreeMap<String, String>;

    /// Build-scoped variable overrides.
    fn build_variables(&self) -> BTreeMap<String, String>;

    /// One table for a step invocation; build variables win on collision.
    fn merged(&self) -> BTreeMap<String, String> {
        let mut table = self.job_environment();
        table.extend(self.build_variables());
        table
    }
}

/// Production provider: the process environment plus `--var` overrides.
pub struct JobEnvironment {
    overrides: BTreeMap<String, String>,
}

impl JobEnvironment {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Parse repeated `KEY=VALUE` arguments; a later value wins over an
    /// earlier one for the same key.
    pub fn from_var_args<S: AsRef<str>>(vars: &[S]) -> Result<Self> {
        let mut overrides = BTreeMap::new();
        for var in vars {
            let var = var.as_ref();
            let (key, value) = var
                .split_once('=')
                .ok_or_else(|| Error::InvalidVariable(var.to_string()))?;
            if key.is_empty() {
                return Err(Error::InvalidVariable(var.to_string()));
            }
            overrides.insert(key.to_string(), value.to_string());
        }
        Ok(Self::new(overrides))
    }
}

impl EnvironmentProvider for JobEnvironment {
    fn job_environment(&self) -> BTreeMap<String, String> {
        std::env::vars().collect()
    }

    fn build_variables(&self) -> BTreeMap<String, String> {
        self.overrides.clone()
    }
}

/// Fixed tables for tests; no process environment is consulted.
pub struct StaticEnvironment {
    job: BTreeMap<String, String>,
    build: BTreeMap<String, String>,
}

impl StaticEnvironment {
    pub fn new(job: BTreeMap<String, String>, build: BTreeMap<String, String>) -> Self {
        Self { job, build }
    }

    pub fn from_pairs<const N: usize>(pairs: [(&str, &str); N]) -> Self {
        let job = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            job,
            build: BTreeMap::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            job: BTreeMap::new(),
            build: BTreeMap::new(),
        }
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn job_environment(&self) -> BTreeMap<String, String> {
        self.job.clone()
    }

    fn build_variables(&self) -> BTreeMap<String, String> {
        self.build.clone()
    }
}
