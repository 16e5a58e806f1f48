//! # gitstep
//!
//! Git build steps for CI jobs: clone a repository into the job workspace and
//! configure commit identity, then stage, commit, and push changes back, all
//! by shelling out to an external git binary.
//!
//! ## Usage
//!
//! ```bash
//! gitstep clone --repository https://example/repo.git --directory work
//! gitstep push --directory work -m "CI update ${BUILD_NUMBER}"
//! gitstep run job.yaml
//! ```
//!
//! ## Modules
//!
//! - `config` - Immutable step configuration and job-definition records
//! - `env` - Job environment merging and `${VAR}` macro expansion
//! - `steps` - Clone and push step sequencing over an execution context
//! - `subprocess` - Unified subprocess abstraction layer for testing
//! - `tools` - Registry of named git installations

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod steps;
pub mod subprocess;
pub mod tools;

pub use error::{Error, Result};
