//! Job environment resolution and macro expansion.
//!
//! A step sees one ordered name/value table: the job's environment variables
//! merged with build-scoped variable overrides, the overrides winning on key
//! collision. The table is built fresh for each step invocation through the
//! [`EnvironmentProvider`] trait so step sequencing stays testable without a
//! real CI host.

mod expand;
mod provider;

pub use expand::expand;
pub use provider::{EnvironmentProvider, JobEnvironment, StaticEnvironment};
