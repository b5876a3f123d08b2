//! # BrowserHands Protocols
//!
//! Interfaces to the collaborators the session runtime depends on.
//! Contains only interface definitions and plain value types.
//!
//! ## Core Traits
//!
//! - [`AutomationEngine`] - One delegated browser-automation run
//! - [`EngineFactory`] - Builds an engine bound to a task
//! - [`CredentialSource`] - Looks up provider credentials

pub mod credential;
pub mod engine;
pub mod error;
pub mod provider;
pub mod task;

pub use credential::{Credential, CredentialSource, EnvCredentials, StaticCredentials};
pub use engine::{AutomationEngine, EngineFactory, EngineOutcome, StepProgress};
pub use error::EngineError;
pub use provider::{Provider, UnsupportedProvider};
pub use task::TaskSpec;
