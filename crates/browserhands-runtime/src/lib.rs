//! # BrowserHands Runtime
//!
//! Tracks automation sessions from admission to eviction.
//!
//! - [`SessionRegistry`] is the single source of truth for which sessions exist.
//! - [`SessionLifecycleManager`] admits tasks, runs each one on its own tokio
//!   task, and evicts finished sessions after the retention window.
//! - [`ProcessEngineFactory`] launches an external runner per task.

pub mod error;
pub mod manager;
pub mod process_engine;
pub mod registry;
pub mod session;

pub use error::SessionError;
pub use manager::{NewTask, SessionLifecycleManager, SessionManagerConfig};
pub use process_engine::{ProcessEngine, ProcessEngineConfig, ProcessEngineFactory};
pub use registry::SessionRegistry;
pub use session::{SessionRecord, SessionSnapshot, SessionStatus};
