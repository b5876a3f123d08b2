//! # BrowserHands Config
//!
//! Configuration management for the BrowserHands service.

mod error;
mod loader;
mod redis;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use redis::{RedisConfig, RedisSettings};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
