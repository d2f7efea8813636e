//! # FaceFinder Command-Line Client
//!
//! Terminal front-end for the FaceFinder photo collection and face search
//! service, built on the `client` library.
//!
//! ## Modules
//!
//! - [`app`] - Application context and command execution
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Configuration loading and validation
//! - [`constants`] - Global constants for environment variables
//! - [`error`] - Error types and user-facing messages
//! - [`forms`] - Login and registration forms with their validation rules
//! - [`logger`] - Logging configuration
//! - [`router`] - Route table of the web client and navigation state
//! - [`services`] - Session handling on top of the API client
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod forms;
pub mod logger;
pub mod router;
pub mod services;

// Re-export commonly used types for easier access in tests
pub use error::{AppError, AppResult};
