//! # git-sniffer - coding standard gate for git commits
//!
//! git-sniffer runs as a pre-commit hook. It collects the files staged for
//! commit, auto-fixes PHP files with phpcbf and re-stages them, analyses them
//! with PHP_CodeSniffer and ESLint, and optionally runs the project's test
//! suite. Any violation or failing test rejects the commit.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install the hook into the current repository
//! git-sniffer install
//!
//! # Write a git-sniffer.toml to customise tool paths
//! git-sniffer config init
//!
//! # Run the gate by hand
//! git-sniffer check
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod git;
pub mod hooks;
pub mod tools;

pub use cli::{Cli, Output};
pub use config::SnifferConfig;
pub use error::{ConfigurationError, GateError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
