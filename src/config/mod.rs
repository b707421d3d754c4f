//! Configuration management for git-sniffer
//!
//! This module defines the typed configuration object consumed by the
//! pre-commit gate. Values are layered by [`core`] from embedded defaults,
//! user and repository files, and environment variables.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod core;
pub mod smart_load;

/// Effective configuration for one gate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnifferConfig {
    /// Environment the gate is currently running in
    #[serde(default = "default_env")]
    pub app_env: String,

    /// Environment the gate is allowed to run in
    #[serde(default = "default_env")]
    pub env: String,

    /// PHP_CodeSniffer family (analysis + auto-fix)
    #[serde(default)]
    pub phpcs: PhpcsConfig,

    /// ESLint family
    #[serde(default)]
    pub eslint: EslintConfig,

    /// Optional test suite run after linting passes
    #[serde(default)]
    pub tests: TestsConfig,
}

/// PHP_CodeSniffer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhpcsConfig {
    /// phpcs binary used for analysis
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub bin: Option<PathBuf>,

    /// phpcbf binary used to fix files in place before analysis
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub fixer_bin: Option<PathBuf>,

    /// File extensions routed to phpcs
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Coding standard passed as --standard
    #[serde(default)]
    pub standard: String,

    /// File encoding passed as --encoding
    #[serde(default)]
    pub encoding: String,

    /// Patterns passed as --ignore
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// ESLint configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EslintConfig {
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub bin: Option<PathBuf>,

    /// Path given to `-c`; required when `bin` is set
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,

    /// Path given to `--ignore-path`; `--no-ignore` is used when unset
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub ignore_path: Option<PathBuf>,

    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Test suite configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestsConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Test runner, invoked without arguments
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub bin: Option<PathBuf>,
}

/// A family of tools sharing one extension allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    CodeSniffer,
    Eslint,
}

impl ToolFamily {
    pub const ALL: [ToolFamily; 2] = [ToolFamily::CodeSniffer, ToolFamily::Eslint];
}

impl fmt::Display for ToolFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolFamily::CodeSniffer => write!(f, "PHP_CodeSniffer"),
            ToolFamily::Eslint => write!(f, "ESLint"),
        }
    }
}

fn default_env() -> String {
    "local".to_string()
}

/// Treat missing, empty and whitespace-only paths as "not configured"
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from))
}

impl Default for SnifferConfig {
    /// An unconfigured gate; shipped defaults live in `default-config.toml`
    fn default() -> Self {
        Self {
            app_env: default_env(),
            env: default_env(),
            phpcs: PhpcsConfig::default(),
            eslint: EslintConfig::default(),
            tests: TestsConfig::default(),
        }
    }
}

impl SnifferConfig {
    /// Whether the active environment is the one the gate targets
    pub fn environment_matches(&self) -> bool {
        self.app_env == self.env
    }

    pub fn is_enabled(&self, family: ToolFamily) -> bool {
        match family {
            ToolFamily::CodeSniffer => self.phpcs.bin.is_some(),
            ToolFamily::Eslint => self.eslint.bin.is_some(),
        }
    }

    /// Families with a configured binary, in execution order
    pub fn enabled_families(&self) -> Vec<ToolFamily> {
        ToolFamily::ALL
            .into_iter()
            .filter(|family| self.is_enabled(*family))
            .collect()
    }

    /// Extension allow-list of a family
    pub fn extensions(&self, family: ToolFamily) -> &[String] {
        match family {
            ToolFamily::CodeSniffer => &self.phpcs.extensions,
            ToolFamily::Eslint => &self.eslint.extensions,
        }
    }

    /// Test runner to invoke, if the test gate is on
    pub fn test_runner(&self) -> Option<&Path> {
        if self.tests.enabled {
            self.tests.bin.as_deref()
        } else {
            None
        }
    }
}
