use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::Path;

use super::{SnifferConfig, smart_load};

// Embed the default config at compile time
pub const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-level config files, lowest priority first
const REPO_CONFIG_FILES: [&str; 4] = [
    "git-sniffer.toml",
    "git-sniffer.json",
    "git-sniffer.yaml",
    "git-sniffer.yml",
];

impl SnifferConfig {
    /// Load the layered configuration
    pub fn load(custom_config: Option<&Path>) -> Result<Self> {
        Self::figment(custom_config)
            .extract()
            .context("Failed to load git-sniffer configuration")
    }

    /// Build the provider chain: defaults, user, repo, custom file, environment
    pub fn figment(custom_config: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(Self::user_config_path()));

        for file in REPO_CONFIG_FILES {
            figment = match file.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(file)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(file)),
                _ => figment.merge(Toml::file(file)),
            };
        }

        if let Some(path) = custom_config {
            tracing::debug!("Using custom config file {}", path.display());
            figment = figment.merge(smart_load::auto(path));
        }

        // Environment variables always have highest priority
        figment
            .merge(Env::raw().only(&["APP_ENV"]))
            .merge(Env::prefixed("GIT_SNIFFER_").split("__"))
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/git-sniffer/config.toml"),
            Err(_) => "~/.config/git-sniffer/config.toml".to_string(),
        }
    }
}
