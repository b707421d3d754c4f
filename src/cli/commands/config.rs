use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Subcommand};
use std::path::Path;
use std::process::ExitCode;

use crate::cli::Output;
use crate::config::SnifferConfig;
use crate::config::core::DEFAULT_CONFIG;
use crate::config::smart_load::ConfigFormat;
use crate::git::GitRepo;
use crate::tools::ToolLocator;

/// File written by `config init`
const REPO_CONFIG_FILE: &str = "git-sniffer.toml";

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Create git-sniffer.toml with the default settings
    Init {
        /// Overwrite an existing git-sniffer.toml
        #[arg(long)]
        force: bool,
    },
    /// Display the merged configuration
    Show {
        /// Output format: toml, json, yaml
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Check that every configured tool can be found
    Validate,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&Path>, output: &Output) -> Result<ExitCode> {
    match args.command {
        ConfigCommand::Init { force } => init(force, output),
        ConfigCommand::Show { format } => show(&format, custom_config, output),
        ConfigCommand::Validate => validate(custom_config, output),
    }
}

fn init(force: bool, output: &Output) -> Result<ExitCode> {
    let path = Path::new(REPO_CONFIG_FILE);
    if path.exists() && !force {
        bail!("{REPO_CONFIG_FILE} already exists (use --force to overwrite it)");
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {REPO_CONFIG_FILE}"))?;

    output.success(&format!("Created {REPO_CONFIG_FILE} with default settings"));
    Ok(ExitCode::SUCCESS)
}

fn show(format: &str, custom_config: Option<&Path>, output: &Output) -> Result<ExitCode> {
    let format = parse_format(format)?;
    let config = SnifferConfig::load(custom_config)?;

    output.raw(&render(&config, format)?);
    Ok(ExitCode::SUCCESS)
}

fn validate(custom_config: Option<&Path>, output: &Output) -> Result<ExitCode> {
    let config = SnifferConfig::load(custom_config)?;
    output.header("git-sniffer configuration");

    output.key_value("Environment:", &config.app_env, config.environment_matches());
    output.key_value("Runs in:", &config.env, false);
    if !config.environment_matches() {
        output.warning("Checks are skipped in this environment");
    }

    for family in config.enabled_families() {
        output.list_item(&format!("{family}: .{}", config.extensions(family).join(", .")));
    }

    // Hooks resolve relative paths against the work tree root
    let base_dir = match GitRepo::discover() {
        Ok(repo) => repo.workdir()?.to_path_buf(),
        Err(_) => std::env::current_dir()?,
    };

    match ToolLocator::new(&config, &base_dir).verify() {
        Ok(()) => {
            output.success("Configuration is valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            output.error(&err.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn parse_format(format: &str) -> Result<ConfigFormat> {
    match format.to_lowercase().as_str() {
        "toml" => Ok(ConfigFormat::Toml),
        "json" => Ok(ConfigFormat::Json),
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        _ => Err(anyhow!("Unsupported format: {format}. Use json, toml, or yaml")),
    }
}

fn render(config: &SnifferConfig, format: ConfigFormat) -> Result<String> {
    let rendered = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yml::to_string(config)?,
    };
    Ok(rendered)
}
