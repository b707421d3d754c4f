use figment::providers::{Data, Format, Json, Toml, Yaml};
use figment::value::{Dict, Map};
use figment::{Metadata, Profile, Provider};
use std::path::Path;

/// Config file formats accepted for `--config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

/// Pick a provider for a user supplied config file based on its extension,
/// sniffing the content when the extension is unknown
pub fn auto<P: AsRef<Path>>(path: P) -> impl Provider {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(format_from_extension)
        .or_else(|| {
            std::fs::read_to_string(path)
                .ok()
                .and_then(|content| detect_format_from_content(&content))
        })
        .unwrap_or(ConfigFormat::Toml);

    tracing::trace!("Loading {} as {:?}", path.display(), format);

    match format {
        ConfigFormat::Toml => SmartProvider::Toml(Toml::file(path)),
        ConfigFormat::Json => SmartProvider::Json(Json::file(path)),
        ConfigFormat::Yaml => SmartProvider::Yaml(Yaml::file(path)),
    }
}

fn format_from_extension(extension: &str) -> Option<ConfigFormat> {
    match extension.to_lowercase().as_str() {
        "toml" => Some(ConfigFormat::Toml),
        "json" => Some(ConfigFormat::Json),
        "yaml" | "yml" => Some(ConfigFormat::Yaml),
        _ => None,
    }
}

/// Wrapper enum to handle different provider types
enum SmartProvider {
    Toml(Data<Toml>),
    Json(Data<Json>),
    Yaml(Data<Yaml>),
}

impl Provider for SmartProvider {
    fn metadata(&self) -> Metadata {
        match self {
            SmartProvider::Toml(p) => p.metadata(),
            SmartProvider::Json(p) => p.metadata(),
            SmartProvider::Yaml(p) => p.metadata(),
        }
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        match self {
            SmartProvider::Toml(p) => p.data(),
            SmartProvider::Json(p) => p.data(),
            SmartProvider::Yaml(p) => p.data(),
        }
    }
}

fn detect_format_from_content(content: &str) -> Option<ConfigFormat> {
    let trimmed = content.trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(ConfigFormat::Json);
    }

    // TOML: [section] headers or key = value
    if trimmed.lines().any(|line| {
        let line = line.trim();
        (line.starts_with('[') && line.ends_with(']')) || (line.contains('=') && !line.contains(':'))
    }) {
        return Some(ConfigFormat::Toml);
    }

    // YAML: document separator or key: value
    if trimmed.starts_with("---") || trimmed.lines().any(|line| line.contains(": ")) {
        return Some(ConfigFormat::Yaml);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            detect_format_from_content(r#"{"env": "local"}"#),
            Some(ConfigFormat::Json)
        );
        assert_eq!(detect_format_from_content("env: local"), Some(ConfigFormat::Yaml));
        assert_eq!(
            detect_format_from_content("[phpcs]\nstandard = \"PSR2\""),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(detect_format_from_content("env = \"local\""), Some(ConfigFormat::Toml));
        assert_eq!(detect_format_from_content(""), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(format_from_extension("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(format_from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(format_from_extension("conf"), None);
    }
}
