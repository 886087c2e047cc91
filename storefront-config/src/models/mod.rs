use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use storefront_core::QueryLimits;

pub const CONFIG_PATH_VAR: &str = "STOREFRONT_SEARCH_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "STOREFRONT_SEARCH_CONFIG_JSON";

const DEFAULT_CANDIDATES: &[&str] = &[
    "search.toml",
    "search.json",
    "config/search.toml",
    "config/search.json",
];

/// Source that produced the search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Search tuning. Every key is optional; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page-size and complexity bounds enforced by the query validator.
    /// Raising `max_limit` lets callers pull bigger pages at the cost of
    /// larger responses.
    pub limits: QueryLimits,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limits: QueryLimits::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl SearchConfig {
    /// Load search configuration using environment variables.
    /// Evaluation order:
    /// 1) `$STOREFRONT_SEARCH_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$STOREFRONT_SEARCH_CONFIG_JSON` (inline JSON),
    /// 3) `search.toml`, `search.json`, `config/search.toml`,
    ///    `config/search.json` relative to the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, SearchConfigSource)> {
        Self::load_with(|key| env::var(key).ok(), Path::new("."))
    }

    /// Same as [`SearchConfig::load_from_env`] with an injectable variable
    /// lookup and base directory for the default candidates.
    pub fn load_with<F>(
        lookup: F,
        base_dir: &Path,
    ) -> anyhow::Result<(Self, SearchConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_VAR)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, SearchConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((parsed, SearchConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(base_dir) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, SearchConfigSource::File(path)));
        }

        Ok((Self::default(), SearchConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read search config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid search config {}", path.display())),
            Some("toml") | Some("tml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid search config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse search config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).map_err(|err| anyhow!("invalid search config json: {err}"))
    }

    fn find_default_file(base_dir: &Path) -> Option<PathBuf> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|candidate| base_dir.join(candidate))
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = SearchConfig::parse_from_str(
            "log_filter = \"debug\"\n[limits]\nmax_limit = 250\n",
            "inline",
        )
        .unwrap();

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.limits.max_limit, 250);
        assert_eq!(config.limits.default_limit, 20);
        assert_eq!(config.limits.max_predicates, 64);
    }

    #[test]
    fn json_is_accepted_without_extension() {
        let config =
            SearchConfig::parse_from_str(r#"{"limits": {"default_limit": 50}}"#, "inline")
                .unwrap();
        assert_eq!(config.limits.default_limit, 50);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn garbage_reports_both_parsers() {
        let err = SearchConfig::parse_from_str("limits = [", "inline").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("toml error"));
        assert!(message.contains("json error"));
    }
}
