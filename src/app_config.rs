//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "SCREENSHOT_API_KEY";

/// TOML-style file configuration for the screenshot CLI.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Screenshot API key.
    pub api_key: Option<String>,
    /// Alternative API endpoint.
    pub base_url: Option<String>,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            url::Url::parse(base_url)
                .with_context(|| format!("Invalid config value for `base_url`: '{base_url}'"))?;
        }
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/screenshot-api/config.toml`
/// 2. `$HOME/.config/screenshot-api/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("screenshot-api")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("screenshot-api")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path; a missing file yields defaults.
pub fn load_default_file_config() -> Result<FileConfig> {
    match resolve_default_config_path() {
        Some(path) if path.exists() => load_file_config(&path),
        _ => Ok(FileConfig::default()),
    }
}

/// Picks the API key: CLI flag, then environment, then config file.
#[must_use]
pub fn resolve_api_key(
    cli_value: Option<&str>,
    env_value: Option<&str>,
    config: &FileConfig,
) -> Option<String> {
    [cli_value, env_value, config.api_key.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "api_key" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `api_key` value on line {}", line_index + 1)
                })?;
                cfg.api_key = Some(parsed);
            }
            "base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `base_url` value on line {}", line_index + 1)
                })?;
                cfg.base_url = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!(
                        "Invalid `connect_timeout_secs` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!(
                        "Invalid `read_timeout_secs` value on line {}",
                        line_index + 1
                    )
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            unknown => {
                bail!(
                    "Unknown configuration key: '{}' on line {}",
                    unknown,
                    line_index + 1
                );
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Drops a trailing `# comment`, ignoring `#` inside double quotes.
fn strip_inline_comment(line: &str) -> &str {
    let mut quoted = false;
    let cut = line.char_indices().find_map(|(index, ch)| {
        if ch == '"' {
            quoted = !quoted;
        }
        (ch == '#' && !quoted).then_some(index)
    });
    cut.map_or(line, |index| &line[..index])
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    raw_value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .map(str::to_string)
        .context("Expected double-quoted string")
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    raw_value
        .parse::<u64>()
        .with_context(|| format!("Expected non-negative integer, got '{raw_value}'"))
}
