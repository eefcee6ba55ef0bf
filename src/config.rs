use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::filter::default_industries;

const ENV_FILE: &str = ".env";
pub const TOKEN_VAR: &str = "CRM_ACCESS_TOKEN";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub crm: CrmConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CrmConfig {
    pub api_base: String,
    #[serde(default = "default_leads_path")]
    pub leads_path: String,
    /// `{id}` is replaced with the lead identifier.
    #[serde(default = "default_assign_path")]
    pub assign_path: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_leads_path() -> String {
    "/leads/qualified".to_string()
}

fn default_assign_path() -> String {
    "/leads/{id}/assign".to_string()
}

fn default_request_timeout() -> u64 { 10_000 }

impl CrmConfig {
    pub fn with_base(api_base: &str) -> Self {
        Self {
            api_base: api_base.to_string(),
            leads_path: default_leads_path(),
            assign_path: default_assign_path(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_industries")]
    pub industries: Vec<String>,
    #[serde(default)]
    pub default_min_score: u32,
    #[serde(default = "default_score_step")]
    pub score_step: u32,
    #[serde(default)]
    pub qualified_only: bool,
    #[serde(default = "default_toast_ttl")]
    pub toast_ttl_s: u64,
}

fn default_score_step() -> u32 { 10 }
fn default_toast_ttl() -> u64 { 8 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            industries: default_industries(),
            default_min_score: 0,
            score_step: default_score_step(),
            qualified_only: false,
            toast_ttl_s: default_toast_ttl(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_file() -> String {
    "lead-desk.log".to_string()
}

fn default_log_filter() -> String {
    "lead_desk=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        if config.dashboard.score_step == 0 {
            anyhow::bail!("dashboard.score_step must be greater than zero");
        }
        Ok(config)
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        for (key, value) in parse_env_lines(&content) {
            if std::env::var(&key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }

    /// Access token comes from the environment, or is prompted at startup.
    /// A prompted token is saved to .env for future runs.
    pub fn access_token() -> Result<String> {
        match std::env::var(TOKEN_VAR) {
            Ok(token) if !token.is_empty() => Ok(sanitize_key(&token)),
            _ => {
                let token = prompt("CRM access token")?;
                save_env_var(TOKEN_VAR, &token);
                Ok(token)
            }
        }
    }
}

/// KEY=VALUE pairs from a .env file; comments, blanks and a leading BOM are skipped.
fn parse_env_lines(content: &str) -> Vec<(String, String)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(|line| line.trim().trim_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

fn prompt(label: &str) -> Result<String> {
    print!("  {} > ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let value = sanitize_key(&input);
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", label);
    }
    Ok(value)
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}

/// Append a KEY=VALUE line to .env and set it in the current process.
fn save_env_var(key: &str, value: &str) {
    std::env::set_var(key, value);
    let path = Path::new(ENV_FILE);
    let mut contents = std::fs::read_to_string(path).unwrap_or_default();
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&format!("{}={}\n", key, value));
    if let Err(e) = std::fs::write(path, contents) {
        tracing::warn!(error = %e, "failed to persist {} to .env", key);
    }
}
