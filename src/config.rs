//! Configuration for gradespan.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (GRADESPAN_THRESHOLD)
//! 2. Config file (.gradespan/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .gradespan/config.yaml
//! - Falls back to ~/.gradespan/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::span::ResolverConfig;

/// Environment variable overriding the fuzzy acceptance threshold
pub const THRESHOLD_ENV: &str = "GRADESPAN_THRESHOLD";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Resolver tunables after file and env overrides
    pub resolver: ResolverConfig,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".gradespan").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".gradespan").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Apply an environment override of the threshold, if present
fn apply_env(resolver: &mut ResolverConfig, threshold: Option<String>) -> Result<()> {
    if let Some(raw) = threshold {
        resolver.threshold = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", THRESHOLD_ENV, raw))?;
    }
    Ok(())
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let mut resolver = match config_file {
        Some(ref path) => load_config_file(path)?.resolver,
        None => ResolverConfig::default(),
    };

    apply_env(&mut resolver, std::env::var(THRESHOLD_ENV).ok())?;
    resolver
        .validate()
        .context("Resolver configuration is invalid")?;

    Ok(ResolvedConfig {
        resolver,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Resolver tunables from the global configuration
pub fn resolver_config() -> Result<ResolverConfig> {
    Ok(config()?.resolver.clone())
}
