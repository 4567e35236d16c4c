//==================================================
// File: config.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Runtime configuration for RedCode
// Objective: Load `redcode.toml` from the usual places and fall back to
//            built-in defaults
//==================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Project-local configuration file name.
const LOCAL_CONFIG: &str = "redcode.toml";
/// File name inside `<config dir>/redcode/`.
const USER_CONFIG: &str = "config.toml";

//==================================================
// Section 1.0 - Model
//==================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Script run when none is given on the command line.
    pub script: PathBuf,
    /// Deepest allowed user function nesting.
    pub max_call_depth: usize,
    pub bridge: BridgeConfig,
    pub web: WebConfig,
}

/// Where and how long to wait for the web bridge file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub path: PathBuf,
    pub attempts: u32,
    pub interval_ms: u64,
}

/// HTTP fallback used by `web.leer`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    pub fetch: bool,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("script.red"),
            max_call_depth: 256,
            bridge: BridgeConfig::default(),
            web: WebConfig::default(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("web_bridge.tmp"),
            attempts: 30,
            interval_ms: 100,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            fetch: true,
            timeout_secs: 7,
            user_agent: "RedSync/3.6".to_string(),
        }
    }
}

//==================================================
// Section 2.0 - Loading
//==================================================

impl RuntimeConfig {
    /// Loads the first configuration found: `explicit`, then `./redcode.toml`,
    /// then the user configuration directory. Returns the defaults and `None`
    /// when no file exists. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            return Ok((config, Some(path.to_path_buf())));
        }
        for candidate in Self::candidates() {
            if candidate.is_file() {
                let config = Self::from_file(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("redcode").join(USER_CONFIG));
        }
        paths
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("parsing configuration {}", path.display()))
    }

    pub fn from_toml(data: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let serialized = toml::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("writing configuration to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = RuntimeConfig::from_toml("max_call_depth = 32\n[web]\nfetch = false\n")
            .expect("valid toml");
        assert_eq!(config.max_call_depth, 32);
        assert!(!config.web.fetch);
        assert_eq!(config.web.timeout_secs, 7);
        assert_eq!(config.bridge, BridgeConfig::default());
        assert_eq!(config.script, PathBuf::from("script.red"));
    }

    #[test]
    fn explicit_path_wins_and_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("custom.toml");
        let mut config = RuntimeConfig::default();
        config.bridge.attempts = 3;
        config.save(&path).expect("save");

        let (loaded, from) = RuntimeConfig::load(Some(&path)).expect("load");
        assert_eq!(loaded, config);
        assert_eq!(from.as_deref(), Some(path.as_path()));

        let missing = dir.path().join("missing.toml");
        let err = RuntimeConfig::load(Some(&missing)).expect_err("missing file");
        assert!(err.to_string().contains("reading configuration"));
    }

    #[test]
    fn malformed_files_report_their_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "max_call_depth = \"muchos\"").expect("write");
        let err = RuntimeConfig::from_file(&path).expect_err("bad type");
        assert!(err.to_string().contains("parsing configuration"));
    }
}

//==================================================
// End of file
//==================================================
