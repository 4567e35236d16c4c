//==================================================
// File: modules/web.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: `web` native module
// Objective: Import values from the web bridge file and resolve web.leer
//            requests, fetching over HTTP when nothing was delivered
//==================================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use super::{DataSource, ModuleContext, ModuleError, ModuleRegistry, split_args, store_detected};
use crate::config::{BridgeConfig, WebConfig};

/// Stored when a request or key lookup fails.
pub const MISSING: &str = "NULL";

//==================================================
// Section 1.0 - Bridge File
//==================================================

/// A `variable|valor` file left by an external fetcher. Consumed on read.
#[derive(Debug, Clone)]
pub struct BridgeFile {
    path: PathBuf,
    attempts: u32,
    interval: Duration,
}

impl BridgeFile {
    pub fn new(path: impl Into<PathBuf>, attempts: u32, interval: Duration) -> Self {
        Self {
            path: path.into(),
            attempts,
            interval,
        }
    }

    /// Waits for the file as configured.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(
            &config.path,
            config.attempts,
            Duration::from_millis(config.interval_ms),
        )
    }

    /// Reads whatever is there right now.
    pub fn immediate(path: impl Into<PathBuf>) -> Self {
        Self::new(path, 0, Duration::ZERO)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn has_content(&self) -> bool {
        fs::metadata(&self.path)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false)
    }

    fn wait(&self) {
        for attempt in 0..self.attempts {
            if self.has_content() {
                debug!(attempt, "bridge file ready");
                return;
            }
            thread::sleep(self.interval);
        }
    }
}

impl DataSource for BridgeFile {
    fn poll(&mut self) -> Result<Vec<(String, String)>, ModuleError> {
        self.wait();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no bridge file");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(ModuleError::Bridge {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let entries = parse_bridge(&text);
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %err, "could not remove bridge file");
        }
        info!(entries = entries.len(), "bridge file consumed");
        Ok(entries)
    }
}

/// Parses `variable|valor` lines; lines without a separator are skipped.
pub fn parse_bridge(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.split_once('|'))
        .map(|(name, value)| {
            let value = value.strip_suffix('\r').unwrap_or(value);
            (name.to_string(), value.to_string())
        })
        .collect()
}

//==================================================
// Section 2.0 - HTTP Fallback
//==================================================

pub fn fetch(url: &str, config: &WebConfig) -> Result<String, ModuleError> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(&config.user_agent)
        .build();
    let failed = |message: String| ModuleError::Fetch {
        url: url.to_string(),
        message,
    };
    let response = agent
        .get(url)
        .call()
        .map_err(|err| failed(err.to_string()))?;
    response.into_string().map_err(|err| failed(err.to_string()))
}

/// Depth-first key search: direct members of an object first, then its
/// nested values, then array items in order.
pub fn find_key<'a>(value: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    match value {
        JsonValue::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|nested| find_key(nested, key))),
        JsonValue::Array(items) => items.iter().find_map(|item| find_key(item, key)),
        _ => None,
    }
}

/// Picks `key` out of a response body. Key `0` means the whole body.
pub fn extract(body: &str, key: &str) -> Option<String> {
    if key == "0" {
        return Some(body.trim().to_string());
    }
    let document: JsonValue = serde_json::from_str(body).ok()?;
    find_key(&document, key).map(|found| match found {
        JsonValue::String(text) => text.clone(),
        other => other.to_string(),
    })
}

//==================================================
// Section 3.0 - Module
//==================================================

/// Drains the bridge once, without waiting, then registers `web.leer`.
pub fn install(registry: &mut ModuleRegistry, context: &mut ModuleContext<'_>) {
    let mut bridge = BridgeFile::immediate(&context.config.bridge.path);
    match bridge.poll() {
        Ok(entries) => {
            for (name, value) in &entries {
                store_detected(context.memory, name, value);
            }
        }
        Err(err) => warn!(error = %err, "bridge import failed"),
    }
    registry.register("web.leer", leer);
}

/// `web.leer(url, clave, var)`
fn leer(ctx: &mut ModuleContext<'_>, raw: &str) {
    let args = split_args(raw);
    let [url, key, var, ..] = args.as_slice() else {
        return;
    };
    if ctx.memory.has_number(var) || ctx.memory.has_text(var) {
        return;
    }

    if !ctx.config.web.fetch {
        ctx.console
            .print_line(&format!("[WEB-ERROR] La variable '{var}' no recibio datos."));
        ctx.console
            .print_line("            Verifica tu conexion o la clave del JSON.");
        return;
    }

    match fetch(url, &ctx.config.web) {
        Ok(body) => match extract(&body, key) {
            Some(value) => store_detected(ctx.memory, var, &value),
            None => ctx.memory.write_text(var, MISSING, false),
        },
        Err(err) => {
            warn!(error = %err, "web request failed");
            ctx.memory.write_text(var, MISSING, false);
        }
    }
}


//==================================================
// End of file
//==================================================
