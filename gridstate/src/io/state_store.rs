//! Loading of initialization configs and action files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::validator_for;
use serde_json::Value;

use crate::core::action::Action;
use crate::core::types::{GridConfig, GridState};

pub const CONFIG_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/grid_config/v1.schema.json"
));

/// Load an initialization config, validated against the config schema.
pub fn load_config(path: &Path) -> Result<GridConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse config {}", path.display()))?;
    validate_config(&value).with_context(|| format!("validate config {}", path.display()))?;
    serde_json::from_value(value).with_context(|| format!("deserialize config {}", path.display()))
}

/// Load a JSON array of actions.
///
/// Each entry is decoded separately so errors name the offending index.
pub fn load_actions(path: &Path) -> Result<Vec<Action>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read actions {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse actions {}", path.display()))?;
    let Value::Array(items) = value else {
        bail!("actions {} must be a JSON array", path.display());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .with_context(|| format!("decode action #{} in {}", index, path.display()))
        })
        .collect()
}

/// Write a state snapshot as pretty JSON with trailing newline.
pub fn write_state(path: &Path, state: &GridState) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(state).context("serialize state json")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write state {}", path.display()))
}

/// Validate a config document against the embedded Draft 2020-12 schema.
pub fn validate_config(config: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(CONFIG_SCHEMA).context("parse config schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    let messages: Vec<String> = compiled
        .iter_errors(config)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}
