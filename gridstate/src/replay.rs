//! Replay helpers for `gridstate reduce` and `gridstate page`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::action::Action;
use crate::core::reducer::{initialize, reduce};
use crate::core::types::{GridConfig, GridDefaults, GridState};
use crate::io::settings::{SETTINGS_FILE, load_settings};
use crate::io::state_store::{load_actions, load_config};

/// Input files for one replay.
#[derive(Debug, Clone)]
pub struct ReplayInputs {
    pub config_path: PathBuf,
    pub actions_path: Option<PathBuf>,
    /// Falls back to `gridstate.toml` in the working directory.
    pub settings_path: Option<PathBuf>,
}

/// Initialize from `config` and apply `actions` in order.
pub fn replay(config: GridConfig, actions: &[Action], defaults: &GridDefaults) -> GridState {
    let initial = initialize(config, defaults);
    actions
        .iter()
        .fold(initial, |state, action| reduce(&state, action))
}

/// Load all inputs from disk without reducing.
pub fn load_inputs(inputs: &ReplayInputs) -> Result<(GridConfig, Vec<Action>, GridDefaults)> {
    let settings_path = inputs
        .settings_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let defaults = load_settings(&settings_path).context("load settings")?;
    let config = load_config(&inputs.config_path).context("load grid config")?;
    let actions = match &inputs.actions_path {
        Some(path) => load_actions(path).context("load actions")?,
        None => Vec::new(),
    };
    debug!(
        config = %inputs.config_path.display(),
        actions = actions.len(),
        "loaded replay inputs"
    );
    Ok((config, actions, defaults))
}

/// Load inputs from disk and replay them.
pub fn replay_from_files(inputs: &ReplayInputs) -> Result<GridState> {
    let (config, actions, defaults) = load_inputs(inputs)?;
    let state = replay(config, &actions, &defaults);
    info!(
        rows = state.data.len(),
        page = state.page_properties.current_page,
        "replay complete"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::visibility::is_column_visible;
    use crate::test_support::fixture_dir;
    use serde_json::json;

    #[test]
    fn replay_applies_actions_in_order() {
        let config: GridConfig = serde_json::from_value(json!({
            "data": [{ "id": 1, "name": "a" }, { "id": 2, "name": "b" }],
        }))
        .expect("config");
        let actions = vec![
            Action::SetPage { page_number: 4 },
            Action::SetPageSize { page_size: 1 },
            Action::NextPage,
            Action::ToggleColumn {
                column_id: "id".to_string(),
            },
        ];

        let state = replay(config, &actions, &GridDefaults::default());
        assert_eq!(state.page_properties.page_size, 1);
        assert_eq!(state.page_properties.current_page, 2);
        assert!(!is_column_visible(&state.render_properties, "id"));
        assert!(is_column_visible(&state.render_properties, "name"));
    }

    #[test]
    fn replay_from_files_uses_settings_defaults() {
        let (_temp, paths) = fixture_dir(&[
            ("config.json", r#"{ "data": [{ "id": 1 }] }"#),
            ("actions.json", r#"[{ "type": "TOGGLE_SETTINGS" }]"#),
            ("gridstate.toml", "default_page_size = 3\ndefault_show_settings = true\n"),
        ]);
        let state = replay_from_files(&ReplayInputs {
            config_path: paths[0].clone(),
            actions_path: Some(paths[1].clone()),
            settings_path: Some(paths[2].clone()),
        })
        .expect("replay");
        assert_eq!(state.page_properties.page_size, 3);
        assert!(!state.show_settings);
    }
}
