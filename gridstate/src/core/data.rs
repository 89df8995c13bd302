//! Data collaborators: column derivation, row transform, prop-driven reload.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::core::types::{ColumnProperty, GridConfig, GridState, Lookup, RenderProperties, Row};

/// Rows plus the row-key index built over them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformedData {
    pub data: Vec<Row>,
    pub lookup: Lookup,
}

/// Derive one `{id}` column entry per key of the first row when the config
/// supplies no column properties. Configs that already declare columns, or
/// carry no rows, are returned unchanged.
pub fn add_column_properties_when_none_exist(mut config: GridConfig) -> GridConfig {
    if !config.render_properties.column_properties.is_empty() {
        return config;
    }
    let derived: Option<BTreeMap<String, ColumnProperty>> = config
        .data
        .as_ref()
        .and_then(|rows| rows.first())
        .map(|first| {
            first
                .keys()
                .map(|key| (key.clone(), ColumnProperty::new(key.clone())))
                .collect()
        });
    if let Some(columns) = derived {
        config.render_properties.column_properties = columns;
    }
    config
}

/// Index rows by row key, keeping their order.
///
/// The key is the row's `rowProperties.rowKey` field rendered as text when
/// configured and present, otherwise the row's position. A duplicate key
/// points at the last row carrying it.
pub fn transform_data(rows: &[Row], render: &RenderProperties) -> TransformedData {
    let key_field = render
        .row_properties
        .as_ref()
        .and_then(|props| props.row_key.as_deref());

    let mut lookup = Lookup::new();
    for (index, row) in rows.iter().enumerate() {
        let key = row_key(row, index, key_field);
        if let Some(previous) = lookup.insert(key, index) {
            debug!(previous, index, "duplicate row key; later row wins");
        }
    }

    TransformedData {
        data: rows.to_vec(),
        lookup,
    }
}

fn row_key(row: &Row, index: usize, key_field: Option<&str>) -> String {
    match key_field.and_then(|field| row.get(field)) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => index.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Reload rows when the host's `data` prop changed.
///
/// Only an array `data` in `new_props` that differs from `old_props` counts
/// as a change; non-object entries in it are skipped.
pub fn update_data_from_props(
    state: &GridState,
    new_props: &Map<String, Value>,
    old_props: &Map<String, Value>,
) -> GridState {
    let Some(Value::Array(items)) = new_props.get("data") else {
        return state.clone();
    };
    if old_props.get("data") == new_props.get("data") {
        return state.clone();
    }

    let rows: Vec<Row> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row.clone()),
            other => {
                warn!(value = %other, "skipping non-object row in data prop");
                None
            }
        })
        .collect();

    let transformed = transform_data(&rows, &state.render_properties);
    GridState {
        data: transformed.data,
        lookup: transformed.lookup,
        loading: false,
        ..state.clone()
    }
}
