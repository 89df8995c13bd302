//! Test-only helpers for building grid states and input files.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value, json};

use crate::core::types::{
    ColumnProperty, GridState, PageProperties, RenderProperties, Row, SortProperty,
};

/// Column entry with an explicit (or absent) `visible` flag.
pub fn column(id: &str, visible: Option<bool>) -> ColumnProperty {
    ColumnProperty {
        visible,
        ..ColumnProperty::new(id)
    }
}

/// Render properties holding exactly `columns`, keyed by id.
pub fn render_with_columns(columns: Vec<ColumnProperty>) -> RenderProperties {
    RenderProperties {
        column_properties: columns
            .into_iter()
            .map(|column| (column.id.clone(), column))
            .collect(),
        ..RenderProperties::default()
    }
}

/// Convert a JSON array of objects into rows. Non-objects are dropped.
pub fn rows(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Convert a JSON object into a prop map. Non-objects yield an empty map.
pub fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn sort(id: &str, sort_ascending: bool) -> SortProperty {
    SortProperty {
        id: id.to_string(),
        sort_ascending,
    }
}

/// Five people, page size 2, on page 1.
///
/// Columns: `name` (order 0) and `age` (order 1) visible, `city` hidden,
/// `id` without an entry.
pub fn sample_state() -> GridState {
    let data = rows(json!([
        { "id": 1, "name": "Ada", "age": 45, "city": "London" },
        { "id": 2, "name": "Grace", "age": 45, "city": "New York" },
        { "id": 3, "name": "Alan", "age": 41, "city": "Manchester" },
        { "id": 4, "name": "Barbara", "age": 30, "city": "Boston" },
        { "id": 5, "name": "Linus", "age": 54, "city": "Helsinki" },
    ]));
    let lookup = (0..data.len()).map(|index| (index.to_string(), index)).collect();

    let mut name = column("name", None);
    name.order = Some(0);
    let mut age = column("age", None);
    age.order = Some(1);

    GridState {
        data,
        lookup,
        render_properties: render_with_columns(vec![name, age, column("city", Some(false))]),
        page_properties: PageProperties {
            current_page: 1,
            page_size: 2,
            record_count: None,
        },
        ..GridState::default()
    }
}

/// Temporary directory populated with `files` (name, contents).
pub fn fixture_dir(files: &[(&str, &str)]) -> (tempfile::TempDir, Vec<PathBuf>) {
    let temp = tempfile::tempdir().expect("tempdir");
    let paths = files
        .iter()
        .map(|(name, contents)| {
            let path = temp.path().join(name);
            fs::write(&path, contents).expect("write fixture");
            path
        })
        .collect();
    (temp, paths)
}
