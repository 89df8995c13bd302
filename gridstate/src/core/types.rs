//! Grid state records shared by the reducer, collaborators and selectors.
//!
//! Every record serializes with camelCase keys so the JSON form matches the
//! props a host passes in and the payloads carried by actions.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single row record. Rows are free-form JSON objects keyed by column id.
pub type Row = Map<String, Value>;

/// Row key -> position in `GridState::data`.
pub type Lookup = BTreeMap<String, usize>;

/// Immutable view-state snapshot for one grid.
///
/// Transitions never mutate a snapshot in place: every reducer function takes
/// `&GridState` and returns a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridState {
    pub data: Vec<Row>,
    pub lookup: Lookup,
    pub loading: bool,
    pub render_properties: RenderProperties,
    pub page_properties: PageProperties,
    pub sort_properties: Vec<SortProperty>,
    pub filter: Filter,
    pub show_settings: bool,
}

/// Per-column display configuration plus the catch-all layout bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderProperties {
    pub column_properties: BTreeMap<String, ColumnProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_properties: Option<RowProperties>,
    pub layout_properties: Map<String, Value>,
}

/// Display configuration for one column.
///
/// Keys the grid does not interpret are kept in `extra` and round-trip
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProperty {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Display position; columns without one sort after those that have it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColumnProperty {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowProperties {
    /// Row field whose value identifies the row in `GridState::lookup`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageProperties {
    pub current_page: u32,
    pub page_size: u32,
    /// Total record count when the host pages remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
}

impl Default for PageProperties {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            record_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortProperty {
    pub id: String,
    #[serde(default = "default_sort_ascending")]
    pub sort_ascending: bool,
}

fn default_sort_ascending() -> bool {
    true
}

/// Opaque filter value: free text, a host-defined structure, or any other
/// JSON value (`null` clears a filter on most hosts). Stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    Text(String),
    Structured(Map<String, Value>),
    Other(Value),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Text(String::new())
    }
}

/// Plain configuration object used to build the initial state.
///
/// Known grid fields are typed; everything else lands in `extra` and is
/// sorted into layout properties during initialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Row>>,
    #[serde(default)]
    pub render_properties: RenderProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_properties: Option<PageProperties>,
    #[serde(default)]
    pub sort_properties: Vec<SortProperty>,
    #[serde(default)]
    pub filter: Filter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_settings: Option<bool>,
    #[serde(default)]
    pub loading: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Defaults applied when an initialization config omits a field.
///
/// Loaded from `gridstate.toml`; missing fields keep the values below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDefaults {
    pub default_page_size: u32,
    pub default_show_settings: bool,
}

impl Default for GridDefaults {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            default_show_settings: false,
        }
    }
}

impl GridDefaults {
    pub fn validate(&self) -> Result<()> {
        if self.default_page_size == 0 {
            return Err(anyhow!("default_page_size must be > 0"));
        }
        Ok(())
    }

    pub fn page_properties(&self) -> PageProperties {
        PageProperties {
            page_size: self.default_page_size,
            ..PageProperties::default()
        }
    }
}
