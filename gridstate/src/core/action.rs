//! Actions dispatched against an existing grid state.
//!
//! Actions are JSON objects tagged by `type` (`SET_PAGE_SIZE`, `TOGGLE_COLUMN`,
//! ...) with camelCase payload fields. Initialization is not an action: it has
//! no previous state and goes through [`crate::core::reducer::initialize`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::types::{Filter, Row, SortProperty};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Fresh rows arrived; re-run the transform and clear `loading`.
    LoadedData { data: Vec<Row> },
    #[serde(rename_all = "camelCase")]
    SetPageSize { page_size: u32 },
    #[serde(rename_all = "camelCase")]
    SetPage { page_number: u32 },
    NextPage,
    PreviousPage,
    SetFilter { filter: Filter },
    #[serde(rename_all = "camelCase")]
    SetSort { sort_properties: SortSelection },
    ToggleSettings,
    #[serde(rename_all = "camelCase")]
    ToggleColumn { column_id: String },
    /// Host props changed; merge the trackable ones into state.
    UpdateState { update: PropsUpdate },
}

impl Action {
    /// Stable tag name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::LoadedData { .. } => "LOADED_DATA",
            Action::SetPageSize { .. } => "SET_PAGE_SIZE",
            Action::SetPage { .. } => "SET_PAGE",
            Action::NextPage => "NEXT_PAGE",
            Action::PreviousPage => "PREVIOUS_PAGE",
            Action::SetFilter { .. } => "SET_FILTER",
            Action::SetSort { .. } => "SET_SORT",
            Action::ToggleSettings => "TOGGLE_SETTINGS",
            Action::ToggleColumn { .. } => "TOGGLE_COLUMN",
            Action::UpdateState { .. } => "UPDATE_STATE",
        }
    }
}

/// Sort payload: hosts send either one record or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortSelection {
    Many(Vec<SortProperty>),
    Single(SortProperty),
}

impl SortSelection {
    pub fn into_vec(self) -> Vec<SortProperty> {
        match self {
            SortSelection::Many(list) => list,
            SortSelection::Single(one) => vec![one],
        }
    }
}

/// Full host prop sets before and after a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropsUpdate {
    pub new_props: Map<String, Value>,
    pub old_props: Map<String, Value>,
}
