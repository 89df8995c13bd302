//! Read-only views derived from a grid state.
//!
//! Selectors apply the text filter, the sort list and paging locally. Hosts
//! that page or filter remotely set `recordCount` / structured filters and
//! read `data` directly instead.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use crate::core::types::{Filter, GridState, Row, SortProperty};
use crate::core::visibility::visible_column_ids;

/// The rows of the current page, projected to visible columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page: u32,
    pub max_page: u32,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Rows matching a text filter against any visible column.
///
/// Matching is a case-insensitive substring test. An empty text filter, or any
/// non-text value (structured, `null`, numbers), keeps every row.
pub fn filtered_rows(state: &GridState) -> Vec<&Row> {
    let needle = match &state.filter {
        Filter::Text(text) if !text.trim().is_empty() => text.trim().to_lowercase(),
        _ => return state.data.iter().collect(),
    };
    let columns = visible_column_ids(&state.render_properties);
    state
        .data
        .iter()
        .filter(|row| {
            columns
                .iter()
                .filter_map(|id| row.get(id))
                .filter_map(cell_text)
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable multi-key sort by the state's sort list, first key most significant.
pub fn sorted_rows<'a>(state: &GridState, mut rows: Vec<&'a Row>) -> Vec<&'a Row> {
    if state.sort_properties.is_empty() {
        return rows;
    }
    rows.sort_by(|a, b| compare_rows(a, b, &state.sort_properties));
    rows
}

/// Total records: the host-supplied count when present, else filtered rows.
pub fn record_count(state: &GridState) -> u64 {
    state
        .page_properties
        .record_count
        .unwrap_or_else(|| filtered_rows(state).len() as u64)
}

/// Last page number; an empty grid still has one page.
pub fn max_page(state: &GridState) -> u32 {
    let size = u64::from(state.page_properties.page_size.max(1));
    let pages = record_count(state).div_ceil(size).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

pub fn has_next(state: &GridState) -> bool {
    state.page_properties.current_page < max_page(state)
}

pub fn has_previous(state: &GridState) -> bool {
    state.page_properties.current_page > 1
}

/// Filtered, sorted rows of the current page, keeping visible columns only.
pub fn current_page_rows(state: &GridState) -> Vec<Row> {
    let columns = visible_column_ids(&state.render_properties);
    let size = state.page_properties.page_size.max(1) as usize;
    let skipped_pages = state.page_properties.current_page.saturating_sub(1) as usize;
    let start = skipped_pages.saturating_mul(size);

    sorted_rows(state, filtered_rows(state))
        .into_iter()
        .skip(start)
        .take(size)
        .map(|row| {
            columns
                .iter()
                .filter_map(|id| row.get(id).map(|value| (id.clone(), value.clone())))
                .collect()
        })
        .collect()
}

pub fn page_view(state: &GridState) -> PageView {
    PageView {
        page: state.page_properties.current_page,
        max_page: max_page(state),
        columns: visible_column_ids(&state.render_properties),
        rows: current_page_rows(state),
    }
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn compare_rows(a: &Row, b: &Row, sort: &[SortProperty]) -> Ordering {
    for key in sort {
        let ordering = compare_values(a.get(&key.id), b.get(&key.id));
        let ordering = if key.sort_ascending {
            ordering
        } else {
            ordering.reverse()
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Missing and null first, then booleans, numbers, strings, and compound
/// values. Values of the same kind compare naturally.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}
