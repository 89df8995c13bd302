//! Column visibility derivation.

use std::cmp::Ordering;

use crate::core::types::{ColumnProperty, RenderProperties};

/// A column is visible when it has a render-property entry whose `visible`
/// flag is unset or `true`. Columns without an entry are hidden.
pub fn is_column_visible(render: &RenderProperties, column_id: &str) -> bool {
    render
        .column_properties
        .get(column_id)
        .is_some_and(|column| column.visible.unwrap_or(true))
}

/// Return `render` with the column's visibility flipped.
///
/// A column without an entry gets a new `{id, visible: true}` entry, since
/// it was hidden before.
pub fn toggle_column(render: &RenderProperties, column_id: &str) -> RenderProperties {
    let currently_visible = is_column_visible(render, column_id);
    let mut next = render.clone();
    match next.column_properties.get_mut(column_id) {
        Some(column) => column.visible = Some(!currently_visible),
        None => {
            let mut column = ColumnProperty::new(column_id);
            column.visible = Some(true);
            next.column_properties.insert(column_id.to_string(), column);
        }
    }
    next
}

/// Ids of visible columns in display order: `(order, id)` ascending, with
/// unordered columns after ordered ones.
pub fn visible_column_ids(render: &RenderProperties) -> Vec<String> {
    let mut columns: Vec<(&String, &ColumnProperty)> = render
        .column_properties
        .iter()
        .filter(|(id, _)| is_column_visible(render, id))
        .collect();
    columns.sort_by(|(a_id, a), (b_id, b)| display_order(a, b).then_with(|| a_id.cmp(b_id)));
    columns.into_iter().map(|(id, _)| id.clone()).collect()
}

fn display_order(a: &ColumnProperty, b: &ColumnProperty) -> Ordering {
    match (a.order, b.order) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
