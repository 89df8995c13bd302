//! Grid state transitions.
//!
//! One pure function per action kind, each mapping `(&GridState, payload)` to
//! a new `GridState`, plus [`reduce`] to dispatch a tagged [`Action`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::action::{Action, PropsUpdate, SortSelection};
use crate::core::data::{
    add_column_properties_when_none_exist, transform_data, update_data_from_props,
};
use crate::core::merge::deep_merge;
use crate::core::props::{layout_properties, property_patch};
use crate::core::selectors::{has_next, has_previous};
use crate::core::types::{Filter, GridConfig, GridDefaults, GridState, PageProperties, Row};
use crate::core::visibility;

/// Build the initial state from a plain config object.
///
/// Column properties are derived from the first row when none are declared.
/// Config keys the grid does not recognize are kept as layout properties.
pub fn initialize(config: GridConfig, defaults: &GridDefaults) -> GridState {
    let GridConfig {
        data,
        mut render_properties,
        page_properties,
        sort_properties,
        filter,
        show_settings,
        loading,
        extra,
    } = add_column_properties_when_none_exist(config);

    render_properties
        .layout_properties
        .extend(layout_properties(&extra));

    let mut state = GridState {
        render_properties,
        page_properties: page_properties.unwrap_or_else(|| defaults.page_properties()),
        sort_properties,
        filter,
        show_settings: show_settings.unwrap_or(defaults.default_show_settings),
        loading,
        ..GridState::default()
    };

    if let Some(rows) = data.filter(|rows| !rows.is_empty()) {
        let transformed = transform_data(&rows, &state.render_properties);
        state.data = transformed.data;
        state.lookup = transformed.lookup;
    }
    state
}

/// Apply `action` to `state`.
pub fn reduce(state: &GridState, action: &Action) -> GridState {
    debug!(action = action.kind(), "reduce");
    match action {
        Action::LoadedData { data } => loaded_data(state, data),
        Action::SetPageSize { page_size } => set_page_size(state, *page_size),
        Action::SetPage { page_number } => set_page(state, *page_number),
        Action::NextPage => next_page(state),
        Action::PreviousPage => previous_page(state),
        Action::SetFilter { filter } => set_filter(state, filter),
        Action::SetSort { sort_properties } => set_sort(state, sort_properties),
        Action::ToggleSettings => toggle_settings(state),
        Action::ToggleColumn { column_id } => toggle_column(state, column_id),
        Action::UpdateState { update } => update_state(state, update),
    }
}

pub fn loaded_data(state: &GridState, data: &[Row]) -> GridState {
    let transformed = transform_data(data, &state.render_properties);
    GridState {
        data: transformed.data,
        lookup: transformed.lookup,
        loading: false,
        ..state.clone()
    }
}

/// Changing the page size always returns to the first page.
pub fn set_page_size(state: &GridState, page_size: u32) -> GridState {
    with_page(state, |page| {
        page.page_size = page_size;
        page.current_page = 1;
    })
}

pub fn set_page(state: &GridState, page_number: u32) -> GridState {
    with_page(state, |page| page.current_page = page_number)
}

pub fn next_page(state: &GridState) -> GridState {
    if !has_next(state) {
        return state.clone();
    }
    with_page(state, |page| page.current_page += 1)
}

pub fn previous_page(state: &GridState) -> GridState {
    if !has_previous(state) {
        return state.clone();
    }
    with_page(state, |page| page.current_page -= 1)
}

pub fn set_filter(state: &GridState, filter: &Filter) -> GridState {
    GridState {
        filter: filter.clone(),
        ..state.clone()
    }
}

/// Replace the sort list; a single record becomes a one-element list.
pub fn set_sort(state: &GridState, selection: &SortSelection) -> GridState {
    GridState {
        sort_properties: selection.clone().into_vec(),
        ..state.clone()
    }
}

pub fn toggle_settings(state: &GridState) -> GridState {
    GridState {
        show_settings: !state.show_settings,
        ..state.clone()
    }
}

pub fn toggle_column(state: &GridState, column_id: &str) -> GridState {
    GridState {
        render_properties: visibility::toggle_column(&state.render_properties, column_id),
        ..state.clone()
    }
}

/// Fold a host prop change into state.
///
/// `data` is reconciled first. The remaining props become a patch (tracked
/// page/sort props plus the layout bucket) merged deeply into the result.
/// A page size change returns to page 1 unless the patch names a page itself.
pub fn update_state(state: &GridState, update: &PropsUpdate) -> GridState {
    let mut props = update.new_props.clone();
    props.remove("data");

    let updated = update_data_from_props(state, &update.new_props, &update.old_props);
    let previous_size = updated.page_properties.page_size;
    let patch = property_patch(&props);
    let sets_page = patch.pointer("/pageProperties/currentPage").is_some();

    let mut next = merge_into_state(updated, patch);
    if next.page_properties.page_size != previous_size && !sets_page {
        next.page_properties.current_page = 1;
    }
    next
}

/// Deep-merge `patch` into `state`. A patch that leaves the tree unreadable as
/// `GridState` is dropped and `state` returned as-is.
fn merge_into_state(state: GridState, patch: Value) -> GridState {
    let mut tree = match serde_json::to_value(&state) {
        Ok(tree) => tree,
        Err(err) => {
            warn!(error = %err, "grid state is not serializable; skipping prop merge");
            return state;
        }
    };
    deep_merge(&mut tree, patch);
    match serde_json::from_value(tree) {
        Ok(next) => next,
        Err(err) => {
            warn!(error = %err, "merged props do not fit grid state; keeping previous state");
            state
        }
    }
}

fn with_page(state: &GridState, edit: impl FnOnce(&mut PageProperties)) -> GridState {
    let mut next = state.clone();
    edit(&mut next.page_properties);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SortProperty;
    use crate::core::visibility::is_column_visible;
    use crate::test_support::{props, rows, sample_state, sort};
    use serde_json::json;

    #[test]
    fn initialize_derives_columns_and_transforms_data() {
        let config: GridConfig = serde_json::from_value(json!({
            "data": [{ "id": 1 }, { "id": 2 }],
            "renderProperties": {},
        }))
        .expect("config");

        let state = initialize(config, &GridDefaults::default());
        assert_eq!(state.data.len(), 2);
        assert_eq!(state.lookup.len(), 2);
        assert!(state.render_properties.column_properties.contains_key("id"));
        assert!(is_column_visible(&state.render_properties, "id"));
    }

    #[test]
    fn initialize_buckets_unknown_keys_into_layout() {
        let config: GridConfig = serde_json::from_value(json!({
            "plugins": ["local"],
            "title": "People",
            "renderProperties": { "layoutProperties": { "dense": true } },
        }))
        .expect("config");

        let state = initialize(config, &GridDefaults::default());
        assert_eq!(
            Value::Object(state.render_properties.layout_properties),
            json!({ "dense": true, "title": "People" })
        );
    }

    #[test]
    fn initialize_applies_defaults_for_missing_fields() {
        let defaults = GridDefaults {
            default_page_size: 25,
            default_show_settings: true,
        };
        let state = initialize(GridConfig::default(), &defaults);
        assert_eq!(state.page_properties.page_size, 25);
        assert_eq!(state.page_properties.current_page, 1);
        assert!(state.show_settings);
        assert!(state.data.is_empty());
    }

    #[test]
    fn loaded_data_replaces_rows_and_clears_loading() {
        let mut state = sample_state();
        state.loading = true;
        let next = loaded_data(&state, &rows(json!([{ "id": 9 }])));
        assert_eq!(next.data, rows(json!([{ "id": 9 }])));
        assert_eq!(next.lookup.get("0"), Some(&0));
        assert!(!next.loading);
        assert!(state.loading);
    }

    #[test]
    fn set_page_size_resets_current_page() {
        let state = set_page(&sample_state(), 3);
        for size in [1, 5, 50, 1000] {
            let next = set_page_size(&state, size);
            assert_eq!(next.page_properties.page_size, size);
            assert_eq!(next.page_properties.current_page, 1);
        }
        assert_eq!(state.page_properties.current_page, 3);
    }

    #[test]
    fn set_page_sets_current_page_only() {
        let state = sample_state();
        let next = set_page(&state, 2);
        assert_eq!(next.page_properties.current_page, 2);
        assert_eq!(next.page_properties.page_size, state.page_properties.page_size);
    }

    #[test]
    fn next_and_previous_page_stay_in_range() {
        // sample_state holds 5 rows with page size 2: pages 1..=3
        let state = sample_state();
        assert_eq!(previous_page(&state).page_properties.current_page, 1);

        let last = set_page(&state, 3);
        assert_eq!(next_page(&last).page_properties.current_page, 3);

        let middle = next_page(&state);
        assert_eq!(middle.page_properties.current_page, 2);
        assert_eq!(previous_page(&middle).page_properties.current_page, 1);
    }

    #[test]
    fn set_filter_replaces_value_verbatim() {
        let structured = Filter::Structured(props(json!({ "name": { "op": "eq" } })));
        let next = set_filter(&sample_state(), &structured);
        assert_eq!(next.filter, structured);
    }

    #[test]
    fn set_sort_normalizes_single_record() {
        let next = set_sort(
            &sample_state(),
            &SortSelection::Single(sort("name", false)),
        );
        assert_eq!(next.sort_properties, vec![sort("name", false)]);
    }

    #[test]
    fn set_sort_replaces_list_preserving_order() {
        let mut state = sample_state();
        state.sort_properties = vec![sort("age", true)];
        let list: Vec<SortProperty> = vec![sort("name", false), sort("city", true)];
        let next = set_sort(&state, &SortSelection::Many(list.clone()));
        assert_eq!(next.sort_properties, list);
    }

    #[test]
    fn toggle_settings_twice_restores_flag() {
        let state = sample_state();
        let once = toggle_settings(&state);
        assert_ne!(once.show_settings, state.show_settings);
        assert_eq!(toggle_settings(&once).show_settings, state.show_settings);
    }

    #[test]
    fn toggle_column_twice_restores_visibility() {
        let state = sample_state();
        for id in ["name", "age", "unknown"] {
            let twice = toggle_column(&toggle_column(&state, id), id);
            assert_eq!(
                is_column_visible(&twice.render_properties, id),
                is_column_visible(&state.render_properties, id),
                "column {id}"
            );
        }
    }

    #[test]
    fn update_state_merges_tracked_props_and_buckets_the_rest() {
        let state = set_page(&sample_state(), 2);
        let update = PropsUpdate {
            new_props: props(json!({
                "pageProperties": { "pageSize": 50 },
                "customFlag": true,
                "plugins": [],
            })),
            old_props: Default::default(),
        };

        let next = update_state(&state, &update);
        assert_eq!(next.page_properties.page_size, 50);
        assert_eq!(next.page_properties.current_page, 1);
        assert_eq!(
            next.render_properties.layout_properties.get("customFlag"),
            Some(&json!(true))
        );
        assert!(!next.render_properties.layout_properties.contains_key("plugins"));
        assert_eq!(next.data, state.data);
    }

    #[test]
    fn update_state_page_size_change_resets_current_page() {
        let state = set_page(&sample_state(), 3);
        let update = PropsUpdate {
            new_props: props(json!({ "pageProperties": { "pageSize": 50 } })),
            old_props: Default::default(),
        };
        let next = update_state(&state, &update);
        assert_eq!(next.page_properties.page_size, 50);
        assert_eq!(next.page_properties.current_page, 1);
    }

    #[test]
    fn update_state_keeps_page_when_size_is_unchanged_or_page_given() {
        let state = set_page(&sample_state(), 3);
        let same_size = PropsUpdate {
            new_props: props(json!({ "pageProperties": { "pageSize": 2 } })),
            old_props: Default::default(),
        };
        assert_eq!(update_state(&state, &same_size).page_properties.current_page, 3);

        let explicit_page = PropsUpdate {
            new_props: props(json!({ "pageProperties": { "pageSize": 1, "currentPage": 4 } })),
            old_props: Default::default(),
        };
        let next = update_state(&state, &explicit_page);
        assert_eq!(next.page_properties.page_size, 1);
        assert_eq!(next.page_properties.current_page, 4);
    }

    #[test]
    fn update_state_keeps_existing_layout_keys() {
        let mut state = sample_state();
        state
            .render_properties
            .layout_properties
            .insert("dense".to_string(), json!(true));
        let update = PropsUpdate {
            new_props: props(json!({ "title": "People" })),
            old_props: Default::default(),
        };

        let next = update_state(&state, &update);
        assert_eq!(
            Value::Object(next.render_properties.layout_properties),
            json!({ "dense": true, "title": "People" })
        );
    }

    #[test]
    fn update_state_reloads_changed_data() {
        let state = sample_state();
        let update = PropsUpdate {
            new_props: props(json!({ "data": [{ "id": 42 }] })),
            old_props: props(json!({ "data": [] })),
        };

        let next = update_state(&state, &update);
        assert_eq!(next.data, rows(json!([{ "id": 42 }])));
        assert!(!next.render_properties.layout_properties.contains_key("data"));
    }

    #[test]
    fn update_state_ignores_unreadable_patch() {
        let state = sample_state();
        let update = PropsUpdate {
            new_props: props(json!({ "pageProperties": { "pageSize": "lots" } })),
            old_props: Default::default(),
        };
        assert_eq!(update_state(&state, &update), state);
    }

    #[test]
    fn reduce_dispatches_by_action() {
        let state = sample_state();
        let next = reduce(&state, &Action::SetPageSize { page_size: 4 });
        assert_eq!(next.page_properties.page_size, 4);

        let next = reduce(
            &next,
            &Action::ToggleColumn {
                column_id: "name".to_string(),
            },
        );
        assert!(!is_column_visible(&next.render_properties, "name"));
    }
}
