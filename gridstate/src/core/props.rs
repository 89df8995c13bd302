//! Host prop classification for state updates.
//!
//! A host passes its whole prop set on every update. A fixed set of keys is
//! recognized: two of them are tracked into grid state, the rest are owned by
//! the host's component layer and ignored. Anything unrecognized is kept as
//! layout configuration.

use serde_json::{Map, Value};

/// Prop keys the grid recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownProp {
    PageProperties,
    SortProperties,
    Plugins,
    Children,
    Events,
    StyleConfig,
    Components,
    RenderProperties,
    SettingsComponentObjects,
}

impl KnownProp {
    pub const ALL: [KnownProp; 9] = [
        KnownProp::PageProperties,
        KnownProp::SortProperties,
        KnownProp::Plugins,
        KnownProp::Children,
        KnownProp::Events,
        KnownProp::StyleConfig,
        KnownProp::Components,
        KnownProp::RenderProperties,
        KnownProp::SettingsComponentObjects,
    ];

    pub fn as_key(self) -> &'static str {
        match self {
            KnownProp::PageProperties => "pageProperties",
            KnownProp::SortProperties => "sortProperties",
            KnownProp::Plugins => "plugins",
            KnownProp::Children => "children",
            KnownProp::Events => "events",
            KnownProp::StyleConfig => "styleConfig",
            KnownProp::Components => "components",
            KnownProp::RenderProperties => "renderProperties",
            KnownProp::SettingsComponentObjects => "settingsComponentObjects",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|prop| prop.as_key() == key)
    }

    /// Props whose new values are copied into grid state on update.
    pub fn is_trackable(self) -> bool {
        matches!(self, KnownProp::PageProperties | KnownProp::SortProperties)
    }
}

/// Every prop whose key is not a [`KnownProp`].
pub fn layout_properties(props: &Map<String, Value>) -> Map<String, Value> {
    props
        .iter()
        .filter(|(key, _)| KnownProp::from_key(key).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Build the patch merged into state for an update.
///
/// `props` must already have `data` removed. Trackable props are included
/// only when truthy; a single sort record is wrapped into a list. The layout
/// bucket is always present, even when empty.
pub fn property_patch(props: &Map<String, Value>) -> Value {
    let mut patch = Map::new();
    for prop in KnownProp::ALL.into_iter().filter(|prop| prop.is_trackable()) {
        let Some(value) = props.get(prop.as_key()) else {
            continue;
        };
        if !is_truthy(value) {
            continue;
        }
        let value = match (prop, value) {
            (KnownProp::SortProperties, Value::Object(_)) => Value::Array(vec![value.clone()]),
            _ => value.clone(),
        };
        patch.insert(prop.as_key().to_string(), value);
    }

    let mut render = Map::new();
    render.insert(
        "layoutProperties".to_string(),
        Value::Object(layout_properties(props)),
    );
    patch.insert("renderProperties".to_string(), Value::Object(render));
    Value::Object(patch)
}

/// Host-style truthiness: `null`, `false`, `0`, and `""` are falsy.
/// Objects and arrays are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
