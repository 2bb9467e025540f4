//! Lookup strategies under measurement.
//!
//! Every traversal accessor returns the tagline at
//! `MediaTypes.Movies."Die Hard 2".TagLine`. A miss means the fixture or the
//! accessor is broken, so accessors panic instead of returning `Option`.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fixtures::{
    MoviesMap, NestedFixtures, MEDIA_TYPES_KEY, MOVIES_KEY, TAGLINE_KEY, TARGET_KEY_PATH,
    TARGET_MOVIE,
};
use crate::value::Value;

#[cold]
#[track_caller]
fn value_not_fetched(accessor: &str) -> ! {
    panic!("value not fetched: {}", accessor)
}

// ---------------------------------------------------------------------------
// Nested traversal
// ---------------------------------------------------------------------------

/// Match on `Value::Map` at every level, staying in the dynamic representation.
pub fn fetch_dynamic_if_let(root: &Value) -> &str {
    if let Some(Value::Map(media_types)) = root.get(MEDIA_TYPES_KEY) {
        if let Some(Value::Map(movies)) = media_types.get(MOVIES_KEY) {
            if let Some(Value::Map(metadata)) = movies.get(TARGET_MOVIE) {
                if let Some(Value::String(tagline)) = metadata.get(TAGLINE_KEY) {
                    return tagline;
                }
            }
        }
    }
    value_not_fetched("dynamic if-let")
}

/// Convert every intermediate level to a typed map view before descending.
pub fn fetch_dynamic_bridged_if_let(root: &Value) -> &str {
    let Some(root) = root.to_typed_map() else {
        value_not_fetched("bridged if-let")
    };
    let Some(media_types) = root.get(MEDIA_TYPES_KEY).copied().and_then(Value::to_typed_map) else {
        value_not_fetched("bridged if-let")
    };
    let Some(movies) = media_types.get(MOVIES_KEY).copied().and_then(Value::to_typed_map) else {
        value_not_fetched("bridged if-let")
    };
    let Some(metadata) = movies.get(TARGET_MOVIE).copied().and_then(Value::to_typed_map) else {
        value_not_fetched("bridged if-let")
    };
    match metadata.get(TAGLINE_KEY).copied().and_then(Value::as_str) {
        Some(tagline) => tagline,
        None => value_not_fetched("bridged if-let"),
    }
}

/// Plain typed lookups; no variant checks anywhere.
pub fn fetch_static_if_let(root: &MoviesMap) -> &str {
    let Some(media_types) = root.get(MEDIA_TYPES_KEY) else {
        value_not_fetched("static if-let")
    };
    let Some(movies) = media_types.get(MOVIES_KEY) else {
        value_not_fetched("static if-let")
    };
    let Some(metadata) = movies.get(TARGET_MOVIE) else {
        value_not_fetched("static if-let")
    };
    let Some(tagline) = metadata.get(TAGLINE_KEY) else {
        value_not_fetched("static if-let")
    };
    tagline
}

pub fn fetch_dynamic_optional_chain(root: &Value) -> &str {
    root.as_map()
        .and_then(|m| m.get(MEDIA_TYPES_KEY))
        .and_then(Value::as_map)
        .and_then(|m| m.get(MOVIES_KEY))
        .and_then(Value::as_map)
        .and_then(|m| m.get(TARGET_MOVIE))
        .and_then(Value::as_map)
        .and_then(|m| m.get(TAGLINE_KEY))
        .and_then(Value::as_str)
        .unwrap_or_else(|| value_not_fetched("dynamic optional chain"))
}

pub fn fetch_static_optional_chain(root: &MoviesMap) -> &str {
    root.get(MEDIA_TYPES_KEY)
        .and_then(|m| m.get(MOVIES_KEY))
        .and_then(|m| m.get(TARGET_MOVIE))
        .and_then(|m| m.get(TAGLINE_KEY))
        .map(String::as_str)
        .unwrap_or_else(|| value_not_fetched("static optional chain"))
}

pub fn fetch_dynamic_key_path(root: &Value) -> &str {
    root.value_for_key_path(TARGET_KEY_PATH)
        .and_then(Value::as_str)
        .unwrap_or_else(|| value_not_fetched("key path"))
}

// ---------------------------------------------------------------------------
// Shallow lookups
// ---------------------------------------------------------------------------

/// Single top-level lookup on a dynamic map.
pub fn shallow_fetch_dynamic<'a>(root: &'a Value, key: &str) -> &'a Value {
    root.get(key)
        .unwrap_or_else(|| value_not_fetched("shallow dynamic"))
}

/// Single top-level lookup on a typed map.
pub fn shallow_fetch_static<'a, V>(root: &'a HashMap<String, V>, key: &str) -> &'a V {
    root.get(key)
        .unwrap_or_else(|| value_not_fetched("shallow static"))
}

/// Markers looked up at the start, middle and end of a shallow fixture.
pub const TARGET_MARKERS: [&str; 3] = ["Test1", "Test2", "Test3"];

/// Looks up each of [`TARGET_MARKERS`] independently and returns the last.
pub fn fetch_markers_dynamic(root: &Value) -> &str {
    let mut last = None;
    for marker in TARGET_MARKERS {
        last = shallow_fetch_dynamic(root, marker).as_str();
    }
    last.unwrap_or_else(|| value_not_fetched("dynamic markers"))
}

pub fn fetch_markers_static(root: &HashMap<String, String>) -> &str {
    let mut last = None;
    for marker in TARGET_MARKERS {
        last = Some(shallow_fetch_static(root, marker).as_str());
    }
    last.unwrap_or_else(|| value_not_fetched("static markers"))
}

// ---------------------------------------------------------------------------
// Accessor table
// ---------------------------------------------------------------------------

/// The six nested traversal strategies, in the order the suite times them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accessor {
    DynamicIfLet,
    DynamicBridgedIfLet,
    DynamicOptionalChain,
    StaticIfLet,
    StaticOptionalChain,
    DynamicKeyPath,
}

impl Accessor {
    pub const COUNT: usize = 6;

    pub const ALL: [Accessor; Self::COUNT] = [
        Self::DynamicIfLet,
        Self::DynamicBridgedIfLet,
        Self::DynamicOptionalChain,
        Self::StaticIfLet,
        Self::StaticOptionalChain,
        Self::DynamicKeyPath,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DynamicIfLet => "dynamic-if-let",
            Self::DynamicBridgedIfLet => "dynamic-bridged-if-let",
            Self::DynamicOptionalChain => "dynamic-optional-chain",
            Self::StaticIfLet => "static-if-let",
            Self::StaticOptionalChain => "static-optional-chain",
            Self::DynamicKeyPath => "dynamic-key-path",
        }
    }

    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DynamicIfLet => "Dynamic if/let",
            Self::DynamicBridgedIfLet => "Dynamic bridged to typed map if/let",
            Self::DynamicOptionalChain => "Dynamic optional chain",
            Self::StaticIfLet => "Static if/let",
            Self::StaticOptionalChain => "Static optional chain",
            Self::DynamicKeyPath => "Dynamic key path",
        }
    }

    pub fn fetch<'a>(&self, fixtures: &'a NestedFixtures) -> &'a str {
        match self {
            Self::DynamicIfLet => fetch_dynamic_if_let(&fixtures.dynamic),
            Self::DynamicBridgedIfLet => fetch_dynamic_bridged_if_let(&fixtures.dynamic),
            Self::DynamicOptionalChain => fetch_dynamic_optional_chain(&fixtures.dynamic),
            Self::StaticIfLet => fetch_static_if_let(&fixtures.typed),
            Self::StaticOptionalChain => fetch_static_optional_chain(&fixtures.typed),
            Self::DynamicKeyPath => fetch_dynamic_key_path(&fixtures.dynamic),
        }
    }
}

impl FromStr for Accessor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown accessor '{}'", s))
    }
}
