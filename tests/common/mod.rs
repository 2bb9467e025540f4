//! Shared test utilities for building fixtures by hand.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use lookup_benchmarks::fixtures::MoviesMap;
use lookup_benchmarks::Value;

// =============================================================================
// Dataset root path
// =============================================================================

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Parse `data/movies.json` into a dynamic value.
pub fn load_movies_dataset() -> Value {
    let path = data_dir().join("movies.json");
    let content = std::fs::read_to_string(&path).expect("failed to read movies.json");
    serde_json::from_str(&content).expect("failed to parse movies.json")
}

// =============================================================================
// Hand-built fixtures
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Value {
    let map: HashMap<String, Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Value::Map(map)
}

/// `MediaTypes -> Movies -> Die Hard 2 -> <metadata>` with the given leaf map.
pub fn dynamic_with_metadata(metadata: Value) -> Value {
    obj(&[(
        "MediaTypes",
        obj(&[("Movies", obj(&[("Die Hard 2", metadata)]))]),
    )])
}

/// Typed tree holding a single movie with the given fields.
pub fn typed_with_fields(title: &str, fields: &[(&str, &str)]) -> MoviesMap {
    let fields: HashMap<String, String> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    HashMap::from([(
        "MediaTypes".to_string(),
        HashMap::from([(
            "Movies".to_string(),
            HashMap::from([(title.to_string(), fields)]),
        )]),
    )])
}
