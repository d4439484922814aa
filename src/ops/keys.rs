//! Key-level transforms over dependency mappings.
//!
//! A dependency mapping is a JSON object from package name to version
//! specifier. These functions never touch values and never mutate their
//! input; each builds a fresh map in one pass.

use crate::plugins::PluginMap;
use serde_json::{Map, Value};

/// Replaces every key found in `table` with its new name.
///
/// Keys not in the table are kept as-is. If two keys rename to the same
/// target, the later one (in iteration order) overwrites the earlier value
/// while the entry keeps the position of the first; see
/// [`rename_collisions`] to detect this beforehand.
pub fn rename_keys(map: &Map<String, Value>, table: &PluginMap) -> Map<String, Value> {
    let mut renamed = Map::with_capacity(map.len());
    for (key, value) in map {
        let new_key = table.get(key.as_str()).copied().unwrap_or(key.as_str());
        renamed.insert(new_key.to_string(), value.clone());
    }
    renamed
}

/// Returns `(source, target)` pairs where `source` renames onto a target
/// name that another key of `map` already occupies or renames to.
pub fn rename_collisions(map: &Map<String, Value>, table: &PluginMap) -> Vec<(String, String)> {
    let mut seen: Map<String, Value> = Map::with_capacity(map.len());
    let mut collisions = Vec::new();

    for key in map.keys() {
        let target = table.get(key.as_str()).copied().unwrap_or(key.as_str());
        if seen.contains_key(target) {
            collisions.push((key.clone(), target.to_string()));
        } else {
            seen.insert(target.to_string(), Value::Null);
        }
    }

    collisions
}

/// Returns a copy of `map` with keys in ascending order.
pub fn sort_keys(map: &Map<String, Value>) -> Map<String, Value> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Keys of `a`, in `a`'s order, that are missing or falsy in `b`.
///
/// `keys_diff(old, new)` lists the names renamed away; `keys_diff(new, old)`
/// lists the names that appeared.
pub fn keys_diff(a: &Map<String, Value>, b: &Map<String, Value>) -> Vec<String> {
    a.keys()
        .filter(|key| !b.get(*key).is_some_and(is_truthy))
        .cloned()
        .collect()
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
