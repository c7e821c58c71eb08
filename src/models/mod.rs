pub mod actions;
pub mod comparison;
pub mod geo;
pub mod research;

pub use actions::*;
pub use comparison::*;
pub use geo::*;
pub use research::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, treating an explicit `null` like a missing key.
///
/// Pair with `#[serde(default)]` so both cases yield `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a JSON object into string cells.
///
/// Numbers and booleans are kept as their JSON text, `null` cells are
/// dropped so they render as missing.
pub(crate) fn deserialize_cells<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}
