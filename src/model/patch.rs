//! Serde helper for patch fields: absent, explicit `null`, or a value.

use serde::{Deserialize, Deserializer};

/// Use with `#[serde(default, deserialize_with = "patch::field")]`.
/// A missing key stays `None`; `null` becomes `Some(None)`.
pub fn field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `target` when the patch carries the key.
pub fn apply<T: Clone>(target: &mut Option<T>, patch: &Option<Option<T>>) {
    if let Some(value) = patch {
        *target = value.clone();
    }
}
