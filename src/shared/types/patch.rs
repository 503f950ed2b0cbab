//! Helpers for partial-update bodies

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field so that an absent key and an explicit
/// `null` can be told apart. Use with `#[serde(default)]`:
/// absent => `None`, `null` => `Some(None)`, value => `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
