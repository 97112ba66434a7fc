//! Serde helper for model and provider JSON that writes `null` where a value is absent.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as `T::default()`. Pair with `#[serde(default)]` so a
/// missing key defaults as well.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
