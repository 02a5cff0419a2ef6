use serde::{Deserialize, Deserializer};

/// Reads JSON `null` the same as a missing key.
///
/// Use alongside `#[serde(default)]`, which only covers the missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
