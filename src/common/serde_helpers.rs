// src/common/serde_helpers.rs

use serde::{Deserialize, Deserializer};

/// Distingue "campo ausente" de "campo = null" nos PATCH/PUT parciais.
///
/// Use com `#[serde(default, deserialize_with = "nullable")]` num
/// `Option<Option<T>>`:
/// - ausente -> `None` (mantém o valor atual)
/// - `null` -> `Some(None)` (limpa a coluna)
/// - valor -> `Some(Some(v))`
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
