//! Helpers for partial-update inputs.
//!
//! Nullable fields in a patch are `Option<Option<T>>`: an absent key leaves
//! the stored value alone, an explicit `null` clears it. Fields that can
//! never be cleared are `Option<T>` and reject `null` outright.

use serde::{Deserialize, Deserializer, de::Error as _};

/// Use with `#[serde(default, deserialize_with = "crate::patch::nullable")]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Use with `#[serde(default, deserialize_with = "crate::patch::required")]`
/// on fields that cannot be cleared.
pub fn required<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  match Option::<T>::deserialize(deserializer)? {
    Some(value) => Ok(Some(value)),
    None => Err(D::Error::custom("required field cannot be null")),
  }
}

#[cfg(test)]
mod tests {
  use serde::Deserialize;

  #[derive(Debug, Default, Deserialize)]
  struct Patch {
    #[serde(default, deserialize_with = "super::required")]
    name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    note: Option<Option<String>>,
  }

  #[test]
  fn absent_null_and_value() {
    let empty: Patch = serde_json::from_str("{}").unwrap();
    assert_eq!((empty.name, empty.note), (None, None));

    let cleared: Patch = serde_json::from_str(r#"{"note": null}"#).unwrap();
    assert_eq!(cleared.note, Some(None));

    let set: Patch = serde_json::from_str(r#"{"name": "Ada", "note": "x"}"#).unwrap();
    assert_eq!(set.name.as_deref(), Some("Ada"));
    assert_eq!(set.note, Some(Some("x".into())));

    let err = serde_json::from_str::<Patch>(r#"{"name": null}"#).unwrap_err();
    assert!(err.to_string().contains("cannot be null"), "{err}");
  }
}
