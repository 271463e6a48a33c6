//! Single-entity responses: the entity plus its display string.

use std::fmt;

use serde::Serialize;

/// Serializes as the entity's own fields with an extra `display` key.
#[derive(Debug, Serialize)]
pub struct Displayed<T> {
  #[serde(flatten)]
  pub entity:  T,
  pub display: String,
}

impl<T: fmt::Display> Displayed<T> {
  pub fn new(entity: T) -> Self {
    let display = entity.to_string();
    Self { entity, display }
  }
}

impl<T> Displayed<T> {
  /// Pair `entity` with a display string computed elsewhere, e.g. from a
  /// joined view.
  pub fn with(entity: T, display: impl fmt::Display) -> Self {
    Self { entity, display: display.to_string() }
  }
}
