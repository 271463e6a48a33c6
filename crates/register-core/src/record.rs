//! The base record shared by every entity in the register.
//!
//! Identity and timestamps are assigned explicitly here rather than by the
//! storage layer: [`Record::new`] fixes the external id and creation time
//! once, and [`Record::touch`] is the only way the modification time moves.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which table an id belongs to. Used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  Person,
  Organization,
  Post,
  Membership,
}

/// Identity, timestamps and the soft-delete flag carried by every entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  /// Surrogate key assigned by the store on insert; `0` until persisted.
  /// Internal only, never serialised.
  #[serde(skip)]
  pub pkid:       i64,
  /// Random external identifier, used for every reference between records.
  pub id:         Uuid,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Soft-delete flag. Does not affect referential actions.
  pub is_active:  bool,
}

impl Record {
  pub fn new() -> Self {
    let now = Utc::now();
    Self {
      pkid:       0,
      id:         Uuid::new_v4(),
      created_at: now,
      updated_at: now,
      is_active:  true,
    }
  }

  /// Mark the record as modified.
  ///
  /// `updated_at` always advances strictly, even when the wall clock has not
  /// moved (or moved backwards) since the previous mutation.
  pub fn touch(&mut self) {
    let now = Utc::now();
    self.updated_at = if now > self.updated_at {
      now
    } else {
      self.updated_at + TimeDelta::nanoseconds(1)
    };
  }
}

impl Default for Record {
  fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_record_is_active_with_equal_timestamps() {
    let r = Record::new();
    assert!(r.is_active);
    assert_eq!(r.pkid, 0);
    assert_eq!(r.created_at, r.updated_at);
  }

  #[test]
  fn touch_strictly_advances() {
    let mut r = Record::new();
    let mut last = r.updated_at;
    for _ in 0..100 {
      r.touch();
      assert!(r.updated_at > last);
      last = r.updated_at;
    }
    assert!(r.created_at < r.updated_at);
  }

  #[test]
  fn touch_advances_past_a_future_timestamp() {
    let mut r = Record::new();
    let future = Utc::now() + TimeDelta::hours(1);
    r.updated_at = future;
    r.touch();
    assert_eq!(r.updated_at, future + TimeDelta::nanoseconds(1));
  }

  #[test]
  fn pkid_is_not_serialised() {
    let mut r = Record::new();
    r.pkid = 42;
    let json = serde_json::to_value(&r).unwrap();
    assert!(json.get("pkid").is_none());
    assert_eq!(json["id"], serde_json::json!(r.id));
  }
}
