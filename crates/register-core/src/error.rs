//! Error types for `register-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::record::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{entity} not found: {id}")]
  NotFound { entity: EntityKind, id: Uuid },

  #[error("referenced {entity} does not exist: {id}")]
  MissingReference { entity: EntityKind, id: Uuid },

  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("{field} must be at most {max} characters")]
  TooLong { field: &'static str, max: usize },

  #[error("{value:?} is not a valid {field}")]
  InvalidChoice { field: &'static str, value: String },

  #[error("country code must be three ASCII letters, got {0:?}")]
  InvalidCountryCode(String),

  #[error("{later} ({later_date}) is earlier than {earlier} ({earlier_date})")]
  DateOrder {
    earlier:      &'static str,
    earlier_date: NaiveDate,
    later:        &'static str,
    later_date:   NaiveDate,
  },

  #[error("{field} {date} is outside years 1 to 9999")]
  DateOutOfRange { field: &'static str, date: NaiveDate },

  #[error("organization {child} cannot be placed under {parent}: it would become its own ancestor")]
  ParentCycle { child: Uuid, parent: Uuid },

  #[error("organization {0} is inactive")]
  InactiveOrganization(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// Broad category of a failure, used by outer layers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
  /// The write was rejected before anything was persisted.
  Invalid,
  /// The addressed entity does not exist.
  NotFound,
  /// Anything else: storage, decoding, I/O.
  Internal,
}

/// Implemented by every error type a [`crate::store::RegistryStore`] can
/// return.
pub trait Classify {
  fn failure(&self) -> Failure;
}

impl Classify for Error {
  fn failure(&self) -> Failure {
    match self {
      Self::NotFound { .. } => Failure::NotFound,
      _ => Failure::Invalid,
    }
  }
}
