//! Closed choice sets for the enumerated fields of the register.
//!
//! Each set has a stored value (snake_case, used in the database and on the
//! wire) and a human-readable label. Values outside the set are rejected at
//! parse and deserialisation time.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{Error, Result};

/// A `(value, label)` pair as exposed to listing and admin clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choice {
  pub value: &'static str,
  pub label: &'static str,
}

/// Behaviour shared by the enumerated field types.
pub trait ChoiceSet:
  Copy + Into<&'static str> + FromStr + IntoEnumIterator + 'static
{
  /// Field name used in validation errors.
  const FIELD: &'static str;

  fn label(self) -> &'static str;

  fn value(self) -> &'static str { self.into() }

  /// Parse a stored value, rejecting anything outside the set.
  fn parse_choice(value: &str) -> Result<Self> {
    value.parse().map_err(|_| Error::InvalidChoice {
      field: Self::FIELD,
      value: value.to_owned(),
    })
  }

  fn choices() -> Vec<Choice> {
    Self::iter()
      .map(|c| Choice { value: c.value(), label: c.label() })
      .collect()
  }
}

// ─── Organization classification ─────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrganizationType {
  Legislature,
  Executive,
  Judiciary,
  Party,
  Ministry,
  Committee,
  #[default]
  Unknown,
}

impl ChoiceSet for OrganizationType {
  const FIELD: &'static str = "classification";

  fn label(self) -> &'static str {
    match self {
      Self::Legislature => "Legislature",
      Self::Executive => "Executive Body",
      Self::Judiciary => "Judiciary",
      Self::Party => "Political Party",
      Self::Ministry => "Ministry",
      Self::Committee => "Committee",
      Self::Unknown => "Unknown",
    }
  }
}

// ─── Post role type ──────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PostType {
  Legislative,
  Executive,
  Judicial,
  LocalGovernment,
  TraditionalAuthority,
  #[default]
  Unknown,
}

impl ChoiceSet for PostType {
  const FIELD: &'static str = "role_type";

  fn label(self) -> &'static str {
    match self {
      Self::Legislative => "Legislative",
      Self::Executive => "Executive",
      Self::Judicial => "Judicial",
      Self::LocalGovernment => "Local Government",
      Self::TraditionalAuthority => "Traditional Authority",
      Self::Unknown => "Unknown",
    }
  }
}

// ─── Membership selection method ─────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::EnumString,
  strum::IntoStaticStr,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SelectionMethod {
  Elected,
  Appointed,
  ExOfficio,
  Hereditary,
  #[default]
  Unknown,
}

impl ChoiceSet for SelectionMethod {
  const FIELD: &'static str = "selection_method";

  fn label(self) -> &'static str {
    match self {
      Self::Elected => "Elected",
      Self::Appointed => "Appointed",
      Self::ExOfficio => "Ex Officio",
      Self::Hereditary => "Hereditary",
      Self::Unknown => "Unknown",
    }
  }
}

macro_rules! display_label {
  ($($ty:ty),*) => {
    $(
      impl fmt::Display for $ty {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
          f.write_str(self.label())
        }
      }
    )*
  };
}

display_label!(OrganizationType, PostType, SelectionMethod);

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_unknown() {
    assert_eq!(OrganizationType::default(), OrganizationType::Unknown);
    assert_eq!(PostType::default(), PostType::Unknown);
    assert_eq!(SelectionMethod::default(), SelectionMethod::Unknown);
  }

  #[test]
  fn stored_values_are_snake_case() {
    assert_eq!(PostType::LocalGovernment.value(), "local_government");
    assert_eq!(PostType::TraditionalAuthority.value(), "traditional_authority");
    assert_eq!(SelectionMethod::ExOfficio.value(), "ex_officio");
    assert_eq!(
      serde_json::to_value(SelectionMethod::ExOfficio).unwrap(),
      serde_json::json!("ex_officio")
    );
  }

  #[test]
  fn labels_differ_between_sets() {
    assert_eq!(OrganizationType::Executive.label(), "Executive Body");
    assert_eq!(PostType::Executive.label(), "Executive");
    assert_eq!(OrganizationType::Party.to_string(), "Political Party");
  }

  #[test]
  fn parse_rejects_values_outside_the_set() {
    assert_eq!(
      OrganizationType::parse_choice("committee").unwrap(),
      OrganizationType::Committee
    );
    let err = OrganizationType::parse_choice("senate").unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidChoice { field: "classification", ref value } if value == "senate"
    ));
    assert!(serde_json::from_str::<PostType>("\"mayor\"").is_err());
  }

  #[test]
  fn choices_cover_every_variant_in_order() {
    let values: Vec<_> =
      SelectionMethod::choices().into_iter().map(|c| c.value).collect();
    assert_eq!(values, [
      "elected",
      "appointed",
      "ex_officio",
      "hereditary",
      "unknown"
    ]);
    assert_eq!(OrganizationType::choices().len(), 7);
    assert_eq!(PostType::choices().len(), 6);
  }
}
