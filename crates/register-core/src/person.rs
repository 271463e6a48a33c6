//! A human who holds or has held a public office.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  record::Record,
  validate::{self, GENDER_MAX, NAME_MAX, SUMMARY_MAX},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  #[serde(flatten)]
  pub record:     Record,
  /// The primary name the person is known by.
  pub name:       String,
  pub biography:  Option<String>,
  pub birth_date: Option<NaiveDate>,
  /// Never earlier than `birth_date`.
  pub death_date: Option<NaiveDate>,
  /// Free-text category.
  pub gender:     Option<String>,
  /// One-line summary.
  pub summary:    Option<String>,
}

/// Input to [`crate::store::RegistryStore::create_person`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPerson {
  pub name:       String,
  pub biography:  Option<String>,
  pub birth_date: Option<NaiveDate>,
  pub death_date: Option<NaiveDate>,
  pub gender:     Option<String>,
  pub summary:    Option<String>,
}

impl NewPerson {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPatch {
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub name:       Option<String>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub biography:  Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub birth_date: Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub death_date: Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub gender:     Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub summary:    Option<Option<String>>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub is_active:  Option<bool>,
}

impl Person {
  /// Validate `input` and build a person with a fresh record.
  pub fn create(input: NewPerson) -> Result<Self> {
    let mut person = Self {
      record:     Record::new(),
      name:       input.name,
      biography:  input.biography,
      birth_date: input.birth_date,
      death_date: input.death_date,
      gender:     input.gender,
      summary:    input.summary,
    };
    person.normalize()?;
    Ok(person)
  }

  /// Apply `patch`, validating the merged result. On error `self` is left
  /// unchanged.
  pub fn apply(&mut self, patch: PersonPatch) -> Result<()> {
    let mut next = self.clone();
    if let Some(name) = patch.name {
      next.name = name;
    }
    if let Some(biography) = patch.biography {
      next.biography = biography;
    }
    if let Some(birth_date) = patch.birth_date {
      next.birth_date = birth_date;
    }
    if let Some(death_date) = patch.death_date {
      next.death_date = death_date;
    }
    if let Some(gender) = patch.gender {
      next.gender = gender;
    }
    if let Some(summary) = patch.summary {
      next.summary = summary;
    }
    if let Some(is_active) = patch.is_active {
      next.record.is_active = is_active;
    }
    next.normalize()?;
    next.record.touch();
    *self = next;
    Ok(())
  }

  fn normalize(&mut self) -> Result<()> {
    self.name = validate::required_text("name", std::mem::take(&mut self.name), NAME_MAX)?;
    self.biography = validate::optional_text("biography", self.biography.take(), None)?;
    self.gender = validate::optional_text("gender", self.gender.take(), Some(GENDER_MAX))?;
    self.summary =
      validate::optional_text("summary", self.summary.take(), Some(SUMMARY_MAX))?;
    validate::date("birth_date", self.birth_date)?;
    validate::date("death_date", self.death_date)?;
    validate::date_order("birth_date", self.birth_date, "death_date", self.death_date)
  }
}

impl fmt::Display for Person {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn create_with_name_only() {
    let p = Person::create(NewPerson::new("John Doe")).unwrap();
    assert_eq!(p.name, "John Doe");
    assert_eq!(p.to_string(), "John Doe");
    assert!(p.biography.is_none());
    assert!(p.record.is_active);
  }

  #[test]
  fn death_before_birth_is_rejected() {
    let input = NewPerson {
      birth_date: Some(date("1980-01-01")),
      death_date: Some(date("1979-12-31")),
      ..NewPerson::new("John Doe")
    };
    assert!(matches!(
      Person::create(input),
      Err(Error::DateOrder { earlier: "birth_date", later: "death_date", .. })
    ));
  }

  #[test]
  fn apply_touches_and_keeps_identity() {
    let mut p = Person::create(NewPerson::new("John Doe")).unwrap();
    let before = p.record.clone();
    p.apply(PersonPatch { gender: Some(Some("Male".into())), ..Default::default() })
      .unwrap();
    assert_eq!(p.gender.as_deref(), Some("Male"));
    assert_eq!(p.record.id, before.id);
    assert_eq!(p.record.created_at, before.created_at);
    assert!(p.record.updated_at > before.updated_at);
  }

  #[test]
  fn failed_apply_leaves_person_unchanged() {
    let mut p = Person::create(NewPerson {
      birth_date: Some(date("1980-01-01")),
      ..NewPerson::new("John Doe")
    })
    .unwrap();
    let before = p.clone();
    let result = p.apply(PersonPatch {
      name:       Some("Jane".into()),
      death_date: Some(Some(date("1970-01-01"))),
      ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(p, before);
  }

  #[test]
  fn patch_distinguishes_null_from_absent() {
    let patch: PersonPatch =
      serde_json::from_str(r#"{"biography": null}"#).unwrap();
    assert_eq!(patch.biography, Some(None));
    assert_eq!(patch.gender, None);

    let mut p = Person::create(NewPerson {
      biography: Some("Long career".into()),
      gender:    Some("Female".into()),
      ..NewPerson::new("Ada")
    })
    .unwrap();
    p.apply(patch).unwrap();
    assert!(p.biography.is_none());
    assert_eq!(p.gender.as_deref(), Some("Female"));
  }
}
