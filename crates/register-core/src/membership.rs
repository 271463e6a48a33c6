//! The tenure record: a person's membership of an organization, optionally
//! in a specific post and under a party affiliation, over a date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, choices::SelectionMethod, record::Record, validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
  #[serde(flatten)]
  pub record:           Record,
  pub person_id:        Uuid,
  /// The body the person belongs to, e.g. the parliament.
  pub organization_id:  Uuid,
  /// The specific post held, if any.
  pub post_id:          Option<Uuid>,
  /// Party affiliation during this tenure. Kept separate from
  /// `organization_id` so coalition and cross-party memberships can be
  /// expressed.
  pub party_id:         Option<Uuid>,
  pub start_date:       Option<NaiveDate>,
  /// `None` means the tenure is ongoing.
  pub end_date:         Option<NaiveDate>,
  pub selection_method: SelectionMethod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMembership {
  pub person_id:        Uuid,
  pub organization_id:  Uuid,
  pub post_id:          Option<Uuid>,
  pub party_id:         Option<Uuid>,
  pub start_date:       Option<NaiveDate>,
  pub end_date:         Option<NaiveDate>,
  #[serde(default)]
  pub selection_method: SelectionMethod,
}

impl NewMembership {
  pub fn new(person_id: Uuid, organization_id: Uuid) -> Self {
    Self {
      person_id,
      organization_id,
      post_id: None,
      party_id: None,
      start_date: None,
      end_date: None,
      selection_method: SelectionMethod::default(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MembershipPatch {
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub person_id:        Option<Uuid>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub organization_id:  Option<Uuid>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub post_id:          Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub party_id:         Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub start_date:       Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub end_date:         Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub selection_method: Option<SelectionMethod>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub is_active:        Option<bool>,
}

impl Membership {
  /// Validate `input` and build a membership with a fresh record. The store
  /// checks that every referenced entity exists.
  pub fn create(input: NewMembership) -> Result<Self> {
    validate::date("start_date", input.start_date)?;
    validate::date("end_date", input.end_date)?;
    validate::date_order("start_date", input.start_date, "end_date", input.end_date)?;
    Ok(Self {
      record:           Record::new(),
      person_id:        input.person_id,
      organization_id:  input.organization_id,
      post_id:          input.post_id,
      party_id:         input.party_id,
      start_date:       input.start_date,
      end_date:         input.end_date,
      selection_method: input.selection_method,
    })
  }

  pub fn apply(&mut self, patch: MembershipPatch) -> Result<()> {
    let start_date = patch.start_date.unwrap_or(self.start_date);
    let end_date = patch.end_date.unwrap_or(self.end_date);
    validate::date("start_date", start_date)?;
    validate::date("end_date", end_date)?;
    validate::date_order("start_date", start_date, "end_date", end_date)?;

    self.start_date = start_date;
    self.end_date = end_date;
    if let Some(person_id) = patch.person_id {
      self.person_id = person_id;
    }
    if let Some(organization_id) = patch.organization_id {
      self.organization_id = organization_id;
    }
    if let Some(post_id) = patch.post_id {
      self.post_id = post_id;
    }
    if let Some(party_id) = patch.party_id {
      self.party_id = party_id;
    }
    if let Some(selection_method) = patch.selection_method {
      self.selection_method = selection_method;
    }
    if let Some(is_active) = patch.is_active {
      self.record.is_active = is_active;
    }
    self.record.touch();
    Ok(())
  }

  /// Whether the tenure has no recorded end.
  pub fn is_ongoing(&self) -> bool { self.end_date.is_none() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn membership() -> Membership {
    Membership::create(NewMembership {
      start_date: Some(date("2023-05-29")),
      selection_method: SelectionMethod::Elected,
      ..NewMembership::new(Uuid::new_v4(), Uuid::new_v4())
    })
    .unwrap()
  }

  #[test]
  fn end_before_start_is_rejected_on_create() {
    let input = NewMembership {
      start_date: Some(date("2023-05-29")),
      end_date: Some(date("2019-05-29")),
      ..NewMembership::new(Uuid::new_v4(), Uuid::new_v4())
    };
    assert!(matches!(
      Membership::create(input),
      Err(Error::DateOrder { earlier: "start_date", later: "end_date", .. })
    ));
  }

  #[test]
  fn ending_a_tenure() {
    let mut m = membership();
    assert!(m.is_ongoing());
    m.apply(MembershipPatch {
      end_date: Some(Some(date("2027-06-11"))),
      ..Default::default()
    })
    .unwrap();
    assert!(!m.is_ongoing());
    assert_eq!(m.start_date, Some(date("2023-05-29")));
  }

  #[test]
  fn end_before_existing_start_is_rejected_on_apply() {
    let mut m = membership();
    let before = m.clone();
    let result = m.apply(MembershipPatch {
      end_date: Some(Some(date("2020-01-01"))),
      selection_method: Some(SelectionMethod::Appointed),
      ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(m, before);
  }

  #[test]
  fn clearing_start_date_allows_any_end() {
    let mut m = membership();
    m.apply(MembershipPatch {
      start_date: Some(None),
      end_date: Some(Some(date("2000-01-01"))),
      ..Default::default()
    })
    .unwrap();
    assert_eq!(m.start_date, None);
  }
}
