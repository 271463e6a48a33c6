//! A body with a common purpose: a legislature, a party, a ministry, a
//! committee. Organizations form a forest through the optional `parent_id`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  choices::{ChoiceSet, OrganizationType},
  record::Record,
  validate::{self, NAME_MAX},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
  #[serde(flatten)]
  pub record:         Record,
  pub name:           String,
  pub classification: OrganizationType,
  /// The organization that contains this one, e.g. the parliament a
  /// committee sits in. Set to `None` when the parent is deleted.
  pub parent_id:      Option<Uuid>,
  /// ISO 3166-1 alpha-3, upper case.
  pub country_code:   String,
}

/// Input to [`crate::store::RegistryStore::create_organization`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrganization {
  pub name:           String,
  #[serde(default)]
  pub classification: OrganizationType,
  pub parent_id:      Option<Uuid>,
  pub country_code:   String,
}

impl NewOrganization {
  pub fn new(name: impl Into<String>, country_code: impl Into<String>) -> Self {
    Self {
      name:           name.into(),
      classification: OrganizationType::default(),
      parent_id:      None,
      country_code:   country_code.into(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationPatch {
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub name:           Option<String>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub classification: Option<OrganizationType>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub parent_id:      Option<Option<Uuid>>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub country_code:   Option<String>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub is_active:      Option<bool>,
}

impl Organization {
  /// Validate `input` and build an organization with a fresh record.
  ///
  /// Only field-level rules are checked here; the store verifies that the
  /// parent exists.
  pub fn create(input: NewOrganization) -> Result<Self> {
    let mut org = Self {
      record:         Record::new(),
      name:           input.name,
      classification: input.classification,
      parent_id:      input.parent_id,
      country_code:   input.country_code,
    };
    org.normalize()?;
    Ok(org)
  }

  /// Apply `patch`, validating the merged result. Rejects self-parenting;
  /// deeper cycles need the stored hierarchy and are checked by the store
  /// with [`crate::hierarchy::would_create_cycle`].
  pub fn apply(&mut self, patch: OrganizationPatch) -> Result<()> {
    let mut next = self.clone();
    if let Some(name) = patch.name {
      next.name = name;
    }
    if let Some(classification) = patch.classification {
      next.classification = classification;
    }
    if let Some(parent_id) = patch.parent_id {
      next.parent_id = parent_id;
    }
    if let Some(country_code) = patch.country_code {
      next.country_code = country_code;
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
    self.country_code = validate::country_code(std::mem::take(&mut self.country_code))?;
    if self.parent_id == Some(self.record.id) {
      return Err(Error::ParentCycle { child: self.record.id, parent: self.record.id });
    }
    Ok(())
  }
}

impl fmt::Display for Organization {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.classification.label())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_unknown_classification() {
    let org = Organization::create(NewOrganization::new("National Assembly", "NGA"))
      .unwrap();
    assert_eq!(org.classification, OrganizationType::Unknown);
    assert_eq!(org.parent_id, None);
    assert_eq!(org.to_string(), "National Assembly (Unknown)");
  }

  #[test]
  fn display_uses_classification_label() {
    let org = Organization::create(NewOrganization {
      classification: OrganizationType::Party,
      ..NewOrganization::new("Labour Party", "NGA")
    })
    .unwrap();
    assert_eq!(org.to_string(), "Labour Party (Political Party)");
  }

  #[test]
  fn country_code_is_normalised() {
    let org = Organization::create(NewOrganization::new("Senate", " zaf ")).unwrap();
    assert_eq!(org.country_code, "ZAF");
  }

  #[test]
  fn self_parent_is_rejected() {
    let mut org = Organization::create(NewOrganization::new("Senate", "KEN")).unwrap();
    let id = org.record.id;
    let err = org
      .apply(OrganizationPatch { parent_id: Some(Some(id)), ..Default::default() })
      .unwrap_err();
    assert!(matches!(err, Error::ParentCycle { child, parent } if child == id && parent == id));
    assert_eq!(org.parent_id, None);
  }

  #[test]
  fn new_organization_deserialises_with_default_classification() {
    let input: NewOrganization =
      serde_json::from_str(r#"{"name": "Senate", "country_code": "NGA"}"#).unwrap();
    assert_eq!(input.classification, OrganizationType::Unknown);
    assert!(
      serde_json::from_str::<NewOrganization>(
        r#"{"name": "Senate", "country_code": "NGA", "classification": "senate"}"#
      )
      .is_err()
    );
  }

  #[test]
  fn patch_rejects_null_for_fields_that_cannot_be_cleared() {
    for body in [
      r#"{"name": null}"#,
      r#"{"classification": null}"#,
      r#"{"country_code": null}"#,
    ] {
      assert!(serde_json::from_str::<OrganizationPatch>(body).is_err(), "{body}");
    }
    let detach: OrganizationPatch = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
    assert_eq!(detach.parent_id, Some(None));
    assert_eq!(detach.classification, None);
  }
}
