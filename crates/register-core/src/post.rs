//! A position that exists within an organization regardless of who holds it,
//! e.g. "Speaker of the House" or "Minister of Finance".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Result,
  choices::PostType,
  record::Record,
  validate::{self, NAME_MAX},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
  #[serde(flatten)]
  pub record:          Record,
  pub label:           String,
  pub role_type:       PostType,
  /// The body where this post exists. Deleting it deletes the post.
  pub organization_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
  pub label:           String,
  #[serde(default)]
  pub role_type:       PostType,
  pub organization_id: Uuid,
}

impl NewPost {
  pub fn new(label: impl Into<String>, organization_id: Uuid) -> Self {
    Self {
      label: label.into(),
      role_type: PostType::default(),
      organization_id,
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub label:           Option<String>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub role_type:       Option<PostType>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub organization_id: Option<Uuid>,
  #[serde(default, deserialize_with = "crate::patch::required")]
  pub is_active:       Option<bool>,
}

impl Post {
  pub fn create(input: NewPost) -> Result<Self> {
    Ok(Self {
      record:          Record::new(),
      label:           validate::required_text("label", input.label, NAME_MAX)?,
      role_type:       input.role_type,
      organization_id: input.organization_id,
    })
  }

  pub fn apply(&mut self, patch: PostPatch) -> Result<()> {
    let label = match patch.label {
      Some(label) => validate::required_text("label", label, NAME_MAX)?,
      None => self.label.clone(),
    };
    self.label = label;
    if let Some(role_type) = patch.role_type {
      self.role_type = role_type;
    }
    if let Some(organization_id) = patch.organization_id {
      self.organization_id = organization_id;
    }
    if let Some(is_active) = patch.is_active {
      self.record.is_active = is_active;
    }
    self.record.touch();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  #[test]
  fn blank_label_is_rejected() {
    assert!(matches!(
      Post::create(NewPost::new("  ", Uuid::new_v4())),
      Err(Error::MissingField("label"))
    ));
  }

  #[test]
  fn failed_apply_changes_nothing() {
    let mut post = Post::create(NewPost::new("Speaker", Uuid::new_v4())).unwrap();
    let before = post.clone();
    let result = post.apply(PostPatch {
      label:     Some(String::new()),
      role_type: Some(PostType::Legislative),
      ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(post, before);
  }
}
