//! `GET /choices`: the closed value sets accepted by the register.

use axum::Json;
use register_core::choices::{Choice, ChoiceSet, OrganizationType, PostType, SelectionMethod};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Choices {
  pub organization_type: Vec<Choice>,
  pub post_type:         Vec<Choice>,
  pub selection_method:  Vec<Choice>,
}

/// `GET /choices`
pub async fn handler() -> Json<Choices> {
  Json(Choices {
    organization_type: OrganizationType::choices(),
    post_type:         PostType::choices(),
    selection_method:  SelectionMethod::choices(),
  })
}
