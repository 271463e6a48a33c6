//! Handlers for `/memberships` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/memberships` | See [`ListParams`] |
//! | `POST`   | `/memberships` | Body: [`NewMembership`]; returns 201 |
//! | `GET`    | `/memberships/{id}` | `display` is `"{person} - {organization} ({start})"` |
//! | `PATCH`  | `/memberships/{id}` | e.g. `{"end_date":"2027-06-11"}` to close a tenure |
//! | `DELETE` | `/memberships/{id}` | 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use register_core::{
  choices::{ChoiceSet, SelectionMethod},
  membership::{Membership, MembershipPatch, NewMembership},
  store::{MembershipQuery, RegistryStore},
  validate,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  display::Displayed,
  error::ApiError,
  extract::{Body, Params},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Matches the person's name, the organization's name or the post label.
  pub q:                Option<String>,
  pub person:           Option<Uuid>,
  pub organization:     Option<Uuid>,
  pub post:             Option<Uuid>,
  pub party:            Option<Uuid>,
  pub selection_method: Option<String>,
  pub started_after:    Option<NaiveDate>,
  pub started_before:   Option<NaiveDate>,
  /// `true` for tenures with no end date, `false` for ended ones.
  pub ongoing:          Option<bool>,
  #[serde(default)]
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// `GET /memberships`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Params(params): Params<ListParams>,
) -> Result<Json<Vec<Membership>>, ApiError>
where
  S: RegistryStore,
{
  let selection_method = params
    .selection_method
    .as_deref()
    .map(SelectionMethod::parse_choice)
    .transpose()?;
  validate::date("started_after", params.started_after)?;
  validate::date("started_before", params.started_before)?;
  let memberships = store
    .list_memberships(MembershipQuery {
      text: params.q,
      person_id: params.person,
      organization_id: params.organization,
      post_id: params.post,
      party_id: params.party,
      selection_method,
      started_after: params.started_after,
      started_before: params.started_before,
      ongoing: params.ongoing,
      include_inactive: params.include_inactive,
      limit: params.limit,
      offset: params.offset,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(memberships))
}

/// `POST /memberships`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Body(body): Body<NewMembership>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistryStore,
{
  let membership = store
    .create_membership(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(membership)))
}

/// `GET /memberships/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Displayed<Membership>>, ApiError>
where
  S: RegistryStore,
{
  let view = store
    .membership_view(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("membership {id} not found")))?;
  let display = view.to_string();
  Ok(Json(Displayed::with(view.membership, display)))
}

/// `PATCH /memberships/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Body(patch): Body<MembershipPatch>,
) -> Result<Json<Membership>, ApiError>
where
  S: RegistryStore,
{
  let membership = store
    .update_membership(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(membership))
}

/// `DELETE /memberships/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  store
    .delete_membership(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
