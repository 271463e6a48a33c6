//! Handlers for `/organizations` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/organizations` | Optional `q`, `classification`, `country_code`, `parent` |
//! | `POST`   | `/organizations` | Body: [`NewOrganization`]; returns 201 |
//! | `GET`    | `/organizations/{id}` | Adds `display` |
//! | `PATCH`  | `/organizations/{id}` | 400 if the new parent would form a cycle |
//! | `DELETE` | `/organizations/{id}` | 204 |
//! | `GET`    | `/organizations/{id}/children` | Active direct children |
//! | `GET`    | `/organizations/{id}/posts` | Active posts |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use register_core::{
  choices::{ChoiceSet, OrganizationType},
  organization::{NewOrganization, Organization, OrganizationPatch},
  post::Post,
  store::{OrganizationQuery, RegistryStore},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  display::Displayed,
  error::ApiError,
  extract::{Body, Params},
};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub q:                Option<String>,
  /// Stored value, e.g. `legislature`.
  pub classification:   Option<String>,
  pub country_code:     Option<String>,
  pub parent:           Option<Uuid>,
  #[serde(default)]
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// `GET /organizations[?q=...][&classification=...][&country_code=...][&parent=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Params(params): Params<ListParams>,
) -> Result<Json<Vec<Organization>>, ApiError>
where
  S: RegistryStore,
{
  let classification = params
    .classification
    .as_deref()
    .map(OrganizationType::parse_choice)
    .transpose()?;
  let organizations = store
    .list_organizations(OrganizationQuery {
      name: params.q,
      classification,
      country_code: params.country_code,
      parent_id: params.parent,
      include_inactive: params.include_inactive,
      limit: params.limit,
      offset: params.offset,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(organizations))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /organizations`: body: `{"name":"...","country_code":"NGA"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Body(body): Body<NewOrganization>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistryStore,
{
  let organization = store
    .create_organization(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(organization)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

async fn require<S: RegistryStore>(store: &S, id: Uuid) -> Result<Organization, ApiError> {
  store
    .get_organization(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("organization {id} not found")))
}

/// `GET /organizations/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Displayed<Organization>>, ApiError>
where
  S: RegistryStore,
{
  let organization = require(store.as_ref(), id).await?;
  Ok(Json(Displayed::new(organization)))
}

// ─── Update / delete ──────────────────────────────────────────────────────────

/// `PATCH /organizations/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Body(patch): Body<OrganizationPatch>,
) -> Result<Json<Organization>, ApiError>
where
  S: RegistryStore,
{
  let organization = store
    .update_organization(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(organization))
}

/// `DELETE /organizations/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  store
    .delete_organization(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Related ──────────────────────────────────────────────────────────────────

/// `GET /organizations/{id}/children`
pub async fn children<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Organization>>, ApiError>
where
  S: RegistryStore,
{
  require(store.as_ref(), id).await?;
  let children = store.children_of(id).await.map_err(ApiError::from_store)?;
  Ok(Json(children))
}

/// `GET /organizations/{id}/posts`
pub async fn posts<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Post>>, ApiError>
where
  S: RegistryStore,
{
  require(store.as_ref(), id).await?;
  let posts = store.posts_of(id).await.map_err(ApiError::from_store)?;
  Ok(Json(posts))
}
