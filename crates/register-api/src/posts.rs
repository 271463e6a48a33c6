//! Handlers for `/posts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/posts` | Optional `q`, `role_type`, `organization` |
//! | `POST`   | `/posts` | Body: [`NewPost`]; the organization must be active |
//! | `GET`    | `/posts/{id}` | `display` is `"{label} ({organization})"` |
//! | `PATCH`  | `/posts/{id}` | Body: [`PostPatch`] |
//! | `DELETE` | `/posts/{id}` | 204; memberships keep existing without a post |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use register_core::{
  choices::{ChoiceSet, PostType},
  post::{NewPost, Post, PostPatch},
  store::{PostQuery, RegistryStore},
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
  pub q:                Option<String>,
  pub role_type:        Option<String>,
  pub organization:     Option<Uuid>,
  #[serde(default)]
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// `GET /posts[?q=...][&role_type=...][&organization=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Params(params): Params<ListParams>,
) -> Result<Json<Vec<Post>>, ApiError>
where
  S: RegistryStore,
{
  let role_type = params
    .role_type
    .as_deref()
    .map(PostType::parse_choice)
    .transpose()?;
  let posts = store
    .list_posts(PostQuery {
      label: params.q,
      role_type,
      organization_id: params.organization,
      include_inactive: params.include_inactive,
      limit: params.limit,
      offset: params.offset,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(posts))
}

/// `POST /posts`: body: `{"label":"...","organization_id":"..."}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Body(body): Body<NewPost>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistryStore,
{
  let post = store.create_post(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /posts/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Displayed<Post>>, ApiError>
where
  S: RegistryStore,
{
  let view = store
    .post_view(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("post {id} not found")))?;
  let display = view.to_string();
  Ok(Json(Displayed::with(view.post, display)))
}

/// `PATCH /posts/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Body(patch): Body<PostPatch>,
) -> Result<Json<Post>, ApiError>
where
  S: RegistryStore,
{
  let post = store
    .update_post(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(post))
}

/// `DELETE /posts/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  store.delete_post(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
