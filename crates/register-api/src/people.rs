//! Handlers for `/people` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/people` | Optional `q`, `include_inactive`, `limit`, `offset` |
//! | `POST`   | `/people` | Body: [`NewPerson`]; returns 201 |
//! | `GET`    | `/people/{id}` | Adds `display`; 404 if not found |
//! | `PATCH`  | `/people/{id}` | Body: [`PersonPatch`] |
//! | `DELETE` | `/people/{id}` | 204; cascades to memberships |
//! | `GET`    | `/people/{id}/memberships` | Active memberships, newest tenure first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use register_core::{
  membership::Membership,
  person::{NewPerson, Person, PersonPatch},
  store::{PersonQuery, RegistryStore},
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
  /// Case-insensitive substring of the name.
  pub q:                Option<String>,
  #[serde(default)]
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// `GET /people[?q=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Params(params): Params<ListParams>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: RegistryStore,
{
  let people = store
    .list_people(PersonQuery {
      name:             params.q,
      include_inactive: params.include_inactive,
      limit:            params.limit,
      offset:           params.offset,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(people))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people`: body: `{"name":"..."}` plus optional fields.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Body(body): Body<NewPerson>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistryStore,
{
  let person = store
    .create_person(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Displayed<Person>>, ApiError>
where
  S: RegistryStore,
{
  let person = store
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(Displayed::new(person)))
}

// ─── Update / delete ──────────────────────────────────────────────────────────

/// `PATCH /people/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Body(patch): Body<PersonPatch>,
) -> Result<Json<Person>, ApiError>
where
  S: RegistryStore,
{
  let person = store
    .update_person(id, patch)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(person))
}

/// `DELETE /people/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RegistryStore,
{
  store.delete_person(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Related ──────────────────────────────────────────────────────────────────

/// `GET /people/{id}/memberships`
pub async fn memberships<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Membership>>, ApiError>
where
  S: RegistryStore,
{
  store
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  let memberships = store
    .memberships_of(id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(memberships))
}
