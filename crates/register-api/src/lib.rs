//! JSON REST API for the public office register.
//!
//! Exposes an axum [`Router`] backed by any
//! [`register_core::store::RegistryStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", register_api::api_router(store.clone()))
//! ```

pub mod choices;
pub mod display;
pub mod error;
pub mod extract;
pub mod memberships;
pub mod organizations;
pub mod people;
pub mod posts;

use std::sync::Arc;

use axum::{Router, routing::get};
use register_core::store::RegistryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RegistryStore + 'static,
{
  Router::new()
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .patch(people::update::<S>)
        .delete(people::delete::<S>),
    )
    .route("/people/{id}/memberships", get(people::memberships::<S>))
    // Organizations
    .route(
      "/organizations",
      get(organizations::list::<S>).post(organizations::create::<S>),
    )
    .route(
      "/organizations/{id}",
      get(organizations::get_one::<S>)
        .patch(organizations::update::<S>)
        .delete(organizations::delete::<S>),
    )
    .route("/organizations/{id}/children", get(organizations::children::<S>))
    .route("/organizations/{id}/posts", get(organizations::posts::<S>))
    // Posts
    .route("/posts", get(posts::list::<S>).post(posts::create::<S>))
    .route(
      "/posts/{id}",
      get(posts::get_one::<S>)
        .patch(posts::update::<S>)
        .delete(posts::delete::<S>),
    )
    // Memberships
    .route(
      "/memberships",
      get(memberships::list::<S>).post(memberships::create::<S>),
    )
    .route(
      "/memberships/{id}",
      get(memberships::get_one::<S>)
        .patch(memberships::update::<S>)
        .delete(memberships::delete::<S>),
    )
    // Choice sets
    .route("/choices", get(choices::handler))
    .with_state(store)
}

#[cfg(test)]
mod tests;
