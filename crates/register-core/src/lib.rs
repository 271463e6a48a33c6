//! Core types and trait definitions for the public office register.
//!
//! The register models who held which public office when: people,
//! organizations (legislatures, parties, ministries...), the posts that exist
//! inside those organizations, and the memberships that join them over a
//! date range.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::RegistryStore`]; everything above them depends on that
//! trait only.

#![allow(async_fn_in_trait)]

pub mod choices;
pub mod error;
pub mod hierarchy;
pub mod membership;
pub mod organization;
pub mod patch;
pub mod person;
pub mod post;
pub mod record;
pub mod store;
pub mod validate;
pub mod view;

pub use error::{Classify, Error, Failure, Result};
