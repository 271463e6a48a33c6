//! The `RegistryStore` trait and supporting query types.
//!
//! Implemented by storage backends (e.g. `register-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on a concrete backend.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Classify, Error,
  choices::{OrganizationType, PostType, SelectionMethod},
  membership::{Membership, MembershipPatch, NewMembership},
  organization::{NewOrganization, Organization, OrganizationPatch},
  person::{NewPerson, Person, PersonPatch},
  post::{NewPost, Post, PostPatch},
  record::EntityKind,
  view::{MembershipView, PostView},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`RegistryStore::list_people`]. Ordered by name.
#[derive(Debug, Clone, Default)]
pub struct PersonQuery {
  /// Case-insensitive substring match on `name`.
  pub name:             Option<String>,
  /// Also return soft-deleted people.
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// Parameters for [`RegistryStore::list_organizations`]. Ordered by name.
#[derive(Debug, Clone, Default)]
pub struct OrganizationQuery {
  pub name:             Option<String>,
  pub classification:   Option<OrganizationType>,
  pub country_code:     Option<String>,
  /// Restrict to the direct children of this organization.
  pub parent_id:        Option<Uuid>,
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// Parameters for [`RegistryStore::list_posts`]. Ordered by label.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
  pub label:            Option<String>,
  pub role_type:        Option<PostType>,
  pub organization_id:  Option<Uuid>,
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

/// Parameters for [`RegistryStore::list_memberships`].
///
/// Ordered by most recent `start_date` first; memberships without a start
/// date come last.
#[derive(Debug, Clone, Default)]
pub struct MembershipQuery {
  /// Case-insensitive substring match on the person's name, the
  /// organization's name or the post's label.
  pub text:             Option<String>,
  pub person_id:        Option<Uuid>,
  pub organization_id:  Option<Uuid>,
  pub post_id:          Option<Uuid>,
  pub party_id:         Option<Uuid>,
  pub selection_method: Option<SelectionMethod>,
  /// Inclusive lower bound on `start_date`.
  pub started_after:    Option<NaiveDate>,
  /// Inclusive upper bound on `start_date`.
  pub started_before:   Option<NaiveDate>,
  /// `Some(true)` keeps only tenures with no `end_date`; `Some(false)` only
  /// ended ones.
  pub ongoing:          Option<bool>,
  pub include_inactive: bool,
  pub limit:            Option<usize>,
  pub offset:           Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a register backend.
///
/// Every write is validated before anything is persisted and runs as a single
/// transaction. Deletes apply the referential actions of the schema:
///
/// | Reference | On delete of target |
/// |---|---|
/// | organization parent | set null |
/// | post organization | cascade |
/// | membership person | cascade |
/// | membership organization | cascade |
/// | membership post | set null |
/// | membership party | set null |
///
/// Lookups by id return `None` when absent; updates and deletes of a missing
/// id fail with [`Error::NotFound`].
pub trait RegistryStore: Send + Sync {
  type Error: std::error::Error + Classify + From<Error> + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn update_person(
    &self,
    id: Uuid,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Delete a person and, by cascade, all of their memberships.
  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_people(
    &self,
    query: PersonQuery,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  // ── Organizations ─────────────────────────────────────────────────────

  /// Create an organization. The parent, if any, must exist.
  fn create_organization(
    &self,
    input: NewOrganization,
  ) -> impl Future<Output = Result<Organization, Self::Error>> + Send + '_;

  fn get_organization(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Organization>, Self::Error>> + Send + '_;

  /// Update an organization. A parent reassignment that would make the
  /// organization its own ancestor fails with [`Error::ParentCycle`].
  fn update_organization(
    &self,
    id: Uuid,
    patch: OrganizationPatch,
  ) -> impl Future<Output = Result<Organization, Self::Error>> + Send + '_;

  /// Delete an organization. Children are orphaned, posts and primary
  /// memberships are deleted, party affiliations are cleared.
  fn delete_organization(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_organizations(
    &self,
    query: OrganizationQuery,
  ) -> impl Future<Output = Result<Vec<Organization>, Self::Error>> + Send + '_;

  /// Active direct children of `id`.
  fn children_of(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Vec<Organization>, Self::Error>> + Send + '_ {
    self.list_organizations(OrganizationQuery {
      parent_id: Some(id),
      ..OrganizationQuery::default()
    })
  }

  // ── Posts ─────────────────────────────────────────────────────────────

  /// Create a post. Its organization must exist and be active.
  fn create_post(
    &self,
    input: NewPost,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  fn get_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send + '_;

  fn update_post(
    &self,
    id: Uuid,
    patch: PostPatch,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Delete a post. Memberships that held it keep existing with no post.
  fn delete_post(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_posts(
    &self,
    query: PostQuery,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// Active posts of organization `id`.
  fn posts_of(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_ {
    self.list_posts(PostQuery {
      organization_id: Some(id),
      ..PostQuery::default()
    })
  }

  /// A post joined with its organization.
  fn post_view(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<PostView>, Self::Error>> + Send + '_ {
    async move {
      let Some(post) = self.get_post(id).await? else {
        return Ok(None);
      };
      let organization = self
        .get_organization(post.organization_id)
        .await?
        .ok_or(Error::MissingReference {
          entity: EntityKind::Organization,
          id:     post.organization_id,
        })?;
      Ok::<_, Self::Error>(Some(PostView { post, organization }))
    }
  }

  // ── Memberships ───────────────────────────────────────────────────────

  /// Create a membership. The person, organization and (if given) post and
  /// party must exist.
  fn create_membership(
    &self,
    input: NewMembership,
  ) -> impl Future<Output = Result<Membership, Self::Error>> + Send + '_;

  fn get_membership(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Membership>, Self::Error>> + Send + '_;

  fn update_membership(
    &self,
    id: Uuid,
    patch: MembershipPatch,
  ) -> impl Future<Output = Result<Membership, Self::Error>> + Send + '_;

  fn delete_membership(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_memberships(
    &self,
    query: MembershipQuery,
  ) -> impl Future<Output = Result<Vec<Membership>, Self::Error>> + Send + '_;

  /// Active memberships of person `id`.
  fn memberships_of(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Vec<Membership>, Self::Error>> + Send + '_ {
    self.list_memberships(MembershipQuery {
      person_id: Some(id),
      ..MembershipQuery::default()
    })
  }

  /// A membership with its person, organization, post and party resolved.
  fn membership_view(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<MembershipView>, Self::Error>> + Send + '_ {
    async move {
      let Some(membership) = self.get_membership(id).await? else {
        return Ok(None);
      };
      let person = self
        .get_person(membership.person_id)
        .await?
        .ok_or(Error::MissingReference {
          entity: EntityKind::Person,
          id:     membership.person_id,
        })?;
      let organization = self
        .get_organization(membership.organization_id)
        .await?
        .ok_or(Error::MissingReference {
          entity: EntityKind::Organization,
          id:     membership.organization_id,
        })?;
      let post = match membership.post_id {
        Some(post_id) => self.get_post(post_id).await?,
        None => None,
      };
      let party = match membership.party_id {
        Some(party_id) => self.get_organization(party_id).await?,
        None => None,
      };
      Ok::<_, Self::Error>(Some(MembershipView {
        membership,
        person,
        organization,
        post,
        party,
      }))
    }
  }
}
