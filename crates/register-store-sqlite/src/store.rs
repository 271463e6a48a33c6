//! [`SqliteStore`], the SQLite implementation of [`RegistryStore`].

use std::path::Path;

use register_core::{
  Error as CoreError,
  choices::ChoiceSet,
  hierarchy::would_create_cycle,
  membership::{Membership, MembershipPatch, NewMembership},
  organization::{NewOrganization, Organization, OrganizationPatch},
  person::{NewPerson, Person, PersonPatch},
  post::{NewPost, Post, PostPatch},
  record::EntityKind,
  store::{MembershipQuery, OrganizationQuery, PersonQuery, PostQuery, RegistryStore},
};
use rusqlite::{Connection, OptionalExtension as _, params};
use tracing::debug;
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    RawMembership, RawOrganization, RawPerson, RawPost, decode_opt_uuid, encode_date,
    encode_dt, encode_opt_uuid, encode_uuid, like_pattern,
  },
  schema::{SCHEMA, register_functions},
};

/// Page size used when a query does not set `limit`.
const DEFAULT_LIMIT: usize = 100;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A register backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `f` against the connection outside a transaction.
  async fn read<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self.conn.call(move |conn| Ok(f(conn))).await?
  }

  /// Run `f` inside a transaction that commits only if `f` succeeds, so
  /// validation lookups and the write itself are atomic.
  async fn write<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = f(&tx);
        if outcome.is_ok() {
          tx.commit()?;
        }
        Ok(outcome)
      })
      .await?
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn table(entity: EntityKind) -> &'static str {
  match entity {
    EntityKind::Person => "people",
    EntityKind::Organization => "organizations",
    EntityKind::Post => "posts",
    EntityKind::Membership => "memberships",
  }
}

fn limit_offset(limit: Option<usize>, offset: Option<usize>) -> (i64, i64) {
  (
    limit.unwrap_or(DEFAULT_LIMIT) as i64,
    offset.unwrap_or(0) as i64,
  )
}

/// Fail with [`CoreError::MissingReference`] unless `id` exists in the table
/// for `entity`.
fn require_reference(conn: &Connection, entity: EntityKind, id: Uuid) -> Result<()> {
  let sql = format!("SELECT 1 FROM {} WHERE id = ?1", table(entity));
  let found = conn
    .query_row(&sql, params![encode_uuid(id)], |_| Ok(()))
    .optional()?;
  match found {
    Some(()) => Ok(()),
    None => Err(CoreError::MissingReference { entity, id }.into()),
  }
}

fn require_active_organization(conn: &Connection, id: Uuid) -> Result<()> {
  let active: Option<bool> = conn
    .query_row(
      "SELECT is_active FROM organizations WHERE id = ?1",
      params![encode_uuid(id)],
      |r| r.get(0),
    )
    .optional()?;
  match active {
    Some(true) => Ok(()),
    Some(false) => Err(CoreError::InactiveOrganization(id).into()),
    None => Err(
      CoreError::MissingReference { entity: EntityKind::Organization, id }.into(),
    ),
  }
}

fn parent_of(conn: &Connection, id: Uuid) -> Result<Option<Uuid>> {
  let parent: Option<Option<String>> = conn
    .query_row(
      "SELECT parent_id FROM organizations WHERE id = ?1",
      params![encode_uuid(id)],
      |r| r.get(0),
    )
    .optional()?;
  match parent {
    Some(parent) => decode_opt_uuid(parent),
    None => Err(
      CoreError::MissingReference { entity: EntityKind::Organization, id }.into(),
    ),
  }
}

fn delete_row(conn: &Connection, entity: EntityKind, id: Uuid) -> Result<()> {
  let sql = format!("DELETE FROM {} WHERE id = ?1", table(entity));
  let deleted = conn.execute(&sql, params![encode_uuid(id)])?;
  if deleted == 0 {
    return Err(CoreError::NotFound { entity, id }.into());
  }
  Ok(())
}

// ── People ───────────────────────────────────────────────────────────────────

fn fetch_person(conn: &Connection, id: Uuid) -> Result<Option<Person>> {
  let sql = format!("SELECT {} FROM people p WHERE p.id = ?1", RawPerson::COLUMNS);
  conn
    .query_row(&sql, params![encode_uuid(id)], RawPerson::from_row)
    .optional()?
    .map(RawPerson::into_person)
    .transpose()
}

fn require_person(conn: &Connection, id: Uuid) -> Result<Person> {
  fetch_person(conn, id)?
    .ok_or_else(|| CoreError::NotFound { entity: EntityKind::Person, id }.into())
}

fn insert_person(conn: &Connection, p: &Person) -> Result<i64> {
  conn.execute(
    "INSERT INTO people (
       id, created_at, updated_at, is_active,
       name, biography, birth_date, death_date, gender, summary
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    params![
      encode_uuid(p.record.id),
      encode_dt(p.record.created_at),
      encode_dt(p.record.updated_at),
      p.record.is_active,
      p.name,
      p.biography,
      encode_date(p.birth_date),
      encode_date(p.death_date),
      p.gender,
      p.summary,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn update_person_row(conn: &Connection, p: &Person) -> Result<()> {
  conn.execute(
    "UPDATE people SET
       updated_at = ?2, is_active = ?3,
       name = ?4, biography = ?5, birth_date = ?6, death_date = ?7,
       gender = ?8, summary = ?9
     WHERE id = ?1",
    params![
      encode_uuid(p.record.id),
      encode_dt(p.record.updated_at),
      p.record.is_active,
      p.name,
      p.biography,
      encode_date(p.birth_date),
      encode_date(p.death_date),
      p.gender,
      p.summary,
    ],
  )?;
  Ok(())
}

// ── Organizations ────────────────────────────────────────────────────────────

fn fetch_organization(conn: &Connection, id: Uuid) -> Result<Option<Organization>> {
  let sql = format!(
    "SELECT {} FROM organizations o WHERE o.id = ?1",
    RawOrganization::COLUMNS
  );
  conn
    .query_row(&sql, params![encode_uuid(id)], RawOrganization::from_row)
    .optional()?
    .map(RawOrganization::into_organization)
    .transpose()
}

fn require_organization(conn: &Connection, id: Uuid) -> Result<Organization> {
  fetch_organization(conn, id)?.ok_or_else(|| {
    CoreError::NotFound { entity: EntityKind::Organization, id }.into()
  })
}

fn insert_organization(conn: &Connection, o: &Organization) -> Result<i64> {
  conn.execute(
    "INSERT INTO organizations (
       id, created_at, updated_at, is_active,
       name, classification, parent_id, country_code
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      encode_uuid(o.record.id),
      encode_dt(o.record.created_at),
      encode_dt(o.record.updated_at),
      o.record.is_active,
      o.name,
      o.classification.value(),
      encode_opt_uuid(o.parent_id),
      o.country_code,
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn update_organization_row(conn: &Connection, o: &Organization) -> Result<()> {
  conn.execute(
    "UPDATE organizations SET
       updated_at = ?2, is_active = ?3,
       name = ?4, classification = ?5, parent_id = ?6, country_code = ?7
     WHERE id = ?1",
    params![
      encode_uuid(o.record.id),
      encode_dt(o.record.updated_at),
      o.record.is_active,
      o.name,
      o.classification.value(),
      encode_opt_uuid(o.parent_id),
      o.country_code,
    ],
  )?;
  Ok(())
}

// ── Posts ────────────────────────────────────────────────────────────────────

fn fetch_post(conn: &Connection, id: Uuid) -> Result<Option<Post>> {
  let sql = format!("SELECT {} FROM posts s WHERE s.id = ?1", RawPost::COLUMNS);
  conn
    .query_row(&sql, params![encode_uuid(id)], RawPost::from_row)
    .optional()?
    .map(RawPost::into_post)
    .transpose()
}

fn require_post(conn: &Connection, id: Uuid) -> Result<Post> {
  fetch_post(conn, id)?
    .ok_or_else(|| CoreError::NotFound { entity: EntityKind::Post, id }.into())
}

fn insert_post(conn: &Connection, s: &Post) -> Result<i64> {
  conn.execute(
    "INSERT INTO posts (
       id, created_at, updated_at, is_active,
       label, role_type, organization_id
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    params![
      encode_uuid(s.record.id),
      encode_dt(s.record.created_at),
      encode_dt(s.record.updated_at),
      s.record.is_active,
      s.label,
      s.role_type.value(),
      encode_uuid(s.organization_id),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn update_post_row(conn: &Connection, s: &Post) -> Result<()> {
  conn.execute(
    "UPDATE posts SET
       updated_at = ?2, is_active = ?3,
       label = ?4, role_type = ?5, organization_id = ?6
     WHERE id = ?1",
    params![
      encode_uuid(s.record.id),
      encode_dt(s.record.updated_at),
      s.record.is_active,
      s.label,
      s.role_type.value(),
      encode_uuid(s.organization_id),
    ],
  )?;
  Ok(())
}

// ── Memberships ──────────────────────────────────────────────────────────────

fn fetch_membership(conn: &Connection, id: Uuid) -> Result<Option<Membership>> {
  let sql = format!(
    "SELECT {} FROM memberships m WHERE m.id = ?1",
    RawMembership::COLUMNS
  );
  conn
    .query_row(&sql, params![encode_uuid(id)], RawMembership::from_row)
    .optional()?
    .map(RawMembership::into_membership)
    .transpose()
}

fn require_membership(conn: &Connection, id: Uuid) -> Result<Membership> {
  fetch_membership(conn, id)?.ok_or_else(|| {
    CoreError::NotFound { entity: EntityKind::Membership, id }.into()
  })
}

fn check_membership_references(conn: &Connection, m: &Membership) -> Result<()> {
  require_reference(conn, EntityKind::Person, m.person_id)?;
  require_reference(conn, EntityKind::Organization, m.organization_id)?;
  if let Some(post_id) = m.post_id {
    require_reference(conn, EntityKind::Post, post_id)?;
  }
  if let Some(party_id) = m.party_id {
    require_reference(conn, EntityKind::Organization, party_id)?;
  }
  Ok(())
}

fn insert_membership(conn: &Connection, m: &Membership) -> Result<i64> {
  conn.execute(
    "INSERT INTO memberships (
       id, created_at, updated_at, is_active,
       person_id, organization_id, post_id, party_id,
       start_date, end_date, selection_method
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    params![
      encode_uuid(m.record.id),
      encode_dt(m.record.created_at),
      encode_dt(m.record.updated_at),
      m.record.is_active,
      encode_uuid(m.person_id),
      encode_uuid(m.organization_id),
      encode_opt_uuid(m.post_id),
      encode_opt_uuid(m.party_id),
      encode_date(m.start_date),
      encode_date(m.end_date),
      m.selection_method.value(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn update_membership_row(conn: &Connection, m: &Membership) -> Result<()> {
  conn.execute(
    "UPDATE memberships SET
       updated_at = ?2, is_active = ?3,
       person_id = ?4, organization_id = ?5, post_id = ?6, party_id = ?7,
       start_date = ?8, end_date = ?9, selection_method = ?10
     WHERE id = ?1",
    params![
      encode_uuid(m.record.id),
      encode_dt(m.record.updated_at),
      m.record.is_active,
      encode_uuid(m.person_id),
      encode_uuid(m.organization_id),
      encode_opt_uuid(m.post_id),
      encode_opt_uuid(m.party_id),
      encode_date(m.start_date),
      encode_date(m.end_date),
      m.selection_method.value(),
    ],
  )?;
  Ok(())
}

// ─── RegistryStore impl ──────────────────────────────────────────────────────

impl RegistryStore for SqliteStore {
  type Error = crate::Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let mut person = Person::create(input)?;
    let person = self
      .write(move |conn| {
        person.record.pkid = insert_person(conn, &person)?;
        Ok(person)
      })
      .await?;
    debug!(id = %person.record.id, "created person");
    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    self.read(move |conn| fetch_person(conn, id)).await
  }

  async fn update_person(&self, id: Uuid, patch: PersonPatch) -> Result<Person> {
    let person = self
      .write(move |conn| {
        let mut person = require_person(conn, id)?;
        person.apply(patch)?;
        update_person_row(conn, &person)?;
        Ok(person)
      })
      .await?;
    debug!(%id, "updated person");
    Ok(person)
  }

  async fn delete_person(&self, id: Uuid) -> Result<()> {
    self
      .write(move |conn| delete_row(conn, EntityKind::Person, id))
      .await?;
    debug!(%id, "deleted person");
    Ok(())
  }

  async fn list_people(&self, query: PersonQuery) -> Result<Vec<Person>> {
    let pattern = query.name.as_deref().map(like_pattern);
    let (limit, offset) = limit_offset(query.limit, query.offset);

    self
      .read(move |conn| {
        let sql = format!(
          r"SELECT {} FROM people p
            WHERE (?1 IS NULL OR casefold(p.name) LIKE ?1 ESCAPE '\')
              AND (?2 OR p.is_active)
            ORDER BY p.name COLLATE NOCASE, p.pkid
            LIMIT ?3 OFFSET ?4",
          RawPerson::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
          .query_map(
            params![pattern, query.include_inactive, limit, offset],
            RawPerson::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawPerson::into_person).collect()
      })
      .await
  }

  // ── Organizations ─────────────────────────────────────────────────────────

  async fn create_organization(&self, input: NewOrganization) -> Result<Organization> {
    let mut org = Organization::create(input)?;
    let org = self
      .write(move |conn| {
        if let Some(parent_id) = org.parent_id {
          require_reference(conn, EntityKind::Organization, parent_id)?;
        }
        org.record.pkid = insert_organization(conn, &org)?;
        Ok(org)
      })
      .await?;
    debug!(id = %org.record.id, parent = ?org.parent_id, "created organization");
    Ok(org)
  }

  async fn get_organization(&self, id: Uuid) -> Result<Option<Organization>> {
    self.read(move |conn| fetch_organization(conn, id)).await
  }

  async fn update_organization(
    &self,
    id: Uuid,
    patch: OrganizationPatch,
  ) -> Result<Organization> {
    let org = self
      .write(move |conn| {
        let mut org = require_organization(conn, id)?;
        let previous_parent = org.parent_id;
        org.apply(patch)?;

        if let Some(parent_id) = org.parent_id
          && org.parent_id != previous_parent
        {
          require_reference(conn, EntityKind::Organization, parent_id)?;
          if would_create_cycle(id, parent_id, |current| parent_of(conn, current))? {
            return Err(CoreError::ParentCycle { child: id, parent: parent_id }.into());
          }
        }

        update_organization_row(conn, &org)?;
        Ok(org)
      })
      .await?;
    debug!(%id, parent = ?org.parent_id, "updated organization");
    Ok(org)
  }

  async fn delete_organization(&self, id: Uuid) -> Result<()> {
    self
      .write(move |conn| delete_row(conn, EntityKind::Organization, id))
      .await?;
    debug!(%id, "deleted organization");
    Ok(())
  }

  async fn list_organizations(&self, query: OrganizationQuery) -> Result<Vec<Organization>> {
    let pattern = query.name.as_deref().map(like_pattern);
    let classification = query.classification.map(ChoiceSet::value);
    let country_code = query
      .country_code
      .as_deref()
      .map(|c| c.trim().to_ascii_uppercase());
    let parent_id = encode_opt_uuid(query.parent_id);
    let (limit, offset) = limit_offset(query.limit, query.offset);

    self
      .read(move |conn| {
        let sql = format!(
          r"SELECT {} FROM organizations o
            WHERE (?1 IS NULL OR casefold(o.name) LIKE ?1 ESCAPE '\')
              AND (?2 IS NULL OR o.classification = ?2)
              AND (?3 IS NULL OR o.country_code = ?3)
              AND (?4 IS NULL OR o.parent_id = ?4)
              AND (?5 OR o.is_active)
            ORDER BY o.name COLLATE NOCASE, o.pkid
            LIMIT ?6 OFFSET ?7",
          RawOrganization::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
          .query_map(
            params![
              pattern,
              classification,
              country_code,
              parent_id,
              query.include_inactive,
              limit,
              offset,
            ],
            RawOrganization::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawOrganization::into_organization).collect()
      })
      .await
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  async fn create_post(&self, input: NewPost) -> Result<Post> {
    let mut post = Post::create(input)?;
    let post = self
      .write(move |conn| {
        require_active_organization(conn, post.organization_id)?;
        post.record.pkid = insert_post(conn, &post)?;
        Ok(post)
      })
      .await?;
    debug!(id = %post.record.id, organization = %post.organization_id, "created post");
    Ok(post)
  }

  async fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
    self.read(move |conn| fetch_post(conn, id)).await
  }

  async fn update_post(&self, id: Uuid, patch: PostPatch) -> Result<Post> {
    let post = self
      .write(move |conn| {
        let mut post = require_post(conn, id)?;
        let previous_organization = post.organization_id;
        post.apply(patch)?;
        if post.organization_id != previous_organization {
          require_active_organization(conn, post.organization_id)?;
        }
        update_post_row(conn, &post)?;
        Ok(post)
      })
      .await?;
    debug!(%id, "updated post");
    Ok(post)
  }

  async fn delete_post(&self, id: Uuid) -> Result<()> {
    self
      .write(move |conn| delete_row(conn, EntityKind::Post, id))
      .await?;
    debug!(%id, "deleted post");
    Ok(())
  }

  async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>> {
    let pattern = query.label.as_deref().map(like_pattern);
    let role_type = query.role_type.map(ChoiceSet::value);
    let organization_id = encode_opt_uuid(query.organization_id);
    let (limit, offset) = limit_offset(query.limit, query.offset);

    self
      .read(move |conn| {
        let sql = format!(
          r"SELECT {} FROM posts s
            WHERE (?1 IS NULL OR casefold(s.label) LIKE ?1 ESCAPE '\')
              AND (?2 IS NULL OR s.role_type = ?2)
              AND (?3 IS NULL OR s.organization_id = ?3)
              AND (?4 OR s.is_active)
            ORDER BY s.label COLLATE NOCASE, s.pkid
            LIMIT ?5 OFFSET ?6",
          RawPost::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
          .query_map(
            params![
              pattern,
              role_type,
              organization_id,
              query.include_inactive,
              limit,
              offset,
            ],
            RawPost::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawPost::into_post).collect()
      })
      .await
  }

  // ── Memberships ───────────────────────────────────────────────────────────

  async fn create_membership(&self, input: NewMembership) -> Result<Membership> {
    let mut membership = Membership::create(input)?;
    let membership = self
      .write(move |conn| {
        check_membership_references(conn, &membership)?;
        membership.record.pkid = insert_membership(conn, &membership)?;
        Ok(membership)
      })
      .await?;
    debug!(
      id = %membership.record.id,
      person = %membership.person_id,
      organization = %membership.organization_id,
      "created membership"
    );
    Ok(membership)
  }

  async fn get_membership(&self, id: Uuid) -> Result<Option<Membership>> {
    self.read(move |conn| fetch_membership(conn, id)).await
  }

  async fn update_membership(
    &self,
    id: Uuid,
    patch: MembershipPatch,
  ) -> Result<Membership> {
    let membership = self
      .write(move |conn| {
        let mut membership = require_membership(conn, id)?;
        membership.apply(patch)?;
        check_membership_references(conn, &membership)?;
        update_membership_row(conn, &membership)?;
        Ok(membership)
      })
      .await?;
    debug!(%id, "updated membership");
    Ok(membership)
  }

  async fn delete_membership(&self, id: Uuid) -> Result<()> {
    self
      .write(move |conn| delete_row(conn, EntityKind::Membership, id))
      .await?;
    debug!(%id, "deleted membership");
    Ok(())
  }

  async fn list_memberships(&self, query: MembershipQuery) -> Result<Vec<Membership>> {
    let pattern = query.text.as_deref().map(like_pattern);
    let person_id = encode_opt_uuid(query.person_id);
    let organization_id = encode_opt_uuid(query.organization_id);
    let post_id = encode_opt_uuid(query.post_id);
    let party_id = encode_opt_uuid(query.party_id);
    let selection_method = query.selection_method.map(ChoiceSet::value);
    let started_after = encode_date(query.started_after);
    let started_before = encode_date(query.started_before);
    let (limit, offset) = limit_offset(query.limit, query.offset);

    self
      .read(move |conn| {
        let sql = format!(
          r"SELECT {} FROM memberships m
            JOIN people        p ON p.id = m.person_id
            JOIN organizations o ON o.id = m.organization_id
            LEFT JOIN posts    s ON s.id = m.post_id
            WHERE (?1 IS NULL
                   OR casefold(p.name)  LIKE ?1 ESCAPE '\'
                   OR casefold(o.name)  LIKE ?1 ESCAPE '\'
                   OR casefold(s.label) LIKE ?1 ESCAPE '\')
              AND (?2 IS NULL OR m.person_id = ?2)
              AND (?3 IS NULL OR m.organization_id = ?3)
              AND (?4 IS NULL OR m.post_id = ?4)
              AND (?5 IS NULL OR m.party_id = ?5)
              AND (?6 IS NULL OR m.selection_method = ?6)
              AND (?7 IS NULL OR m.start_date >= ?7)
              AND (?8 IS NULL OR m.start_date <= ?8)
              AND (?9 IS NULL OR (m.end_date IS NULL) = ?9)
              AND (?10 OR m.is_active)
            ORDER BY m.start_date DESC NULLS LAST, m.created_at DESC, m.pkid DESC
            LIMIT ?11 OFFSET ?12",
          RawMembership::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
          .query_map(
            params![
              pattern,
              person_id,
              organization_id,
              post_id,
              party_id,
              selection_method,
              started_after,
              started_before,
              query.ongoing,
              query.include_inactive,
              limit,
              offset,
            ],
            RawMembership::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawMembership::into_membership).collect()
      })
      .await
  }
}
