//! SQL schema for the register's SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema version for future migrations.

use rusqlite::{Connection, functions::FunctionFlags};

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys` must be on for the `ON DELETE` actions to fire. It is a
/// per-connection setting, which is fine because the store owns exactly one
/// connection.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    pkid        INTEGER PRIMARY KEY AUTOINCREMENT,
    id          TEXT    NOT NULL UNIQUE,
    created_at  TEXT    NOT NULL,   -- RFC 3339 UTC, nanosecond precision
    updated_at  TEXT    NOT NULL,
    is_active   INTEGER NOT NULL DEFAULT 1,
    name        TEXT    NOT NULL,
    biography   TEXT,
    birth_date  TEXT,               -- YYYY-MM-DD
    death_date  TEXT,
    gender      TEXT,
    summary     TEXT,
    CHECK (birth_date IS NULL OR death_date IS NULL OR death_date >= birth_date)
);

CREATE TABLE IF NOT EXISTS organizations (
    pkid           INTEGER PRIMARY KEY AUTOINCREMENT,
    id             TEXT    NOT NULL UNIQUE,
    created_at     TEXT    NOT NULL,
    updated_at     TEXT    NOT NULL,
    is_active      INTEGER NOT NULL DEFAULT 1,
    name           TEXT    NOT NULL,
    classification TEXT    NOT NULL DEFAULT 'unknown'
        CHECK (classification IN ('legislature', 'executive', 'judiciary',
                                  'party', 'ministry', 'committee', 'unknown')),
    parent_id      TEXT    REFERENCES organizations(id) ON DELETE SET NULL,
    country_code   TEXT    NOT NULL,
    CHECK (parent_id IS NULL OR parent_id != id)
);

CREATE TABLE IF NOT EXISTS posts (
    pkid            INTEGER PRIMARY KEY AUTOINCREMENT,
    id              TEXT    NOT NULL UNIQUE,
    created_at      TEXT    NOT NULL,
    updated_at      TEXT    NOT NULL,
    is_active       INTEGER NOT NULL DEFAULT 1,
    label           TEXT    NOT NULL,
    role_type       TEXT    NOT NULL DEFAULT 'unknown'
        CHECK (role_type IN ('legislative', 'executive', 'judicial',
                             'local_government', 'traditional_authority', 'unknown')),
    organization_id TEXT    NOT NULL REFERENCES organizations(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS memberships (
    pkid             INTEGER PRIMARY KEY AUTOINCREMENT,
    id               TEXT    NOT NULL UNIQUE,
    created_at       TEXT    NOT NULL,
    updated_at       TEXT    NOT NULL,
    is_active        INTEGER NOT NULL DEFAULT 1,
    person_id        TEXT    NOT NULL REFERENCES people(id)        ON DELETE CASCADE,
    organization_id  TEXT    NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    post_id          TEXT             REFERENCES posts(id)         ON DELETE SET NULL,
    party_id         TEXT             REFERENCES organizations(id) ON DELETE SET NULL,
    start_date       TEXT,
    end_date         TEXT,            -- NULL means ongoing
    selection_method TEXT    NOT NULL DEFAULT 'unknown'
        CHECK (selection_method IN ('elected', 'appointed', 'ex_officio',
                                    'hereditary', 'unknown')),
    CHECK (start_date IS NULL OR end_date IS NULL OR end_date >= start_date)
);

CREATE INDEX IF NOT EXISTS people_name_idx              ON people(name);
CREATE INDEX IF NOT EXISTS organizations_name_idx       ON organizations(name);
CREATE INDEX IF NOT EXISTS organizations_parent_idx     ON organizations(parent_id);
CREATE INDEX IF NOT EXISTS posts_organization_idx       ON posts(organization_id);
CREATE INDEX IF NOT EXISTS memberships_person_idx       ON memberships(person_id);
CREATE INDEX IF NOT EXISTS memberships_organization_idx ON memberships(organization_id);
CREATE INDEX IF NOT EXISTS memberships_post_idx         ON memberships(post_id);
CREATE INDEX IF NOT EXISTS memberships_party_idx        ON memberships(party_id);
CREATE INDEX IF NOT EXISTS memberships_start_idx        ON memberships(start_date);

PRAGMA user_version = 1;
";

/// Register `casefold(text)`, a Unicode-aware lower-casing used by the
/// substring searches. SQLite's own `LIKE` only folds ASCII letters.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    "casefold",
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: Option<String> = ctx.get(0)?;
      Ok(text.map(|t| t.to_lowercase()))
    },
  )
}
