//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings in UTC with a fixed nanosecond fraction,
//! so lexical order matches chronological order. Calendar dates are
//! `YYYY-MM-DD`. UUIDs are hyphenated lowercase strings. Choice fields are
//! stored as their snake_case values.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use register_core::{
  choices::ChoiceSet,
  membership::Membership,
  organization::Organization,
  person::Person,
  post::Post,
  record::Record,
};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_opt_uuid(id: Option<Uuid>) -> Option<String> { id.map(encode_uuid) }

pub fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: Option<NaiveDate>) -> Option<String> {
  d.map(|d| d.format("%Y-%m-%d").to_string())
}

fn decode_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.map(|s| {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
      .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
  })
  .transpose()
}

fn decode_choice<C: ChoiceSet>(s: &str) -> Result<C> {
  C::parse_choice(s).map_err(|_| Error::UnknownChoice {
    field: C::FIELD,
    value: s.to_owned(),
  })
}

/// Build a lower-cased `LIKE` pattern matching `text` anywhere, with `\` as
/// the escape character for literal `%` and `_`. Compare it against
/// `casefold(column)`.
pub fn like_pattern(text: &str) -> String {
  let mut pattern = String::with_capacity(text.len() + 2);
  pattern.push('%');
  for c in text.to_lowercase().chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  pattern
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Every table starts with the same five record columns, in this order:
// pkid, id, created_at, updated_at, is_active.

struct RawRecord {
  pkid:       i64,
  id:         String,
  created_at: String,
  updated_at: String,
  is_active:  bool,
}

impl RawRecord {
  fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      pkid:       row.get(0)?,
      id:         row.get(1)?,
      created_at: row.get(2)?,
      updated_at: row.get(3)?,
      is_active:  row.get(4)?,
    })
  }

  fn into_record(self) -> Result<Record> {
    Ok(Record {
      pkid:       self.pkid,
      id:         decode_uuid(&self.id)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      is_active:  self.is_active,
    })
  }
}

pub struct RawPerson {
  record:     RawRecord,
  name:       String,
  biography:  Option<String>,
  birth_date: Option<String>,
  death_date: Option<String>,
  gender:     Option<String>,
  summary:    Option<String>,
}

impl RawPerson {
  pub const COLUMNS: &'static str = "p.pkid, p.id, p.created_at, p.updated_at, p.is_active,
    p.name, p.biography, p.birth_date, p.death_date, p.gender, p.summary";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record:     RawRecord::from_row(row)?,
      name:       row.get(5)?,
      biography:  row.get(6)?,
      birth_date: row.get(7)?,
      death_date: row.get(8)?,
      gender:     row.get(9)?,
      summary:    row.get(10)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      record:     self.record.into_record()?,
      name:       self.name,
      biography:  self.biography,
      birth_date: decode_date(self.birth_date)?,
      death_date: decode_date(self.death_date)?,
      gender:     self.gender,
      summary:    self.summary,
    })
  }
}

pub struct RawOrganization {
  record:         RawRecord,
  name:           String,
  classification: String,
  parent_id:      Option<String>,
  country_code:   String,
}

impl RawOrganization {
  pub const COLUMNS: &'static str = "o.pkid, o.id, o.created_at, o.updated_at, o.is_active,
    o.name, o.classification, o.parent_id, o.country_code";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record:         RawRecord::from_row(row)?,
      name:           row.get(5)?,
      classification: row.get(6)?,
      parent_id:      row.get(7)?,
      country_code:   row.get(8)?,
    })
  }

  pub fn into_organization(self) -> Result<Organization> {
    Ok(Organization {
      record:         self.record.into_record()?,
      name:           self.name,
      classification: decode_choice(&self.classification)?,
      parent_id:      decode_opt_uuid(self.parent_id)?,
      country_code:   self.country_code,
    })
  }
}

pub struct RawPost {
  record:          RawRecord,
  label:           String,
  role_type:       String,
  organization_id: String,
}

impl RawPost {
  pub const COLUMNS: &'static str = "s.pkid, s.id, s.created_at, s.updated_at, s.is_active,
    s.label, s.role_type, s.organization_id";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record:          RawRecord::from_row(row)?,
      label:           row.get(5)?,
      role_type:       row.get(6)?,
      organization_id: row.get(7)?,
    })
  }

  pub fn into_post(self) -> Result<Post> {
    Ok(Post {
      record:          self.record.into_record()?,
      label:           self.label,
      role_type:       decode_choice(&self.role_type)?,
      organization_id: decode_uuid(&self.organization_id)?,
    })
  }
}

pub struct RawMembership {
  record:           RawRecord,
  person_id:        String,
  organization_id:  String,
  post_id:          Option<String>,
  party_id:         Option<String>,
  start_date:       Option<String>,
  end_date:         Option<String>,
  selection_method: String,
}

impl RawMembership {
  pub const COLUMNS: &'static str = "m.pkid, m.id, m.created_at, m.updated_at, m.is_active,
    m.person_id, m.organization_id, m.post_id, m.party_id,
    m.start_date, m.end_date, m.selection_method";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record:           RawRecord::from_row(row)?,
      person_id:        row.get(5)?,
      organization_id:  row.get(6)?,
      post_id:          row.get(7)?,
      party_id:         row.get(8)?,
      start_date:       row.get(9)?,
      end_date:         row.get(10)?,
      selection_method: row.get(11)?,
    })
  }

  pub fn into_membership(self) -> Result<Membership> {
    Ok(Membership {
      record:           self.record.into_record()?,
      person_id:        decode_uuid(&self.person_id)?,
      organization_id:  decode_uuid(&self.organization_id)?,
      post_id:          decode_opt_uuid(self.post_id)?,
      party_id:         decode_opt_uuid(self.party_id)?,
      start_date:       decode_date(self.start_date)?,
      end_date:         decode_date(self.end_date)?,
      selection_method: decode_choice(&self.selection_method)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("Doe"), "%doe%");
    assert_eq!(like_pattern("ỌBA"), "%ọba%");
    assert_eq!(like_pattern("50%_x\\"), "%50\\%\\_x\\\\%");
  }

  #[test]
  fn timestamps_have_fixed_width() {
    let a = decode_dt("2024-01-01T00:00:00Z").unwrap();
    let b = decode_dt("2024-01-01T00:00:00.5Z").unwrap();
    let (ea, eb) = (encode_dt(a), encode_dt(b));
    assert_eq!(ea.len(), eb.len());
    assert!(ea < eb);
    assert_eq!(decode_dt(&eb).unwrap(), b);
  }
}
