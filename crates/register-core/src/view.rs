//! Read models that join an entity with the records it references.
//!
//! Never stored; assembled on read so that display strings can name the
//! related organization, person and post.

use std::fmt;

use serde::Serialize;

use crate::{membership::Membership, organization::Organization, person::Person, post::Post};

/// A post together with the organization it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
  pub post:         Post,
  pub organization: Organization,
}

impl fmt::Display for PostView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.post.label, self.organization.name)
  }
}

/// A membership with every reference resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipView {
  pub membership:   Membership,
  pub person:       Person,
  pub organization: Organization,
  pub post:         Option<Post>,
  pub party:        Option<Organization>,
}

impl fmt::Display for MembershipView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {} (", self.person.name, self.organization.name)?;
    match self.membership.start_date {
      Some(date) => write!(f, "{date})"),
      None => f.write_str("?)"),
    }
  }
}
