//! Error type for `register-store-sqlite`.

use register_core::{Classify, Failure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] register_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown {field} value in database: {value:?}")]
  UnknownChoice { field: &'static str, value: String },
}

impl Classify for Error {
  fn failure(&self) -> Failure {
    match self {
      Error::Core(e) => e.failure(),
      _ => Failure::Internal,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
