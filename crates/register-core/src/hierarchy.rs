//! Cycle detection for the organization parent forest.

use std::collections::HashSet;

use uuid::Uuid;

/// Return `true` if making `candidate_parent` the parent of `node` would
/// make `node` its own ancestor.
///
/// Walks upwards from `candidate_parent` using `parent_of`, which returns the
/// current parent of an organization (or `None` for a root). A loop already
/// present in the stored data is also reported as a cycle so the walk always
/// terminates.
pub fn would_create_cycle<F, E>(
  node: Uuid,
  candidate_parent: Uuid,
  mut parent_of: F,
) -> Result<bool, E>
where
  F: FnMut(Uuid) -> Result<Option<Uuid>, E>,
{
  let mut visited = HashSet::new();
  let mut cursor = Some(candidate_parent);
  while let Some(current) = cursor {
    if current == node || !visited.insert(current) {
      return Ok(true);
    }
    cursor = parent_of(current)?;
  }
  Ok(false)
}
