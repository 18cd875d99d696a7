use std::path::Path;
use tracing::{debug, trace};

use crate::batch::split_name;

use super::ExecutorError;

/// Upper bound on `_N` suffixes tried for one name
pub const MAX_COLLISION_ATTEMPTS: usize = 10_000;

/// Find a free name in `directory`, starting from `desired_name`.
///
/// If the name is taken, `{stem}_{n}{ext}` is tried for n = 1, 2, ... and
/// the first free one is returned. Checks run against the live filesystem,
/// so earlier renames in the same batch are taken into account.
pub fn resolve_collision(directory: &Path, desired_name: &str) -> Result<String, ExecutorError> {
    if !directory.join(desired_name).exists() {
        return Ok(desired_name.to_string());
    }

    let (stem, extension) = split_name(Path::new(desired_name));

    for counter in 1..=MAX_COLLISION_ATTEMPTS {
        let candidate = format!("{}_{}{}", stem, counter, extension);
        trace!(candidate = %candidate, "Trying name");

        if !directory.join(&candidate).exists() {
            debug!(desired = %desired_name, resolved = %candidate, "Resolved collision");
            return Ok(candidate);
        }
    }

    Err(ExecutorError::CollisionExhausted {
        name: desired_name.to_string(),
        attempts: MAX_COLLISION_ATTEMPTS,
    })
}
