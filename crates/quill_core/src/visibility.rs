use serde::{Deserialize, Serialize};

use crate::model::Entry;

/// Restricts which entries a reader may see: the signed-in owner reads
/// their own entries, everyone else reads published ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Owner(String),
    Published,
}

pub fn is_visible(entry: &Entry, scope: &Scope) -> bool {
    match scope {
        Scope::Owner(uid) => entry.owner_id == *uid,
        Scope::Published => entry.is_published,
    }
}
