//! Identifier generation for entities, exercises, and sets.
//!
//! Ids only need to be unique strings; nothing parses them back. Entity ids
//! are unique across the whole store, exercise ids within their entity, and
//! set ids within their exercise, so a v4 UUID comfortably covers all three
//! scopes. Ids are never reused after deletion.

use uuid::Uuid;

/// Generate a fresh opaque identifier
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
