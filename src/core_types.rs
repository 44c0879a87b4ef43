//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.
//! They provide semantic meaning and enable future type evolution.

use uuid::Uuid;

/// Dish ID - unique within the dish collection.
///
/// # Constraints:
/// - **Immutable**: Once assigned, NEVER changes
/// - **Opaque**: 32 lowercase hex characters, no ordering meaning
pub type DishId = String;

/// Order ID - unique within the order collection, immutable after assignment.
pub type OrderId = String;

/// Generate a fresh record id.
///
/// Random UUID v4 rendered without hyphens, e.g. `3c637d011d844ebab1205fef8a7e36ea`.
pub fn next_id() -> String {
    Uuid::new_v4().simple().to_string()
}
