//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// This is the id format for every block and variable. UUID v7 carries a
/// timestamp, so ids sort in creation order.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
