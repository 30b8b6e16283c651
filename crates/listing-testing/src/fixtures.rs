//! Deterministic fixtures for testing.
//!
//! Fixtures are plain JSON so that any widget crate can deserialize them
//! into its own row and option types.

use serde_json::{json, Value};

const LAST_NAMES: [&str; 10] = [
    "Anderson", "Brown", "Chen", "Diaz", "Evans", "Fischer", "Garcia", "Hughes", "Ito", "Jensen",
];
const FIRST_NAMES: [&str; 8] = ["Alice", "Bob", "Carmen", "Dmitri", "Eve", "Farah", "Gus", "Hana"];
const ORGANIZATIONS: [&str; 3] = ["North Clinic", "Riverside Health", "St. Anne"];
const STATUSES: [&str; 3] = ["active", "inactive", "pending"];

/// Collection of deterministic test fixtures.
pub struct Fixtures;

impl Fixtures {
    /// `count` patient records with ids `1..=count`.
    ///
    /// Every record has `id`, `lastname`, `firstname`, `email`, `mrn`,
    /// `organization`, `status` and `age`. Every seventh record has no
    /// email so tests see missing fields.
    pub fn patients(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|id| {
                let last = LAST_NAMES[(id * 7) % LAST_NAMES.len()];
                let first = FIRST_NAMES[(id * 3) % FIRST_NAMES.len()];
                let email = if id % 7 == 0 {
                    Value::Null
                } else {
                    json!(format!(
                        "{}.{}@example.org",
                        first.to_lowercase(),
                        last.to_lowercase()
                    ))
                };
                json!({
                    "id": id,
                    "lastname": last,
                    "firstname": first,
                    "email": email,
                    "mrn": format!("MRN-{:05}", 10_000 + id * 37),
                    "organization": ORGANIZATIONS[id % ORGANIZATIONS.len()],
                    "status": STATUSES[id % STATUSES.len()],
                    "age": 18 + (id * 11) % 70,
                })
            })
            .collect()
    }

    /// The patient records as a JSON array string.
    pub fn patients_json(count: usize) -> String {
        Value::Array(Self::patients(count)).to_string()
    }

    /// Status filter options as a JSON array of `{id, display}` objects.
    pub fn status_options() -> Value {
        json!([
            { "id": "active", "display": "Active" },
            { "id": "inactive", "display": "Inactive" },
            { "id": "pending", "display": "Pending review" },
        ])
    }

    /// The status options as a JSON string.
    pub fn status_options_json() -> String {
        Self::status_options().to_string()
    }
}
