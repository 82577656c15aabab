//! Shared export surface for the data-holder types.

use serde_json::Value;

/// Debug/export serialization in three flavors: a comma-delimited line, a
/// minimal tagged-markup string, and a JSON-compatible mapping.
///
/// These are one-way export forms; only the types that document it (Timing,
/// PlanetaryHour) also parse the csv and markup forms back.
pub trait Storable {
    fn csv(&self) -> String;

    fn markup(&self) -> String;

    fn json(&self) -> Value;
}
