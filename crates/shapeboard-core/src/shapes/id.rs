//! Shape identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
///
/// Shapes created here get a random UUID. Drawings written by other clients
/// may carry numeric or free-form ids; those are kept verbatim so they survive
/// a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeId {
    Uuid(Uuid),
    /// Numeric id, e.g. a timestamp-based one.
    Number(serde_json::Number),
    Text(String),
}

impl ShapeId {
    /// A fresh random id.
    pub fn new() -> Self {
        ShapeId::Uuid(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ShapeId {
    fn from(id: Uuid) -> Self {
        ShapeId::Uuid(id)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeId::Uuid(id) => fmt::Display::fmt(id, f),
            ShapeId::Number(n) => fmt::Display::fmt(n, f),
            ShapeId::Text(s) => f.write_str(s),
        }
    }
}
