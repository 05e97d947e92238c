use crate::domain::common::AggregateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a card entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardEntityId(pub Uuid);

impl CardEntityId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for CardEntityId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CardEntityId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Card entity record as delivered by the list endpoint.
///
/// The client treats it as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEntity {
    pub id: CardEntityId,
    pub name: Option<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl CardEntity {
    /// Sort/filter property names understood by the list endpoint
    pub const PROPERTY_NAME: &'static str = "name";
    pub const PROPERTY_MODIFIED: &'static str = "modified";

    pub fn new(name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CardEntityId::new_v4(),
            name,
            created: now,
            modified: now,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    /// Name for display; missing names render as an empty string
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
