use serde::{Deserialize, Serialize};

/// Client log entry posted to `/api/logs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLogRequest {
    /// "client" or "server"
    pub source: String,
    pub category: String,
    pub message: String,
}

impl CreateLogRequest {
    pub fn client(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: "client".to_string(),
            category: category.into(),
            message: message.into(),
        }
    }
}
