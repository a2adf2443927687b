use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CrmError;

/// Unique document identifier. Assigned at insert time and immutable after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its string form (CLI or path argument).
    pub fn parse(s: &str) -> Result<Self, CrmError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| CrmError::InvalidArgument(format!("malformed id: {s}")))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
