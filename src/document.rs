use bson::Document as BsonDocument;
use serde::{Deserialize, Serialize};

use crate::types::DocumentId;

/// A stored document: a flat BSON payload plus identity and timestamps.
///
/// `created_at`/`updated_at` are maintained by the store itself, never by
/// callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub data: BsonDocument,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl Document {
    #[must_use]
    pub fn new(data: BsonDocument) -> Self {
        let now = bson::DateTime::now();
        Self { id: DocumentId::new(), data, created_at: now, updated_at: now }
    }

    /// The caller-facing view: payload fields plus `_id`, `createdAt` and
    /// `updatedAt`, the shape the listing and CRUD surfaces return.
    #[must_use]
    pub fn to_public(&self) -> BsonDocument {
        let mut out = self.data.clone();
        out.insert("_id", self.id.to_string());
        out.insert("createdAt", bson::Bson::DateTime(self.created_at));
        out.insert("updatedAt", bson::Bson::DateTime(self.updated_at));
        out
    }
}
