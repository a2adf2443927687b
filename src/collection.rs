use parking_lot::RwLock;
use bson::{Bson, Document as BsonDocument};

use crate::document::Document;
use crate::types::DocumentId;

/// A named, insertion-ordered collection of documents.
///
/// Documents are held in insertion order, which is also the order queries
/// return them in; pagination windows are therefore stable across calls as
/// long as no interleaved writes occur. No isolation is provided between
/// separate calls (a count followed by a fetch may observe different data
/// under concurrent writers).
pub struct Collection {
    name: String,
    docs: RwLock<Vec<Document>>,
}

impl Collection {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), docs: RwLock::new(Vec::new()) }
    }

    #[must_use]
    pub fn with_documents(name: impl Into<String>, docs: Vec<Document>) -> Self {
        Self { name: name.into(), docs: RwLock::new(docs) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&self, data: BsonDocument) -> DocumentId {
        let doc = Document::new(data);
        let id = doc.id;
        self.docs.write().push(doc);
        id
    }

    pub fn insert_many(&self, batch: Vec<BsonDocument>) -> Vec<DocumentId> {
        let mut docs = self.docs.write();
        batch
            .into_iter()
            .map(|data| {
                let doc = Document::new(data);
                let id = doc.id;
                docs.push(doc);
                id
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: &DocumentId) -> Option<Document> {
        self.docs.read().iter().find(|d| d.id == *id).cloned()
    }

    /// Find-by-id-and-update (merge): set the given fields on the payload,
    /// bump `updated_at`, and return the post-update document. `None` when
    /// the id is unknown.
    pub fn set_fields(&self, id: &DocumentId, fields: &[(String, Bson)]) -> Option<Document> {
        let mut docs = self.docs.write();
        let doc = docs.iter_mut().find(|d| d.id == *id)?;
        for (k, v) in fields {
            doc.data.insert(k.clone(), v.clone());
        }
        doc.updated_at = bson::DateTime::now();
        Some(doc.clone())
    }

    /// Find-by-id-and-delete. Returns whether a document was removed.
    pub fn remove(&self, id: &DocumentId) -> bool {
        let mut docs = self.docs.write();
        match docs.iter().position(|d| d.id == *id) {
            Some(i) => {
                docs.remove(i);
                true
            }
            None => false,
        }
    }

    /// Snapshot of all documents in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Document> {
        self.docs.read().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}
