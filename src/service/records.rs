use bson::{Bson, Document as BsonDocument};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::Db;
use crate::errors::CrmError;
use crate::model::record::{self, NewRecord, filter_update_fields};
use crate::types::DocumentId;

/// Create a record from a raw body, applying the strict create-path
/// validation. Returns the stored document.
pub fn create_record(db: &Db, body: &JsonValue) -> Result<BsonDocument, CrmError> {
    let new_record = NewRecord::from_value(body)?;
    let data = new_record.into_record().to_document()?;
    let id = db.records().insert(data);
    log::info!("record created: {id}");
    db.records().get(&id).map(|d| d.to_public()).ok_or_else(CrmError::record_not_found)
}

/// Bare fetch by id.
pub fn record_by_id(db: &Db, id: &str) -> Result<BsonDocument, CrmError> {
    let id = DocumentId::parse(id)?;
    db.records().get(&id).map(|d| d.to_public()).ok_or_else(CrmError::record_not_found)
}

/// Sparse update: empty-valued keys are discarded, the remainder is
/// type-checked and merged into the record. An all-empty body is rejected
/// before the id is even looked at, so the empty-body error wins over an
/// unknown id.
pub fn update_record(
    db: &Db,
    id: &str,
    body: &JsonMap<String, JsonValue>,
) -> Result<BsonDocument, CrmError> {
    let fields = filter_update_fields(body)?;
    let id = DocumentId::parse(id)?;
    let updated =
        db.records().set_fields(&id, &fields).ok_or_else(CrmError::record_not_found)?;
    log::info!("record updated: {id} ({} fields)", fields.len());
    Ok(updated.to_public())
}

/// Notes-only update: always overwrites `Notes` with the given text.
pub fn update_notes(db: &Db, id: &str, note: &str) -> Result<BsonDocument, CrmError> {
    let id = DocumentId::parse(id)?;
    let fields = [(record::fields::NOTES.to_string(), Bson::String(note.to_string()))];
    let updated =
        db.records().set_fields(&id, &fields).ok_or_else(CrmError::record_not_found)?;
    Ok(updated.to_public())
}

pub fn delete_record(db: &Db, id: &str) -> Result<(), CrmError> {
    let id = DocumentId::parse(id)?;
    if !db.records().remove(&id) {
        return Err(CrmError::record_not_found());
    }
    log::info!("record deleted: {id}");
    Ok(())
}
