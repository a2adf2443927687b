use bson::{Bson, Document as BsonDocument};
use serde::Serialize;

use crate::Db;
use crate::errors::CrmError;
use crate::model::record;
use crate::query::{self, CmpOp, Filter, FindOptions};
use crate::types::DocumentId;

/// A record together with every record sharing its email value, the found
/// record included. No pagination applies.
#[derive(Debug, Serialize)]
pub struct RecordWithSiblings {
    pub record: BsonDocument,
    #[serde(rename = "sameEmailRecords")]
    pub same_email_records: Vec<BsonDocument>,
}

/// Fetch one record by id plus its same-email siblings.
///
/// When the record's email is absent or empty, the sibling group is the
/// other records whose email is likewise absent or empty; they share the
/// same "no source" bucket rather than having no siblings.
pub fn record_with_siblings(db: &Db, id: &str) -> Result<RecordWithSiblings, CrmError> {
    let id = DocumentId::parse(id)?;
    let found = db.records().get(&id).ok_or_else(CrmError::record_not_found)?;

    let email = found.data.get_str(record::fields::EMAIL).unwrap_or("");
    let filter = if email.is_empty() {
        Filter::Or(vec![
            Filter::Exists { field: record::fields::EMAIL.into(), exists: false },
            Filter::Cmp {
                field: record::fields::EMAIL.into(),
                op: CmpOp::Eq,
                value: Bson::String(String::new()),
            },
            Filter::Cmp { field: record::fields::EMAIL.into(), op: CmpOp::Eq, value: Bson::Null },
        ])
    } else {
        Filter::Cmp {
            field: record::fields::EMAIL.into(),
            op: CmpOp::Eq,
            value: Bson::String(email.to_string()),
        }
    };

    let same_email_records = query::find_docs(db.records(), &filter, &FindOptions::default())
        .iter()
        .map(crate::document::Document::to_public)
        .collect();

    Ok(RecordWithSiblings { record: found.to_public(), same_email_records })
}
