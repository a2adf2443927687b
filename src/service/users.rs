use bson::{Bson, Document as BsonDocument};
use serde::Serialize;

use crate::Db;
use crate::errors::CrmError;
use crate::model::user;
use crate::query::{self, CmpOp, Filter, FindOptions};

use super::filter::user_search_filter;
use super::listing::ListQuery;

/// Users listing envelope: same pagination shape as the records listing,
/// no cross-entity enrichment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub total_records: u64,
    pub page: u64,
    pub total_pages: u64,
    pub users: Vec<BsonDocument>,
}

pub fn list_users(db: &Db, query: &ListQuery) -> Result<UserPage, CrmError> {
    let q = query.normalize()?;
    let skip = (q.page - 1).saturating_mul(q.limit);
    let filter = user_search_filter(&q.search);

    let total_records = query::count_docs(db.users(), &filter) as u64;
    let users = query::find_docs(
        db.users(),
        &filter,
        &FindOptions {
            skip: Some(usize::try_from(skip).unwrap_or(usize::MAX)),
            limit: Some(usize::try_from(q.limit).unwrap_or(usize::MAX)),
        },
    )
    .iter()
    .map(crate::document::Document::to_public)
    .collect();

    Ok(UserPage {
        total_records,
        page: q.page,
        total_pages: total_records.div_ceil(q.limit),
        users,
    })
}

/// Find a user by either of their email attributes. The first match in
/// insertion order wins.
pub fn user_by_email(db: &Db, email: &str) -> Result<BsonDocument, CrmError> {
    if email.is_empty() {
        return Err(CrmError::InvalidArgument("email address is required".into()));
    }
    let value = Bson::String(email.to_string());
    let filter = Filter::Or(vec![
        Filter::Cmp {
            field: user::fields::EMAIL_ADDRESS.into(),
            op: CmpOp::Eq,
            value: value.clone(),
        },
        Filter::Cmp { field: user::fields::EMAIL_ADDRESS_2.into(), op: CmpOp::Eq, value },
    ]);
    query::find_first(db.users(), &filter)
        .map(|d| d.to_public())
        .ok_or_else(CrmError::user_not_found)
}
