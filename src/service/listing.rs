use std::collections::{HashMap, HashSet};

use bson::{Bson, Document as BsonDocument};
use serde::Serialize;

use crate::Db;
use crate::errors::CrmError;
use crate::model::{record, user};
use crate::query::{self, Filter, FindOptions};

use super::filter::record_search_filter;

/// Raw listing parameters as they arrive from the caller. Numeric fields
/// are text on purpose: parsing with defaulting is part of this component's
/// contract (unparsable page/limit fall back to 1/10, unparsable price
/// bounds are silently not applied).
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

pub(super) struct Normalized {
    pub page: u64,
    pub limit: u64,
    pub search: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListQuery {
    pub(super) fn normalize(&self) -> Result<Normalized, CrmError> {
        // An explicit zero limit is the one input rejected outright: page
        // math divides by it.
        if self.limit.as_deref().and_then(|s| s.trim().parse::<u64>().ok()) == Some(0) {
            return Err(CrmError::InvalidArgument("limit must be at least 1".into()));
        }
        let page = parse_or(self.page.as_deref(), 1).max(1);
        let limit = parse_or(self.limit.as_deref(), 10).max(1);
        let search = self.search.clone().unwrap_or_default();
        Ok(Normalized {
            page,
            limit,
            search,
            min_price: parse_price(self.min_price.as_deref()),
            max_price: parse_price(self.max_price.as_deref()),
        })
    }
}

fn parse_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(default)
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).filter(|v| v.is_finite())
}

/// Listing envelope. Serialized field names match the wire shape
/// (`totalRecords`, `totalPages`, ...).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub total_records: u64,
    pub page: u64,
    pub total_pages: u64,
    pub records: Vec<BsonDocument>,
}

/// Serve one page of filtered records, each annotated with a best-effort
/// matching user profile under `user_info`.
///
/// The count and the page fetch are two independent reads, and the user
/// batch fetch is a third; no isolation is provided between them, so the
/// totals may disagree with the page under concurrent writes. That is
/// accepted, not corrected.
pub fn list_records(db: &Db, query: &ListQuery) -> Result<RecordPage, CrmError> {
    let q = query.normalize()?;
    let skip = (q.page - 1).saturating_mul(q.limit);
    let filter = record_search_filter(&q.search, q.min_price, q.max_price);

    let total_records = query::count_docs(db.records(), &filter) as u64;
    let docs = query::find_docs(
        db.records(),
        &filter,
        &FindOptions {
            skip: Some(usize::try_from(skip).unwrap_or(usize::MAX)),
            limit: Some(usize::try_from(q.limit).unwrap_or(usize::MAX)),
        },
    );

    // Only the emails present on this page drive the user fetch; never the
    // whole filtered set.
    let mut seen = HashSet::new();
    let emails: Vec<Bson> = docs
        .iter()
        .filter_map(|d| d.data.get_str(record::fields::EMAIL).ok())
        .filter(|e| !e.is_empty())
        .filter(|e| seen.insert(e.to_string()))
        .map(|e| Bson::String(e.to_string()))
        .collect();

    let matched_users = if emails.is_empty() {
        Vec::new()
    } else {
        query::find_docs(
            db.users(),
            &Filter::In { field: user::fields::EMAIL_ADDRESS.into(), values: emails },
            &FindOptions::default(),
        )
    };

    // Email -> user map; a duplicated user email means the later user wins.
    let mut by_email: HashMap<String, BsonDocument> = HashMap::new();
    for u in &matched_users {
        if let Ok(e) = u.data.get_str(user::fields::EMAIL_ADDRESS) {
            by_email.insert(e.to_string(), u.to_public());
        }
    }

    let records = docs
        .into_iter()
        .map(|d| {
            let info = d
                .data
                .get_str(record::fields::EMAIL)
                .ok()
                .and_then(|e| by_email.get(e))
                .cloned();
            let mut out = d.to_public();
            out.insert("user_info", info.map_or(Bson::Null, Bson::Document));
            out
        })
        .collect();

    Ok(RecordPage {
        total_records,
        page: q.page,
        total_pages: total_records.div_ceil(q.limit),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_defaults() {
        let n = ListQuery::default().normalize().unwrap();
        assert_eq!((n.page, n.limit), (1, 10));
        assert_eq!(n.search, "");
        assert!(n.min_price.is_none() && n.max_price.is_none());
    }

    #[test]
    fn unparsable_inputs_degrade_silently() {
        let q = ListQuery {
            page: Some("abc".into()),
            limit: Some("-3".into()),
            min_price: Some("cheap".into()),
            max_price: Some("".into()),
            search: None,
        };
        let n = q.normalize().unwrap();
        assert_eq!((n.page, n.limit), (1, 10));
        assert!(n.min_price.is_none() && n.max_price.is_none());
    }

    #[test]
    fn zero_page_becomes_first_page() {
        let q = ListQuery { page: Some("0".into()), ..ListQuery::default() };
        assert_eq!(q.normalize().unwrap().page, 1);
    }

    #[test]
    fn zero_limit_fails_fast() {
        let q = ListQuery { limit: Some("0".into()), ..ListQuery::default() };
        assert!(matches!(q.normalize(), Err(CrmError::InvalidArgument(_))));
    }
}
