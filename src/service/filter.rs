use bson::Bson;

use crate::model::{record, user};
use crate::query::{CmpOp, Filter};

/// Build the record listing predicate: a disjunction of case-insensitive
/// pattern matches across every string attribute, intersected with an
/// optional Amount range.
///
/// The search text is used as the pattern verbatim; an empty search yields
/// an empty pattern, which matches every record. That is the intended
/// default-listing behavior, not an accident.
#[must_use]
pub fn record_search_filter(search: &str, min_price: Option<f64>, max_price: Option<f64>) -> Filter {
    let text = search_clause(record::SEARCHABLE_FIELDS, search);
    let mut clauses = vec![text];
    if let Some(lo) = min_price {
        clauses.push(Filter::Cmp {
            field: record::fields::AMOUNT.into(),
            op: CmpOp::Gte,
            value: Bson::Double(lo),
        });
    }
    if let Some(hi) = max_price {
        clauses.push(Filter::Cmp {
            field: record::fields::AMOUNT.into(),
            op: CmpOp::Lte,
            value: Bson::Double(hi),
        });
    }
    if clauses.len() == 1 {
        clauses.remove(0)
    } else {
        Filter::And(clauses)
    }
}

/// The users listing predicate: text search only, no range clause.
#[must_use]
pub fn user_search_filter(search: &str) -> Filter {
    search_clause(user::SEARCHABLE_FIELDS, search)
}

fn search_clause(fields: &[&str], search: &str) -> Filter {
    Filter::Or(
        fields
            .iter()
            .map(|f| Filter::Regex {
                field: (*f).to_string(),
                pattern: search.to_string(),
                case_insensitive: true,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount_bounds(f: &Filter) -> Vec<(CmpOp, f64)> {
        match f {
            Filter::And(cs) => cs
                .iter()
                .filter_map(|c| match c {
                    Filter::Cmp { field, op, value: Bson::Double(v) }
                        if field == record::fields::AMOUNT =>
                    {
                        Some((*op, *v))
                    }
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn no_bounds_means_no_amount_clause() {
        let f = record_search_filter("", None, None);
        assert!(matches!(f, Filter::Or(_)));
    }

    #[test]
    fn both_bounds_apply_gte_and_lte() {
        let f = record_search_filter("x", Some(10.0), Some(90.0));
        let bounds = amount_bounds(&f);
        assert!(bounds.contains(&(CmpOp::Gte, 10.0)));
        assert!(bounds.contains(&(CmpOp::Lte, 90.0)));
    }

    #[test]
    fn single_bound_is_one_sided() {
        let f = record_search_filter("", Some(10.0), None);
        assert_eq!(amount_bounds(&f), vec![(CmpOp::Gte, 10.0)]);
        let f = record_search_filter("", None, Some(90.0));
        assert_eq!(amount_bounds(&f), vec![(CmpOp::Lte, 90.0)]);
    }

    #[test]
    fn search_spans_every_string_field() {
        let f = record_search_filter("vogue", None, None);
        let Filter::Or(clauses) = f else { panic!("expected a disjunction") };
        assert_eq!(clauses.len(), record::SEARCHABLE_FIELDS.len());
        assert!(clauses.iter().all(|c| matches!(
            c,
            Filter::Regex { pattern, case_insensitive: true, .. } if pattern == "vogue"
        )));
    }
}
