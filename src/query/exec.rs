use crate::collection::Collection;
use crate::document::Document;

use super::eval::eval_filter;
use super::types::{Filter, FindOptions};

/// Find documents matching `filter`, then apply the skip/limit window over
/// the collection's insertion order.
#[must_use]
pub fn find_docs(col: &Collection, filter: &Filter, opts: &FindOptions) -> Vec<Document> {
    let matched: Vec<Document> =
        col.all().into_iter().filter(|d| eval_filter(&d.data, filter)).collect();
    let skip = opts.skip.unwrap_or(0);
    let limit = opts.limit.unwrap_or(usize::MAX);
    if skip >= matched.len() {
        return Vec::new();
    }
    let end = skip.saturating_add(limit).min(matched.len());
    matched[skip..end].to_vec()
}

/// Exact match count, independent of any pagination window.
#[must_use]
pub fn count_docs(col: &Collection, filter: &Filter) -> usize {
    col.all().iter().filter(|d| eval_filter(&d.data, filter)).count()
}

/// First match in insertion order.
#[must_use]
pub fn find_first(col: &Collection, filter: &Filter) -> Option<Document> {
    col.all().into_iter().find(|d| eval_filter(&d.data, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn seeded() -> Collection {
        let col = Collection::new("t");
        for i in 0..7 {
            col.insert(doc! { "n": i, "tag": "x" });
        }
        col
    }

    #[test]
    fn window_respects_skip_and_limit() {
        let col = seeded();
        let docs =
            find_docs(&col, &Filter::True, &FindOptions { skip: Some(2), limit: Some(3) });
        let ns: Vec<i32> = docs.iter().map(|d| d.data.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![2, 3, 4]);
    }

    #[test]
    fn skip_past_end_yields_empty() {
        let col = seeded();
        let docs =
            find_docs(&col, &Filter::True, &FindOptions { skip: Some(10), limit: Some(3) });
        assert!(docs.is_empty());
    }

    #[test]
    fn count_ignores_window() {
        let col = seeded();
        assert_eq!(count_docs(&col, &Filter::True), 7);
    }

    #[test]
    fn find_first_in_insertion_order() {
        let col = seeded();
        let first = find_first(&col, &Filter::True).unwrap();
        assert_eq!(first.data.get_i32("n").unwrap(), 0);
    }
}
