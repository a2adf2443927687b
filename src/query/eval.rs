use bson::{Bson, Document as BsonDocument};
use std::cmp::Ordering;

use super::types::{CmpOp, Filter};

/// Evaluate a filter against a document payload.
///
/// Absent-field semantics follow the backing store's: a `Cmp` never matches
/// an absent field, and a `Regex` only matches a field that is present and
/// a string. A pattern that fails to compile matches nothing.
pub fn eval_filter(doc: &BsonDocument, filter: &Filter) -> bool {
    match filter {
        Filter::True => true,
        Filter::And(fs) => fs.iter().all(|f| eval_filter(doc, f)),
        Filter::Or(fs) => fs.iter().any(|f| eval_filter(doc, f)),
        Filter::Exists { field, exists } => doc.get(field).is_some() == *exists,
        Filter::In { field, values } => {
            doc.get(field).is_some_and(|v| values.iter().any(|x| x == v))
        }
        Filter::Cmp { field, op, value } => {
            if let Some(v) = doc.get(field) {
                match op {
                    CmpOp::Eq => v == value,
                    CmpOp::Gt => compare_bson(v, value) == Ordering::Greater,
                    CmpOp::Gte => compare_bson(v, value) != Ordering::Less,
                    CmpOp::Lt => compare_bson(v, value) == Ordering::Less,
                    CmpOp::Lte => compare_bson(v, value) != Ordering::Greater,
                }
            } else {
                false
            }
        }
        Filter::Regex { field, pattern, case_insensitive } => {
            if let Some(Bson::String(s)) = doc.get(field) {
                let mut re = regex::RegexBuilder::new(pattern);
                re.case_insensitive(*case_insensitive);
                if let Ok(r) = re.build() { r.is_match(s) } else { false }
            } else {
                false
            }
        }
    }
}

/// Order two scalars: numeric types compare as f64, strings lexically,
/// everything else by type rank (enough for the Amount range clauses).
pub fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    fn is_num(x: &Bson) -> bool {
        matches!(x, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_))
    }
    fn as_f64(x: &Bson) -> f64 {
        match x {
            Bson::Int32(i) => f64::from(*i),
            Bson::Int64(i) => *i as f64,
            Bson::Double(f) => *f,
            _ => f64::NAN,
        }
    }
    if is_num(a) && is_num(b) {
        return as_f64(a).total_cmp(&as_f64(b));
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => x.cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &Bson) -> u8 {
    match v {
        Bson::Null => 0,
        Bson::Boolean(_) => 1,
        Bson::Int32(_) => 2,
        Bson::Int64(_) => 3,
        Bson::Double(_) => 4,
        Bson::String(_) => 5,
        Bson::DateTime(_) => 6,
        _ => 7,
    }
}
