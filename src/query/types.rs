use bson::Bson;

/// Windowing options for `find_docs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindOptions {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Predicate over a stored document's payload. Mirrors the filter-object
/// query language the services speak to the store.
#[derive(Debug, Clone)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Exists { field: String, exists: bool },
    In { field: String, values: Vec<Bson> },
    Cmp { field: String, op: CmpOp, value: Bson },
    Regex { field: String, pattern: String, case_insensitive: bool },
}
