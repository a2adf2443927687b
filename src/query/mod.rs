// Submodules for separation of concerns
mod eval;
mod exec;
mod types;

pub use eval::{compare_bson, eval_filter};
pub use exec::{count_docs, find_docs, find_first};
pub use types::{CmpOp, Filter, FindOptions};
