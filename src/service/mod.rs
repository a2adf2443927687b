// One authoritative version of each endpoint behavior lives here; the
// store is reached only through the query module and collection handles.
mod filter;
mod listing;
mod lookup;
mod records;
mod users;

pub use filter::{record_search_filter, user_search_filter};
pub use listing::{ListQuery, RecordPage, list_records};
pub use lookup::{RecordWithSiblings, record_with_siblings};
pub use records::{create_record, delete_record, record_by_id, update_record, update_notes};
pub use users::{UserPage, list_users, user_by_email};
