pub mod record;
pub mod user;

pub use record::{NewRecord, Record};
pub use user::User;

use chrono::{NaiveDate, Utc};

/// Parse a date out of caller-supplied text. Accepts RFC 3339 plus the two
/// spreadsheet formats seen in imported data; `None` when nothing matches.
pub(crate) fn parse_date(s: &str) -> Option<bson::DateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(bson::DateTime::from_millis(dt.timestamp_millis()));
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?.and_local_timezone(Utc).single()?;
            return Some(bson::DateTime::from_millis(dt.timestamp_millis()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::parse_date;

    #[test]
    fn parses_common_formats() {
        assert!(parse_date("1999-04-21").is_some());
        assert!(parse_date("04/21/1999").is_some());
        assert!(parse_date("1999-04-21T10:30:00Z").is_some());
        assert!(parse_date("not a date").is_none());
    }
}
