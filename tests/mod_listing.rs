mod common;

use bson::Bson;
use crmlite::Db;
use crmlite::errors::CrmError;
use crmlite::service::{ListQuery, list_records};
use common::{seed_many_records, seed_record, seed_user};

fn query(page: &str, limit: &str) -> ListQuery {
    ListQuery { page: Some(page.into()), limit: Some(limit.into()), ..ListQuery::default() }
}

#[test]
fn pages_partition_the_collection() {
    let db = Db::in_memory();
    seed_many_records(&db, 25);

    let page3 = list_records(&db, &query("3", "10")).unwrap();
    assert_eq!(page3.total_records, 25);
    assert_eq!(page3.page, 3);
    assert_eq!(page3.total_pages, 3);
    assert_eq!(page3.records.len(), 5);
}

#[test]
fn empty_collection_has_zero_pages() {
    let db = Db::in_memory();
    let page = list_records(&db, &ListQuery::default()).unwrap();
    assert_eq!(page.total_records, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.records.is_empty());
}

#[test]
fn empty_search_matches_everything() {
    let db = Db::in_memory();
    seed_many_records(&db, 7);
    let page = list_records(&db, &ListQuery::default()).unwrap();
    assert_eq!(page.total_records, 7);
    assert_eq!(page.records.len(), 7);
}

#[test]
fn search_is_case_insensitive_and_spans_fields() {
    let db = Db::in_memory();
    seed_record(&db, "Ada", "ada@x.com", 10.0);
    seed_record(&db, "Bea", "bea@y.com", 20.0);

    let q = ListQuery { search: Some("ADA".into()), ..ListQuery::default() };
    let page = list_records(&db, &q).unwrap();
    assert_eq!(page.total_records, 1);
    assert_eq!(page.records[0].get_str("First Name").unwrap(), "Ada");

    // matches the email field too
    let q = ListQuery { search: Some("@y.com".into()), ..ListQuery::default() };
    let page = list_records(&db, &q).unwrap();
    assert_eq!(page.total_records, 1);
    assert_eq!(page.records[0].get_str("First Name").unwrap(), "Bea");
}

#[test]
fn unmatched_search_yields_an_empty_first_page() {
    let db = Db::in_memory();
    seed_many_records(&db, 5);
    let q = ListQuery { search: Some("zzz-not-there".into()), ..ListQuery::default() };
    let page = list_records(&db, &q).unwrap();
    assert_eq!(page.total_records, 0);
    assert_eq!(page.page, 1);
    assert!(page.records.is_empty());
}

#[test]
fn price_bounds_constrain_amounts() {
    let db = Db::in_memory();
    for (name, amount) in [("A", 10.0), ("B", 50.0), ("C", 90.0)] {
        seed_record(&db, name, &format!("{name}@x.com"), amount);
    }

    let both = ListQuery {
        min_price: Some("20".into()),
        max_price: Some("60".into()),
        ..ListQuery::default()
    };
    let page = list_records(&db, &both).unwrap();
    assert_eq!(page.total_records, 1);
    assert_eq!(page.records[0].get_f64("Amount").unwrap(), 50.0);

    let min_only = ListQuery { min_price: Some("50".into()), ..ListQuery::default() };
    assert_eq!(list_records(&db, &min_only).unwrap().total_records, 2);

    let max_only = ListQuery { max_price: Some("50".into()), ..ListQuery::default() };
    assert_eq!(list_records(&db, &max_only).unwrap().total_records, 2);

    let unparsable = ListQuery {
        min_price: Some("cheap".into()),
        max_price: Some("expensive".into()),
        ..ListQuery::default()
    };
    assert_eq!(list_records(&db, &unparsable).unwrap().total_records, 3);
}

#[test]
fn bounds_are_inclusive() {
    let db = Db::in_memory();
    seed_record(&db, "A", "a@x.com", 50.0);
    let q = ListQuery {
        min_price: Some("50".into()),
        max_price: Some("50".into()),
        ..ListQuery::default()
    };
    assert_eq!(list_records(&db, &q).unwrap().total_records, 1);
}

#[test]
fn matching_user_is_attached_as_user_info() {
    let db = Db::in_memory();
    seed_record(&db, "Ada", "a@x.com", 50.0);
    seed_user(&db, "a@x.com", "Nova");

    let page = list_records(&db, &ListQuery::default()).unwrap();
    assert_eq!(page.total_records, 1);
    let info = page.records[0].get_document("user_info").unwrap();
    assert_eq!(info.get_str("Stage_Name").unwrap(), "Nova");
    assert_eq!(info.get_str("Email_Address").unwrap(), "a@x.com");
    assert!(info.get_str("_id").is_ok());
}

#[test]
fn unmatched_record_gets_null_user_info() {
    let db = Db::in_memory();
    seed_record(&db, "Ada", "nobody@x.com", 50.0);
    seed_user(&db, "someone-else@x.com", "Nova");

    let page = list_records(&db, &ListQuery::default()).unwrap();
    assert_eq!(page.records[0].get("user_info"), Some(&Bson::Null));
}

#[test]
fn enrichment_never_changes_the_counts() {
    let db = Db::in_memory();
    seed_many_records(&db, 12);
    let before = list_records(&db, &query("1", "10")).unwrap();
    // users joining in must not alter totals or page size
    seed_user(&db, "a@x.com", "Nova");
    seed_user(&db, "b@x.com", "Luna");
    let after = list_records(&db, &query("1", "10")).unwrap();
    assert_eq!(before.total_records, after.total_records);
    assert_eq!(before.total_pages, after.total_pages);
    assert_eq!(before.records.len(), after.records.len());
}

#[test]
fn duplicate_user_emails_resolve_to_the_later_user() {
    let db = Db::in_memory();
    seed_record(&db, "Ada", "a@x.com", 50.0);
    seed_user(&db, "a@x.com", "First");
    seed_user(&db, "a@x.com", "Second");

    let page = list_records(&db, &ListQuery::default()).unwrap();
    let info = page.records[0].get_document("user_info").unwrap();
    assert_eq!(info.get_str("Stage_Name").unwrap(), "Second");
}

#[test]
fn record_without_email_is_listed_with_null_user_info() {
    let db = Db::in_memory();
    let r = crmlite::model::Record {
        first_name: Some("NoMail".into()),
        magazine: Some("Vogue".into()),
        ..crmlite::model::Record::default()
    };
    db.records().insert(r.to_document().unwrap());
    seed_user(&db, "a@x.com", "Nova");

    let page = list_records(&db, &ListQuery::default()).unwrap();
    assert_eq!(page.total_records, 1);
    assert_eq!(page.records[0].get("user_info"), Some(&Bson::Null));
}

#[test]
fn zero_limit_is_rejected() {
    let db = Db::in_memory();
    seed_many_records(&db, 3);
    let q = ListQuery { limit: Some("0".into()), ..ListQuery::default() };
    assert!(matches!(list_records(&db, &q), Err(CrmError::InvalidArgument(_))));
}

#[test]
fn envelope_serializes_with_wire_field_names() {
    let db = Db::in_memory();
    seed_record(&db, "Ada", "a@x.com", 50.0);
    let page = list_records(&db, &ListQuery::default()).unwrap();
    let json = serde_json::to_value(&page).unwrap();
    assert!(json.get("totalRecords").is_some());
    assert!(json.get("totalPages").is_some());
    assert!(json.get("records").is_some());
}
