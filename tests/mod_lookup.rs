mod common;

use crmlite::Db;
use crmlite::errors::CrmError;
use crmlite::service::record_with_siblings;
use common::seed_record;

#[test]
fn returns_record_and_all_same_email_records() {
    let db = Db::in_memory();
    let id = seed_record(&db, "Ada", "shared@x.com", 10.0);
    seed_record(&db, "Bea", "shared@x.com", 20.0);
    seed_record(&db, "Cleo", "other@x.com", 30.0);

    let out = record_with_siblings(&db, &id).unwrap();
    assert_eq!(out.record.get_str("First Name").unwrap(), "Ada");
    assert_eq!(out.same_email_records.len(), 2);
    assert!(
        out.same_email_records
            .iter()
            .all(|r| r.get_str("Email").unwrap() == "shared@x.com")
    );
    // the found record itself is part of the group
    assert!(out.same_email_records.iter().any(|r| r.get_str("_id").unwrap() == id));
}

#[test]
fn unknown_id_is_not_found() {
    let db = Db::in_memory();
    let missing = uuid::Uuid::new_v4().to_string();
    assert!(matches!(record_with_siblings(&db, &missing), Err(CrmError::NotFound(_))));
}

#[test]
fn malformed_id_is_invalid_argument() {
    let db = Db::in_memory();
    assert!(matches!(
        record_with_siblings(&db, "not-a-uuid"),
        Err(CrmError::InvalidArgument(_))
    ));
}

#[test]
fn empty_email_records_group_together() {
    let db = Db::in_memory();
    // two records without an email, one with an empty one, one with a real one
    let no_mail = crmlite::model::Record {
        first_name: Some("NoMail".into()),
        ..crmlite::model::Record::default()
    };
    let id = db.records().insert(no_mail.to_document().unwrap()).to_string();
    let also_no_mail = crmlite::model::Record {
        first_name: Some("AlsoNoMail".into()),
        ..crmlite::model::Record::default()
    };
    db.records().insert(also_no_mail.to_document().unwrap());
    let blank = crmlite::model::Record {
        first_name: Some("Blank".into()),
        email: Some(String::new()),
        ..crmlite::model::Record::default()
    };
    db.records().insert(blank.to_document().unwrap());
    seed_record(&db, "Real", "real@x.com", 10.0);

    let out = record_with_siblings(&db, &id).unwrap();
    assert_eq!(out.same_email_records.len(), 3);
    assert!(out.same_email_records.iter().all(|r| r.get_str("Email").unwrap_or("").is_empty()));
}

#[test]
fn wire_shape_uses_same_email_records_key() {
    let db = Db::in_memory();
    let id = seed_record(&db, "Ada", "a@x.com", 10.0);
    let out = record_with_siblings(&db, &id).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert!(json.get("record").is_some());
    assert!(json.get("sameEmailRecords").is_some());
}
