#![allow(dead_code)]

use crmlite::Db;
use crmlite::model::{Record, User};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};

pub fn seed_record(db: &Db, first: &str, email: &str, amount: f64) -> String {
    let r = Record {
        first_name: Some(first.to_string()),
        last_name: Some("Doe".to_string()),
        magazine: Some("Vogue".to_string()),
        email: Some(email.to_string()),
        amount: Some(amount),
        ..Record::default()
    };
    db.records().insert(r.to_document().unwrap()).to_string()
}

pub fn seed_user(db: &Db, email: &str, stage_name: &str) -> String {
    let u = User {
        email_address: Some(email.to_string()),
        stage_name: Some(stage_name.to_string()),
        model_type: Some("Model".to_string()),
        ..User::default()
    };
    db.users().insert(u.to_document().unwrap()).to_string()
}

/// Bulk-seed records with generated names/emails and ascending amounts.
pub fn seed_many_records(db: &Db, n: usize) {
    for i in 0..n {
        let r = Record {
            first_name: Some(FirstName().fake()),
            last_name: Some(LastName().fake()),
            magazine: Some("Vogue".to_string()),
            email: Some(SafeEmail().fake()),
            amount: Some(10.0 * (i as f64 + 1.0)),
            ..Record::default()
        };
        db.records().insert(r.to_document().unwrap());
    }
}
