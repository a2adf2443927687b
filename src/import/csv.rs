use std::io::Read;

use bson::{Bson, Document as BsonDocument};

use crate::collection::Collection;
use crate::errors::CrmError;
use crate::model::{parse_date, record, user};

use super::options::{ImportOptions, ImportReport};

/// Import record rows. Columns are matched to the record schema by header
/// name; unknown columns are ignored and empty cells leave the attribute
/// absent, the shape direct creation produces too.
pub fn import_records_csv<R: Read>(
    col: &Collection,
    reader: R,
    opts: &ImportOptions,
) -> Result<ImportReport, CrmError> {
    import_csv(col, reader, opts, record::SEARCHABLE_FIELDS, record::NUMERIC_FIELDS, record::DATE_FIELDS)
}

/// Import user rows against the user schema's header list.
pub fn import_users_csv<R: Read>(
    col: &Collection,
    reader: R,
    opts: &ImportOptions,
) -> Result<ImportReport, CrmError> {
    import_csv(col, reader, opts, user::STRING_FIELDS, &[], user::DATE_FIELDS)
}

fn import_csv<R: Read>(
    col: &Collection,
    reader: R,
    opts: &ImportOptions,
    string_fields: &[&str],
    numeric_fields: &[&str],
    date_fields: &[&str],
) -> Result<ImportReport, CrmError> {
    let mut rdr =
        csv::ReaderBuilder::new().has_headers(true).delimiter(opts.delimiter).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map(|h| h.iter().map(str::to_string).collect())
        .map_err(|e| CrmError::Io(e.to_string()))?;

    let mut report = ImportReport::default();
    let mut batch: Vec<BsonDocument> = Vec::with_capacity(opts.batch_size.max(1));
    let mut row_no: usize = 0;
    for rec in rdr.records() {
        row_no += 1;
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                if opts.skip_errors {
                    log::warn!("import: skipping row {row_no}: {e}");
                    report.skipped += 1;
                    continue;
                }
                return Err(CrmError::Io(e.to_string()));
            }
        };
        match map_row(&rec, &headers, string_fields, numeric_fields, date_fields) {
            Ok(doc) => {
                batch.push(doc);
                report.inserted += 1;
                if batch.len() >= opts.batch_size.max(1) {
                    col.insert_many(std::mem::take(&mut batch));
                }
                if let Some(n) = opts.progress_every
                    && row_no % n == 0
                {
                    log::info!("import: {} rows into {}", report.inserted, col.name());
                }
            }
            Err(msg) => {
                if opts.skip_errors {
                    log::warn!("import: skipping row {row_no}: {msg}");
                    report.skipped += 1;
                    continue;
                }
                return Err(CrmError::Validation(format!("row {row_no}: {msg}")));
            }
        }
    }
    if !batch.is_empty() {
        col.insert_many(batch);
    }
    log::info!(
        "import: done, {} inserted / {} skipped into {}",
        report.inserted,
        report.skipped,
        col.name()
    );
    Ok(report)
}

fn map_row(
    rec: &csv::StringRecord,
    headers: &[String],
    string_fields: &[&str],
    numeric_fields: &[&str],
    date_fields: &[&str],
) -> Result<BsonDocument, String> {
    let mut doc = BsonDocument::new();
    for (i, cell) in rec.iter().enumerate() {
        let Some(header) = headers.get(i) else { continue };
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        let key = header.as_str();
        if numeric_fields.contains(&key) {
            let n = cell
                .parse::<f64>()
                .map_err(|_| format!("\"{key}\" must be a number, got {cell:?}"))?;
            doc.insert(key, Bson::Double(n));
        } else if date_fields.contains(&key) {
            // an unreadable date leaves the field absent rather than
            // poisoning the row
            if let Some(dt) = parse_date(cell) {
                doc.insert(key, Bson::DateTime(dt));
            }
        } else if string_fields.contains(&key) {
            doc.insert(key, Bson::String(cell.to_string()));
        }
    }
    Ok(doc)
}
