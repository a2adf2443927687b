mod csv;
mod options;

pub use self::csv::{import_records_csv, import_users_csv};
pub use self::options::{ImportOptions, ImportReport};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::Db;
use crate::errors::CrmError;

/// Import a spreadsheet (CSV) of record rows from disk.
pub fn import_records_file<P: AsRef<Path>>(
    db: &Db,
    path: P,
    opts: &ImportOptions,
) -> Result<ImportReport, CrmError> {
    log::info!("import: records from {}", path.as_ref().display());
    let file = File::open(&path)?;
    import_records_csv(db.records(), BufReader::new(file), opts)
}

/// Import a spreadsheet (CSV) of user rows from disk.
pub fn import_users_file<P: AsRef<Path>>(
    db: &Db,
    path: P,
    opts: &ImportOptions,
) -> Result<ImportReport, CrmError> {
    log::info!("import: users from {}", path.as_ref().display());
    let file = File::open(&path)?;
    import_users_csv(db.users(), BufReader::new(file), opts)
}
