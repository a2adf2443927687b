pub mod collection;
pub mod document;
pub mod errors;
pub mod import;
pub mod logger;
pub mod model;
pub mod query;
pub mod service;
pub mod types;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::collection::Collection;
use crate::document::Document;
use crate::errors::CrmError;

pub const RECORDS: &str = "records";
pub const USERS: &str = "users";

/// Handle on the two collections the backend serves. Cheap to share behind
/// an `Arc`; all interior state is lock-protected, and every service call
/// is an independent read or write with no cross-call isolation.
pub struct Db {
    records: Collection,
    users: Collection,
    dir: Option<PathBuf>,
}

impl Db {
    /// A database with no backing directory. Used by tests and one-shot
    /// tooling; `flush` is a no-op.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            records: Collection::new(RECORDS),
            users: Collection::new(USERS),
            dir: None,
        }
    }

    /// Open (or create) a database directory, loading the per-collection
    /// snapshots if present.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, CrmError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        let records =
            Collection::with_documents(RECORDS, load_snapshot(&snapshot_path(&dir, RECORDS))?);
        let users = Collection::with_documents(USERS, load_snapshot(&snapshot_path(&dir, USERS))?);
        log::info!(
            "db opened at {} ({} records, {} users)",
            dir.display(),
            records.len(),
            users.len()
        );
        Ok(Self { records, users, dir: Some(dir) })
    }

    #[must_use]
    pub fn records(&self) -> &Collection {
        &self.records
    }

    #[must_use]
    pub fn users(&self) -> &Collection {
        &self.users
    }

    /// Write both collections back to their snapshot files. Each snapshot
    /// is written to a temp file and swapped in, so a crash mid-flush
    /// leaves the previous snapshot intact.
    pub fn flush(&self) -> Result<(), CrmError> {
        let Some(dir) = &self.dir else { return Ok(()) };
        save_snapshot(&snapshot_path(dir, RECORDS), &self.records.all())?;
        save_snapshot(&snapshot_path(dir, USERS), &self.users.all())?;
        Ok(())
    }
}

fn snapshot_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.bson"))
}

fn load_snapshot(path: &Path) -> Result<Vec<Document>, CrmError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = BufReader::new(File::open(path)?);
    let mut docs = Vec::new();
    loop {
        match bson::Document::from_reader(&mut reader) {
            Ok(raw) => docs.push(bson::from_document::<Document>(raw)?),
            Err(_) => break, // end of stream (or truncation: load what we can)
        }
    }
    Ok(docs)
}

fn save_snapshot(path: &Path, docs: &[Document]) -> Result<(), CrmError> {
    let tmp = path.with_extension("bson.tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        for doc in docs {
            let raw = bson::to_document(doc)?;
            let mut buf = Vec::new();
            raw.to_writer(&mut buf)?;
            writer.write_all(&buf)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Initializes the backend. Call before any other operation; sets up the
/// logger.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
