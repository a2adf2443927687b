#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub delimiter: u8,
    pub batch_size: usize,
    pub skip_errors: bool,
    pub progress_every: Option<usize>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { delimiter: b',', batch_size: 1000, skip_errors: true, progress_every: Some(1000) }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: u64,
    pub skipped: u64,
}
