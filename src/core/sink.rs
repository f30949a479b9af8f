use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::record::LogCallRecord;
use crate::error::Result;

/// Consumer of completed records, e.g. a source patcher
pub trait RecordSink {
    fn accept(&mut self, record: LogCallRecord) -> Result<()>;
}

impl RecordSink for Vec<LogCallRecord> {
    fn accept(&mut self, record: LogCallRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Records grouped per source file, in the order a patcher would apply them.
///
/// Each file needs exactly one logger declaration no matter how many of its
/// call-sites are migrated.
#[derive(Debug, Clone, Default)]
pub struct PatchPlan {
    files: BTreeMap<PathBuf, Vec<LogCallRecord>>,
}

impl PatchPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn record_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Number of logger declarations a patcher inserts
    pub fn logger_declarations(&self) -> usize {
        self.files.len()
    }

    /// Records for one file, ordered by position
    pub fn records_for(&self, file: &Path) -> &[LogCallRecord] {
        self.files.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[LogCallRecord])> {
        self.files
            .iter()
            .map(|(path, records)| (path.as_path(), records.as_slice()))
    }

    pub fn records(&self) -> impl Iterator<Item = &LogCallRecord> {
        self.files.values().flatten()
    }
}

impl RecordSink for PatchPlan {
    fn accept(&mut self, record: LogCallRecord) -> Result<()> {
        let records = self.files.entry(record.file_path.clone()).or_default();
        let index = records.partition_point(|existing| existing.position <= record.position);
        records.insert(index, record);
        Ok(())
    }
}
