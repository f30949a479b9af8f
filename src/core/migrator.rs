use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

use super::generator::CallGenerator;
use super::inventory::{InventoryCursor, InventoryLine, InventoryParser, LineOutcome};
use super::normalizer::CallNormalizer;
use super::record::CallOrigin;
use super::resolver::PathResolver;
use super::sink::RecordSink;
use crate::config::MigrationConfig;
use crate::error::{MigrationError, Result};

/// Counters for one run over an export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub lines: usize,
    pub records: usize,
    pub adopted: usize,
    pub generated: usize,
    pub unresolved_packages: Vec<String>,
    pub missing_annotations: usize,
    pub missing_file_paths: usize,
    pub discarded_annotations: usize,
}

impl MigrationReport {
    pub fn skipped(&self) -> usize {
        self.missing_annotations + self.missing_file_paths
    }
}

/// Runs a whole export through the parser and hands every record to a sink
pub struct LogMigrator {
    parser: InventoryParser,
}

impl LogMigrator {
    pub fn new(config: &MigrationConfig) -> Self {
        let resolver = PathResolver::from_config(config);
        let normalizer = CallNormalizer::new(CallGenerator::from_config(config));
        Self {
            parser: InventoryParser::new(resolver, normalizer),
        }
    }

    pub fn parser(&self) -> &InventoryParser {
        &self.parser
    }

    pub fn migrate_file<S: RecordSink>(
        &self,
        export: &Path,
        sink: &mut S,
    ) -> Result<MigrationReport> {
        let file = File::open(export).map_err(|source| MigrationError::Io {
            path: export.to_path_buf(),
            source,
        })?;
        info!(
            export = %export.display(),
            base = %self.parser.resolver().base_path().display(),
            "Reading log export"
        );

        let report = self.migrate_reader(BufReader::new(file), sink)?;

        info!(
            records = report.records,
            adopted = report.adopted,
            generated = report.generated,
            skipped = report.skipped(),
            "Migration finished"
        );
        Ok(report)
    }

    /// Line-by-line scan; stops at the first fatal error
    pub fn migrate_reader<R: BufRead, S: RecordSink>(
        &self,
        mut reader: R,
        sink: &mut S,
    ) -> Result<MigrationReport> {
        let mut cursor = InventoryCursor::new();
        let mut report = MigrationReport::default();

        let mut buf = Vec::new();
        let mut number = 0;

        loop {
            buf.clear();
            number += 1;
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| MigrationError::Read {
                    line_number: number,
                    source,
                })?;
            if read == 0 {
                break;
            }

            let raw = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = raw {
                warn!(line = number, "Export line is not valid UTF-8; decoding lossily");
            }
            let line = InventoryLine::parse(number, &raw);
            report.lines += 1;

            match self.parser.process_line(&mut cursor, &line)? {
                LineOutcome::Consumed => {}
                LineOutcome::UnresolvedPackage { token, discarded } => {
                    if discarded.is_some() {
                        report.discarded_annotations += 1;
                    }
                    if !report.unresolved_packages.contains(&token) {
                        report.unresolved_packages.push(token);
                    }
                }
                LineOutcome::DiscardedAnnotation(_) => report.discarded_annotations += 1,
                LineOutcome::MissingAnnotation => report.missing_annotations += 1,
                LineOutcome::MissingFilePath => report.missing_file_paths += 1,
                LineOutcome::Record(record) => {
                    report.records += 1;
                    match record.origin {
                        CallOrigin::Adopted => report.adopted += 1,
                        CallOrigin::Generated => report.generated += 1,
                    }
                    sink.accept(record)?;
                }
            }
        }

        if let Some(pending) = cursor.pending {
            warn!(
                line = pending.line_number,
                annotation = %pending.raw,
                "Export ended after a position annotation"
            );
            report.discarded_annotations += 1;
        }

        Ok(report)
    }
}
