use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::core::{MigrationReport, PatchPlan};

/// JSON document with run metadata, the per-file logger declarations and every record
pub struct JsonRecordsFormatter {
    pretty: bool,
}

impl JsonRecordsFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn format_to_file(
        &self,
        plan: &PatchPlan,
        report: &MigrationReport,
        output_path: &Path,
    ) -> Result<()> {
        let content = self.format(plan, report)?;
        fs::write(output_path, content)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format(&self, plan: &PatchPlan, report: &MigrationReport) -> Result<String> {
        let files: Vec<_> = plan
            .iter()
            .map(|(path, records)| {
                json!({
                    "path": path,
                    "calls": records.len(),
                })
            })
            .collect();
        let records: Vec<_> = plan.records().collect();

        let output = json!({
            "meta": {
                "report": report,
                "files": plan.file_count(),
                "loggerDeclarations": plan.logger_declarations(),
            },
            "files": files,
            "records": records,
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };
        rendered.context("Failed to serialize migration records")
    }
}

impl Default for JsonRecordsFormatter {
    fn default() -> Self {
        Self::new()
    }
}
