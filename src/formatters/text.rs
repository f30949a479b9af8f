use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{MigrationReport, PatchPlan};

/// Human-readable listing, one block per call grouped by file
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
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
        let mut out = String::new();

        writeln!(
            out,
            "# {} records in {} files ({} adopted, {} generated, {} skipped)",
            report.records,
            plan.file_count(),
            report.adopted,
            report.generated,
            report.skipped()
        )?;
        if !report.unresolved_packages.is_empty() {
            writeln!(
                out,
                "# unresolved packages: {}",
                report.unresolved_packages.join(", ")
            )?;
        }

        for (path, records) in plan.iter() {
            writeln!(out)?;
            writeln!(out, "## {}", path.display())?;
            for record in records {
                writeln!(out, "{record}")?;
            }
        }

        Ok(out)
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}
