use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::normalizer::{is_annotation, parse_annotation, Annotation, CallNormalizer};
use super::record::LogCallRecord;
use super::resolver::{PathResolver, ResolvedPackage};
use crate::error::{MigrationError, Result};

/// Relative source root appended to a package directory for dotted namespaces
pub const JAVA_SOURCE_ROOT: &str = "src/main/java";

/// What an export line means, decided purely by its indentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Environment,
    Stage,
    Classification,
    Package,
    Namespace,
    File,
    LogCall,
    /// Any other depth; carries no field
    Other(usize),
}

impl FieldRole {
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => FieldRole::Environment,
            4 => FieldRole::Stage,
            8 => FieldRole::Classification,
            12 => FieldRole::Package,
            16 => FieldRole::Namespace,
            20 => FieldRole::File,
            28 => FieldRole::LogCall,
            other => FieldRole::Other(other),
        }
    }
}

/// A single export line split into depth and payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine<'a> {
    pub number: usize,
    pub depth: usize,
    pub payload: &'a str,
}

impl<'a> InventoryLine<'a> {
    pub fn parse(number: usize, raw: &'a str) -> Self {
        let depth = raw.chars().take_while(|c| c.is_whitespace()).count();
        Self {
            number,
            depth,
            payload: raw.trim(),
        }
    }

    pub fn role(&self) -> FieldRole {
        FieldRole::from_depth(self.depth)
    }

    pub fn is_blank(&self) -> bool {
        self.payload.is_empty()
    }
}

/// First whitespace-delimited token of a payload
fn leading_token(payload: &str) -> &str {
    payload.split_whitespace().next().unwrap_or("")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnnotation {
    pub line_number: usize,
    pub raw: String,
    pub annotation: Annotation,
}

/// Running context while walking the export: the package, namespace directory
/// and file the next log line belongs to, plus at most one buffered position
/// annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryCursor {
    pub package: Option<ResolvedPackage>,
    pub namespace_dir: Option<PathBuf>,
    pub file_path: Option<PathBuf>,
    pub pending: Option<PendingAnnotation>,
}

impl InventoryCursor {
    pub fn new() -> Self {
        Self::default()
    }
}

/// What a single line did to the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Marker, unknown depth or a context update
    Consumed,
    /// Package token that did not resolve; `discarded` is the line of a stale
    /// annotation dropped by the same package line
    UnresolvedPackage {
        token: String,
        discarded: Option<usize>,
    },
    /// Stale annotation dropped because the file context moved on
    DiscardedAnnotation(usize),
    /// Log line without a preceding annotation
    MissingAnnotation,
    /// Log line whose file path could not be built
    MissingFilePath,
    Record(LogCallRecord),
}

/// Indentation-driven state machine over the export format
#[derive(Debug, Clone)]
pub struct InventoryParser {
    resolver: PathResolver,
    normalizer: CallNormalizer,
}

impl InventoryParser {
    pub fn new(resolver: PathResolver, normalizer: CallNormalizer) -> Self {
        Self {
            resolver,
            normalizer,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Advance `cursor` by one export line
    pub fn process_line(
        &self,
        cursor: &mut InventoryCursor,
        line: &InventoryLine<'_>,
    ) -> Result<LineOutcome> {
        if line.is_blank() {
            return Ok(LineOutcome::Consumed);
        }

        match line.role() {
            FieldRole::Environment | FieldRole::Stage | FieldRole::Classification => {
                Ok(LineOutcome::Consumed)
            }
            FieldRole::Package => {
                let discarded = Self::discard_pending(cursor);
                let token = leading_token(line.payload);
                cursor.package = self.resolver.resolve(token);
                cursor.namespace_dir = None;
                cursor.file_path = None;

                if cursor.package.is_none() {
                    let discarded = match discarded {
                        LineOutcome::DiscardedAnnotation(line_number) => Some(line_number),
                        _ => None,
                    };
                    return Ok(LineOutcome::UnresolvedPackage {
                        token: token.to_string(),
                        discarded,
                    });
                }
                Ok(discarded)
            }
            FieldRole::Namespace => {
                let discarded = Self::discard_pending(cursor);
                cursor.namespace_dir = namespace_dir(line.payload, cursor.package.as_ref());
                cursor.file_path = None;
                if cursor.namespace_dir.is_none() {
                    debug!(
                        line = line.number,
                        namespace = line.payload,
                        "Namespace has no resolved package directory"
                    );
                }
                Ok(discarded)
            }
            FieldRole::File => {
                let discarded = Self::discard_pending(cursor);
                let file_name = leading_token(line.payload);
                cursor.file_path = cursor
                    .namespace_dir
                    .as_ref()
                    .map(|dir| dir.join(file_name));
                Ok(discarded)
            }
            FieldRole::LogCall => self.process_log_call(cursor, line),
            FieldRole::Other(_) => {
                if is_annotation(line.payload) {
                    self.buffer_annotation(cursor, line)?;
                }
                Ok(LineOutcome::Consumed)
            }
        }
    }

    fn buffer_annotation(
        &self,
        cursor: &mut InventoryCursor,
        line: &InventoryLine<'_>,
    ) -> Result<()> {
        if cursor.pending.is_some() {
            return Err(MigrationError::UnpairedAnnotation {
                line_number: line.number,
                raw: line.payload.to_string(),
            });
        }

        let annotation = parse_annotation(line.payload, line.number)?;
        cursor.pending = Some(PendingAnnotation {
            line_number: line.number,
            raw: line.payload.to_string(),
            annotation,
        });
        Ok(())
    }

    fn process_log_call(
        &self,
        cursor: &mut InventoryCursor,
        line: &InventoryLine<'_>,
    ) -> Result<LineOutcome> {
        // Annotations may share the log line depth; the first one opens the pair.
        if cursor.pending.is_none() && is_annotation(line.payload) {
            self.buffer_annotation(cursor, line)?;
            return Ok(LineOutcome::Consumed);
        }

        let Some(pending) = cursor.pending.take() else {
            warn!(
                line = line.number,
                call = line.payload,
                "Log line without position annotation"
            );
            return Ok(LineOutcome::MissingAnnotation);
        };

        let Some(file_path) = cursor.file_path.as_deref() else {
            warn!(
                line = line.number,
                annotation_line = pending.line_number,
                call = line.payload,
                "Log line has no resolved file path"
            );
            return Ok(LineOutcome::MissingFilePath);
        };

        let record = self
            .normalizer
            .normalize(pending.annotation, line.payload, file_path)
            .with_inventory_line(line.number);
        debug!(
            line = line.number,
            file = %record.file_path.display(),
            new_call = %record.new_call,
            "Built log call record"
        );
        Ok(LineOutcome::Record(record))
    }

    fn discard_pending(cursor: &mut InventoryCursor) -> LineOutcome {
        match cursor.pending.take() {
            Some(pending) => {
                warn!(
                    line = pending.line_number,
                    annotation = %pending.raw,
                    "Discarding position annotation not followed by a log line"
                );
                LineOutcome::DiscardedAnnotation(pending.line_number)
            }
            None => LineOutcome::Consumed,
        }
    }
}

/// Directory named by a namespace field: either an absolute path (a file path
/// is reduced to its parent) or a dotted package below the package's
/// `src/main/java`.
pub fn namespace_dir(payload: &str, package: Option<&ResolvedPackage>) -> Option<PathBuf> {
    if payload.starts_with('/') {
        let raw = payload.split('(').next().unwrap_or(payload).trim_end();
        let path = Path::new(raw);
        let dir = if path.extension().is_some() {
            path.parent().unwrap_or(path)
        } else {
            path
        };
        return Some(dir.to_path_buf());
    }

    let package = package?;
    let relative = leading_token(payload).replace('.', "/");
    Some(package.path.join(JAVA_SOURCE_ROOT).join(relative))
}
