use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 1-based source coordinates of a call-site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}: {})", self.line, self.column)
    }
}

/// How `new_call` was produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CallOrigin {
    /// The export already held a structured call; taken verbatim
    Adopted,
    /// Rebuilt from a legacy call
    Generated,
}

/// One call-site to be migrated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogCallRecord {
    pub file_path: PathBuf,
    pub position: Position,
    pub original_call: String,
    pub new_call: String,
    pub origin: CallOrigin,
    /// Export line that completed this record
    pub inventory_line: usize,
}

impl LogCallRecord {
    pub fn new(
        file_path: PathBuf,
        position: Position,
        original_call: String,
        new_call: String,
        origin: CallOrigin,
    ) -> Self {
        Self {
            file_path,
            position,
            original_call,
            new_call,
            origin,
            inventory_line: 0,
        }
    }

    pub fn with_inventory_line(mut self, line: usize) -> Self {
        self.inventory_line = line;
        self
    }
}

impl fmt::Display for LogCallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LogCall {{")?;
        writeln!(f, "  {}", self.file_path.display())?;
        writeln!(f, "  {}", self.position)?;
        writeln!(f, "  OLD={}", self.original_call)?;
        writeln!(f, "  NEW={}", self.new_call)?;
        write!(f, "}}")
    }
}
