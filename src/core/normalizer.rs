use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use super::generator::CallGenerator;
use super::record::{CallOrigin, LogCallRecord, Position};
use crate::error::{MigrationError, Result};

/// Facade prefix every handled log call starts with
pub const FACADE_PREFIX: &str = "LOG.";

fn structured_call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^LOG\.[A-Z_]+\(").expect("valid structured call regex"))
}

/// A parsed `(line: column) text` annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub position: Position,
    pub text: String,
}

pub fn is_annotation(payload: &str) -> bool {
    payload.starts_with('(')
}

/// Parse `(<line>: <column>) <text>`.
///
/// `line_number` is the export line the annotation came from and is only used
/// for the error report.
pub fn parse_annotation(raw: &str, line_number: usize) -> Result<Annotation> {
    let malformed = || MigrationError::MalformedPosition {
        line_number,
        raw: raw.to_string(),
    };

    let inner = raw.strip_prefix('(').ok_or_else(malformed)?;
    let (coordinates, rest) = inner.split_once(')').ok_or_else(malformed)?;
    let (line, column) = coordinates.split_once(':').ok_or_else(malformed)?;
    let line = line.trim().parse::<usize>().map_err(|_| malformed())?;
    let column = column.trim().parse::<usize>().map_err(|_| malformed())?;

    let text = rest.strip_prefix(' ').unwrap_or(rest).trim();

    Ok(Annotation {
        position: Position::new(line, column),
        text: text.to_string(),
    })
}

/// Drop a leading `(line: column) ` prefix if one parses; otherwise the text is
/// returned untouched.
pub fn strip_position(text: &str) -> &str {
    let trimmed = text.trim();
    if !is_annotation(trimmed) {
        return trimmed;
    }
    match trimmed.split_once(')') {
        Some((coordinates, rest)) if is_coordinate_pair(&coordinates[1..]) => rest.trim(),
        _ => trimmed,
    }
}

fn is_coordinate_pair(coordinates: &str) -> bool {
    coordinates
        .split_once(':')
        .map(|(line, column)| {
            line.trim().parse::<usize>().is_ok() && column.trim().parse::<usize>().is_ok()
        })
        .unwrap_or(false)
}

/// True for calls already in the `LOG.SOME_TAG(...)` shape
pub fn is_structured_call(text: &str) -> bool {
    structured_call_pattern().is_match(strip_position(text))
}

/// Pairs a position annotation with the log line that follows it
#[derive(Debug, Clone)]
pub struct CallNormalizer {
    generator: CallGenerator,
}

impl CallNormalizer {
    pub fn new(generator: CallGenerator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &CallGenerator {
        &self.generator
    }

    /// Build the record for one call-site. Structured calls are adopted as-is;
    /// anything else goes through the generator.
    pub fn normalize(
        &self,
        annotation: Annotation,
        log_line: &str,
        file_path: &Path,
    ) -> LogCallRecord {
        let call = strip_position(log_line);

        let (new_call, origin) = if is_structured_call(call) {
            (call.to_string(), CallOrigin::Adopted)
        } else {
            (self.generator.generate(call, file_path), CallOrigin::Generated)
        };

        LogCallRecord::new(
            file_path.to_path_buf(),
            annotation.position,
            annotation.text,
            new_call,
            origin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_position_round_trips() {
        for (line, column) in [(1, 1), (42, 9), (1203, 17)] {
            let raw = format!("{} LOG.info(\"x\");", Position::new(line, column));
            let parsed = parse_annotation(&raw, 1).unwrap();
            assert_eq!(parsed.position.to_string(), format!("({}: {})", line, column));
            assert_eq!(parsed.text, "LOG.info(\"x\");");
        }
    }

    #[test]
    fn non_integer_position_is_fatal() {
        let err = parse_annotation("(12: abc) LOG.info(\"x\");", 7).unwrap_err();
        match err {
            MigrationError::MalformedPosition { line_number, raw } => {
                assert_eq!(line_number, 7);
                assert_eq!(raw, "(12: abc) LOG.info(\"x\");");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_annotation("(12) LOG.info(\"x\");", 1).is_err());
        assert!(parse_annotation("(12: 4 LOG.info", 1).is_err());
    }

    #[test]
    fn structured_calls_are_recognised() {
        assert!(is_structured_call("LOG.USER_LOGGED_IN(userId).tag(\"a\").info();"));
        assert!(is_structured_call("(3: 5) LOG.CACHE_MISS();"));
        assert!(!is_structured_call("LOG.info(\"x\");"));
        assert!(!is_structured_call("LOG.Info(\"x\");"));
        assert!(!is_structured_call("LOGGER.WARN(\"x\");"));
    }

    #[test]
    fn strip_position_keeps_unprefixed_text() {
        assert_eq!(strip_position("  LOG.info(x);  "), "LOG.info(x);");
        assert_eq!(strip_position("(10: 2) LOG.info(x);"), "LOG.info(x);");
        assert_eq!(strip_position("(not a position) x"), "(not a position) x");
    }
}
