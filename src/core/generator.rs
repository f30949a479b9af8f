use std::path::{Component, Path};
use tracing::debug;

use super::normalizer::FACADE_PREFIX;
use crate::config::MigrationConfig;

/// Message key and argument pulled out of a legacy call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFragments {
    pub message: String,
    pub argument: String,
}

/// Rebuilds legacy `LOG.<level>(...)` calls into the tagged form
/// `LOG.<MESSAGE>(<ARGUMENT>).tag("<module>").<level>();`
#[derive(Debug, Clone)]
pub struct CallGenerator {
    namespace: String,
    max_module_depth: usize,
}

impl CallGenerator {
    pub fn new(namespace: impl Into<String>, max_module_depth: usize) -> Self {
        Self {
            namespace: namespace.into(),
            max_module_depth,
        }
    }

    pub fn from_config(config: &MigrationConfig) -> Self {
        Self::new(
            config.application_namespace.clone(),
            config.max_module_depth,
        )
    }

    pub fn generate(&self, legacy_call: &str, file_path: &Path) -> String {
        let call = legacy_call.trim();
        let tag = module_tag(file_path, &self.namespace, self.max_module_depth);
        let level = extract_level(call);
        let fragments = extract_fragments(call);

        format!(
            "{}{}({}).tag(\"{}\").{}();",
            FACADE_PREFIX, fragments.message, fragments.argument, tag, level
        )
    }
}

/// Dotted module tag for a source file: the directories from the first
/// occurrence of `namespace` onward, capped at `max_depth` segments. The file
/// itself never contributes a segment. Empty when the namespace is absent.
pub fn module_tag(file_path: &Path, namespace: &str, max_depth: usize) -> String {
    let directories: Vec<&str> = file_path
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|component| match component {
                    Component::Normal(name) => name.to_str(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let root: Vec<&str> = namespace.split('.').filter(|s| !s.is_empty()).collect();
    if root.is_empty() {
        return String::new();
    }

    let start = directories
        .windows(root.len())
        .position(|window| window == root.as_slice());

    match start {
        Some(start) => directories[start..]
            .iter()
            .take(max_depth)
            .copied()
            .collect::<Vec<_>>()
            .join("."),
        None => {
            debug!(
                path = %file_path.display(),
                namespace,
                "Namespace not found in file path; tag left empty"
            );
            String::new()
        }
    }
}

/// The verb between `LOG.` and the first `(`, e.g. `info`
pub fn extract_level(call: &str) -> &str {
    let call = call.trim();
    let call = call.strip_prefix(FACADE_PREFIX).unwrap_or(call);
    match call.find('(') {
        Some(end) => call[..end].trim(),
        None => call,
    }
}

/// Message key and argument of a single-statement legacy call.
///
/// Multi-line calls (no trailing `;`) are not reconstructed. A message is only
/// taken from a call with exactly one quoted literal and no `{` placeholders.
pub fn extract_fragments(call: &str) -> CallFragments {
    let call = call.trim();
    let mut fragments = CallFragments::default();

    if !call.ends_with(';') {
        return fragments;
    }

    if call.matches('"').count() == 2 && !call.contains('{') {
        if let (Some(open), Some(close)) = (call.find('"'), call.rfind('"')) {
            fragments.message = call[open + 1..close]
                .trim()
                .replace(' ', "_")
                .to_uppercase();
        }
    }

    if let Some(plus) = call.find('+') {
        if let Some(close) = call.rfind(')') {
            if close > plus {
                fragments.argument = call[plus + 1..close].trim().to_string();
            }
        }
    }

    fragments
}
