use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MigrationError, Result};

pub const DEFAULT_APPLICATION_NAMESPACE: &str = "org.apache.hadoop";

/// Module tags keep at most this many dotted segments
pub const DEFAULT_MAX_MODULE_DEPTH: usize = 6;

/// Package tokens whose directory in the source tree has a different name
pub const DEFAULT_PACKAGE_ALIASES: &[(&str, &str)] = &[
    ("hadoop-main", "hadoop-common-project"),
    ("hadoop-hdfs-bkjournal", "hadoop-hdfs"),
];

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MigrationConfig {
    /// Root of the checked-out source tree that package tokens resolve against
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
    #[serde(default = "default_application_namespace")]
    pub application_namespace: String,
    #[serde(default = "default_max_module_depth")]
    pub max_module_depth: usize,
    /// Extra aliases; merged over the built-in table
    #[serde(default = "default_package_aliases")]
    pub package_aliases: BTreeMap<String, String>,
}

fn default_base_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_application_namespace() -> String {
    DEFAULT_APPLICATION_NAMESPACE.to_string()
}

fn default_max_module_depth() -> usize {
    DEFAULT_MAX_MODULE_DEPTH
}

fn default_package_aliases() -> BTreeMap<String, String> {
    DEFAULT_PACKAGE_ALIASES
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            application_namespace: default_application_namespace(),
            max_module_depth: default_max_module_depth(),
            package_aliases: default_package_aliases(),
        }
    }
}

impl MigrationConfig {
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.application_namespace = namespace.into();
        self
    }

    pub fn with_max_module_depth(mut self, depth: usize) -> Self {
        self.max_module_depth = depth;
        self
    }

    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.package_aliases.insert(from.into(), to.into());
        self
    }

    /// Load a JSON config file. Missing fields fall back to the defaults and
    /// aliases listed in the file extend the built-in table.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| MigrationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: MigrationConfig =
            serde_json::from_str(&content).map_err(|err| MigrationError::Config {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        for (from, to) in default_package_aliases() {
            config.package_aliases.entry(from).or_insert(to);
        }

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.max_module_depth == 0 {
            return Err(MigrationError::Config {
                path: path.to_path_buf(),
                reason: "maxModuleDepth must be at least 1".to_string(),
            });
        }
        if self.application_namespace.trim().is_empty() {
            return Err(MigrationError::Config {
                path: path.to_path_buf(),
                reason: "applicationNamespace must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_hadoop_layout() {
        let config = MigrationConfig::default();
        assert_eq!(config.application_namespace, "org.apache.hadoop");
        assert_eq!(config.max_module_depth, 6);
        assert_eq!(
            config.package_aliases.get("hadoop-hdfs-bkjournal").map(String::as_str),
            Some("hadoop-hdfs")
        );
    }

    #[test]
    fn file_config_merges_aliases_and_keeps_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logmigrate.json");
        fs::write(
            &path,
            r#"{ "basePath": "/src/hadoop", "packageAliases": { "hadoop-foo": "hadoop-bar" } }"#,
        )
        .unwrap();

        let config = MigrationConfig::from_file(&path).unwrap();
        assert_eq!(config.base_path, PathBuf::from("/src/hadoop"));
        assert_eq!(config.max_module_depth, DEFAULT_MAX_MODULE_DEPTH);
        assert_eq!(config.package_aliases.len(), 3);
        assert!(config.package_aliases.contains_key("hadoop-main"));
    }

    #[test]
    fn zero_depth_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logmigrate.json");
        fs::write(&path, r#"{ "maxModuleDepth": 0 }"#).unwrap();

        let err = MigrationConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, MigrationError::Config { .. }));
    }
}
