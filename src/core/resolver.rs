use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::MigrationConfig;

/// A package token located in the reference source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Directory name that was searched for, after aliasing
    pub name: String,
    pub path: PathBuf,
}

/// Maps package tokens from the export to directories under a base path.
///
/// The tree is walked depth-first in lexicographic file-name order, so when two
/// directories share a name the result is the same on every platform. Lookups
/// (including misses) are memoized per resolver.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_path: PathBuf,
    aliases: BTreeMap<String, String>,
    cache: RefCell<HashMap<String, Option<ResolvedPackage>>>,
}

impl PathResolver {
    pub fn new(base_path: impl Into<PathBuf>, aliases: BTreeMap<String, String>) -> Self {
        Self {
            base_path: base_path.into(),
            aliases,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &MigrationConfig) -> Self {
        Self::new(config.base_path.clone(), config.package_aliases.clone())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Apply the alias table to a package token
    pub fn alias<'a>(&'a self, token: &'a str) -> &'a str {
        self.aliases.get(token).map(String::as_str).unwrap_or(token)
    }

    /// Find the directory for `token`, or `None` if no directory under the base
    /// path carries its (aliased) name.
    pub fn resolve(&self, token: &str) -> Option<ResolvedPackage> {
        if let Some(cached) = self.cache.borrow().get(token) {
            return cached.clone();
        }

        let name = self.alias(token);
        if name != token {
            debug!(token, alias = name, "Applying package alias");
        }

        let resolved = self.search(name).map(|path| ResolvedPackage {
            name: name.to_string(),
            path,
        });

        match &resolved {
            Some(package) => debug!(token, path = %package.path.display(), "Resolved package"),
            None => warn!(
                token,
                searched = name,
                base = %self.base_path.display(),
                "Package not found under base path"
            ),
        }

        self.cache
            .borrow_mut()
            .insert(token.to_string(), resolved.clone());
        resolved
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        WalkDir::new(&self.base_path)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!("Skipping unreadable entry: {err}");
                    None
                }
            })
            .find(|entry| entry.file_type().is_dir() && entry.file_name() == name)
            .map(|entry| entry.into_path())
    }
}
