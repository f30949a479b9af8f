#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use logmigrate::MigrationConfig;

/// Temporary checkout with the directory layout of a multi-module Java project
pub struct SourceTree {
    dir: tempfile::TempDir,
}

impl SourceTree {
    pub fn new() -> Self {
        let tree = Self {
            dir: tempfile::TempDir::new().unwrap(),
        };
        tree.mkdir("hadoop-common-project/hadoop-common/src/main/java/org/apache/hadoop/security");
        tree.mkdir("hadoop-common-project/hadoop-common/src/main/java/org/apache/hadoop/fs");
        tree.mkdir("hadoop-hdfs-project/hadoop-hdfs/src/main/java/org/apache/hadoop/hdfs/server/namenode");
        tree
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> MigrationConfig {
        MigrationConfig::default().with_base_path(self.root())
    }

    pub fn write_export(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("log-export.txt");
        fs::write(&path, content).unwrap();
        path
    }
}

/// One export line indented to `depth`
pub fn at(depth: usize, payload: &str) -> String {
    format!("{}{}\n", " ".repeat(depth), payload)
}

pub fn export(lines: &[(usize, &str)]) -> String {
    lines.iter().map(|(depth, payload)| at(*depth, payload)).collect()
}
