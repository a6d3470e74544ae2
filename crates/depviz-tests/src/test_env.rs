//! Isolated filesystem environment for E2E tests

use anyhow::Result;
use depviz_lib::application::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding manifests and report files
pub struct TestEnvironment {
    /// Removed on drop
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a manifest file and return its path
    pub fn write_manifest(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Path for a report that does not exist yet
    pub fn output_path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Test-mode configuration reading `manifest`
    pub fn manifest_config(&self, package: &str, manifest: &Path) -> AppConfig {
        AppConfig {
            package: package.to_string(),
            repo: manifest.display().to_string(),
            test_mode: true,
            max_depth: Some(10),
            jobs: 1,
            ..AppConfig::default()
        }
    }
}
