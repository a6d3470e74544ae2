//! Local manifest provider for test mode
//!
//! One package per line:
//!
//! ```text
//! # comment
//! App: Core, Logging
//! Core: Utils
//! Utils:
//! ```
//!
//! Dependencies are separated by commas or whitespace. `Utils:` and a bare
//! `Utils` both declare a leaf. A package with no line of its own is unknown.
//! Package names never start with a digit, so a `Name:Version` line is
//! rejected instead of read as a dependency on the version string.

use super::{DependencyLookup, LookupError};
use crate::graph::PackageId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Line {line}: missing package name before ':'")]
    EmptyPackage { line: usize },

    #[error("Line {line}: '{token}' after {package} is a version, not a package name")]
    VersionToken {
        line: usize,
        package: String,
        token: String,
    },

    #[error("Line {line}: package {package} already declared on line {first}")]
    DuplicatePackage {
        line: usize,
        first: usize,
        package: String,
    },
}

/// Adjacency list loaded from a manifest file
#[derive(Debug, Clone, Default)]
pub struct ManifestRepository {
    entries: HashMap<PackageId, (usize, Vec<PackageId>)>,
    order: Vec<PackageId>,
}

impl ManifestRepository {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::parse(&content)?;
        debug!(
            "Loaded {} packages from manifest {}",
            manifest.len(),
            path.display()
        );
        Ok(manifest)
    }

    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let mut manifest = Self::default();

        for (index, raw) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, rest) = line.split_once(':').unwrap_or((line, ""));
            let package = PackageId::new(name);
            if package.is_empty() {
                return Err(ManifestError::EmptyPackage { line: line_no });
            }

            if let Some((first, _)) = manifest.entries.get(&package) {
                return Err(ManifestError::DuplicatePackage {
                    line: line_no,
                    first: *first,
                    package: package.to_string(),
                });
            }

            let tokens: Vec<&str> = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|dep| !dep.is_empty())
                .collect();
            if let Some(token) = tokens
                .iter()
                .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            {
                return Err(ManifestError::VersionToken {
                    line: line_no,
                    package: package.to_string(),
                    token: token.to_string(),
                });
            }
            let dependencies = tokens.into_iter().map(PackageId::new).collect();

            manifest.order.push(package.clone());
            manifest.entries.insert(package, (line_no, dependencies));
        }

        Ok(manifest)
    }

    /// Declared packages in file order
    pub fn packages(&self) -> impl Iterator<Item = &PackageId> {
        self.order.iter()
    }

    pub fn dependencies(&self, package: &PackageId) -> Option<&[PackageId]> {
        self.entries.get(package).map(|(_, deps)| deps.as_slice())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl DependencyLookup for ManifestRepository {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        self.dependencies(package)
            .map(<[PackageId]>::to_vec)
            .ok_or_else(|| LookupError::not_found(package))
    }
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
