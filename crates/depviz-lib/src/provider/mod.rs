//! Dependency lookup providers
//!
//! The graph builder only needs "package → immediate dependencies". Two
//! backends provide it: the NuGet registry ([`NugetRegistry`]) and a local
//! manifest file ([`ManifestRepository`]). [`StaticLookup`] is an in-memory
//! provider for tests.

use crate::graph::PackageId;
use std::sync::Arc;
use thiserror::Error;

pub mod manifest;
pub mod nuget;
#[cfg(any(test, feature = "test-utils"))]
mod scripted;

pub use manifest::{ManifestError, ManifestRepository};
pub use nuget::{NUGET_FLAT_CONTAINER, NugetRegistry};
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::StaticLookup;

/// Why a lookup produced no dependency list
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Package not found: {package}")]
    NotFound { package: String },

    #[error("Lookup for {package} unavailable: {reason}")]
    Unavailable { package: String, reason: String },

    #[error("Malformed response for {package}: {reason}")]
    Malformed { package: String, reason: String },
}

impl LookupError {
    pub fn not_found(package: &PackageId) -> Self {
        Self::NotFound {
            package: package.to_string(),
        }
    }

    pub fn unavailable(package: &PackageId, reason: impl ToString) -> Self {
        Self::Unavailable {
            package: package.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(package: &PackageId, reason: impl ToString) -> Self {
        Self::Malformed {
            package: package.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Source of immediate dependency lists
pub trait DependencyLookup: Send + Sync {
    /// Immediate dependencies of `package`, in declaration order
    fn lookup(
        &self,
        package: &PackageId,
    ) -> impl std::future::Future<Output = Result<Vec<PackageId>, LookupError>> + Send;
}

impl<P: DependencyLookup> DependencyLookup for Arc<P> {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        self.as_ref().lookup(package).await
    }
}

/// Provider chosen at runtime from configuration
pub enum AnyLookup {
    Nuget(NugetRegistry),
    Manifest(ManifestRepository),
}

impl DependencyLookup for AnyLookup {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        match self {
            AnyLookup::Nuget(registry) => registry.lookup(package).await,
            AnyLookup::Manifest(manifest) => manifest.lookup(package).await,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
