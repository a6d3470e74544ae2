//! Scripted in-memory provider

use super::{DependencyLookup, LookupError};
use crate::graph::PackageId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory provider (testing)
///
/// Unscripted packages resolve to `NotFound`. Every call is recorded so
/// tests can assert lookup order and count.
#[derive(Default)]
pub struct StaticLookup {
    responses: HashMap<PackageId, Result<Vec<PackageId>, LookupError>>,
    calls: Arc<Mutex<Vec<PackageId>>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(package, dependencies)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |lookup, (package, deps)| {
                lookup.with_dependencies(package, deps.iter().copied())
            })
    }

    /// Script a successful lookup
    pub fn with_dependencies<I, S>(mut self, package: &str, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let deps = dependencies.into_iter().map(PackageId::new).collect();
        self.responses.insert(PackageId::new(package), Ok(deps));
        self
    }

    /// Script a failing lookup
    pub fn with_failure(mut self, package: &str, reason: &str) -> Self {
        let id = PackageId::new(package);
        let error = LookupError::unavailable(&id, reason);
        self.responses.insert(id, Err(error));
        self
    }

    /// Packages looked up so far, in call order
    pub async fn calls(&self) -> Vec<PackageId> {
        self.calls.lock().await.clone()
    }
}

impl DependencyLookup for StaticLookup {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        self.calls.lock().await.push(package.clone());

        match self.responses.get(package) {
            Some(response) => response.clone(),
            None => Err(LookupError::not_found(package)),
        }
    }
}
