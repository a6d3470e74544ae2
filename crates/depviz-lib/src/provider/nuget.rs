//! NuGet v3 flat-container provider
//!
//! Two requests per package: `{base}/{id}/index.json` lists the published
//! versions, then `{base}/{id}/{version}/{id}.nuspec` carries the dependency
//! declarations. Version constraints are ignored; the last listed version is
//! the one inspected.

use super::{DependencyLookup, LookupError};
use crate::graph::PackageId;
use crate::networking::NetworkingManager;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, trace};

/// Public NuGet flat container
pub const NUGET_FLAT_CONTAINER: &str = "https://api.nuget.org/v3-flatcontainer";

/// Package ids and versions keep `.`, `-` and `_` unescaped
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-').remove(b'_');

/// `index.json` response
#[derive(Debug, Deserialize)]
struct VersionIndex {
    #[serde(default)]
    versions: Vec<String>,
}

/// Live NuGet registry client
pub struct NugetRegistry {
    networking: Arc<NetworkingManager>,
    base_url: String,
}

impl NugetRegistry {
    pub fn new(networking: Arc<NetworkingManager>) -> Self {
        Self::with_base_url(networking, NUGET_FLAT_CONTAINER)
    }

    /// Create client with custom base URL (mirrors, tests)
    pub fn with_base_url(networking: Arc<NetworkingManager>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            networking,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn segment(value: &str) -> String {
        utf8_percent_encode(&value.to_ascii_lowercase(), PATH_SEGMENT).to_string()
    }

    fn index_url(&self, package: &PackageId) -> String {
        format!("{}/{}/index.json", self.base_url, Self::segment(package.key()))
    }

    fn nuspec_url(&self, package: &PackageId, version: &str) -> String {
        let id = Self::segment(package.key());
        format!(
            "{}/{}/{}/{}.nuspec",
            self.base_url,
            id,
            Self::segment(version),
            id
        )
    }

    async fn fetch_text(&self, package: &PackageId, url: &str) -> Result<String, LookupError> {
        let response = self
            .networking
            .get_text(url)
            .await
            .map_err(|e| LookupError::unavailable(package, e))?;

        match response.status {
            StatusCode::NOT_FOUND => Err(LookupError::not_found(package)),
            status if !status.is_success() => {
                Err(LookupError::unavailable(package, format!("HTTP {}", status)))
            }
            _ => Ok(response.body),
        }
    }

    /// Last version listed in the package's `index.json`
    pub async fn latest_version(&self, package: &PackageId) -> Result<String, LookupError> {
        let body = self.fetch_text(package, &self.index_url(package)).await?;
        let index: VersionIndex =
            serde_json::from_str(&body).map_err(|e| LookupError::malformed(package, e))?;

        index
            .versions
            .last()
            .cloned()
            .ok_or_else(|| LookupError::not_found(package))
    }
}

impl DependencyLookup for NugetRegistry {
    async fn lookup(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        let version = self.latest_version(package).await?;
        debug!("Resolved {} to version {}", package, version);

        let nuspec = self
            .fetch_text(package, &self.nuspec_url(package, &version))
            .await?;
        let dependencies =
            parse_nuspec_dependencies(&nuspec).map_err(|e| LookupError::malformed(package, e))?;

        trace!("{} declares {} dependencies", package, dependencies.len());
        Ok(dependencies.into_iter().map(PackageId::new).collect())
    }
}

/// Dependency ids declared in a `.nuspec` document
///
/// Collects the `id` attribute of every `<dependency>` inside
/// `<dependencies>`, whether flat or split into per-framework `<group>`s.
/// The same id listed by several groups is reported once, at its first
/// position.
pub fn parse_nuspec_dependencies(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut dependencies: Vec<String> = Vec::new();
    let mut depth_in_dependencies = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(element) => match element.local_name().as_ref() {
                b"dependencies" => depth_in_dependencies += 1,
                b"dependency" if depth_in_dependencies > 0 => {
                    push_dependency_id(&element, &mut dependencies)?
                }
                _ => {}
            },
            Event::Empty(element) => {
                if depth_in_dependencies > 0 && element.local_name().as_ref() == b"dependency" {
                    push_dependency_id(&element, &mut dependencies)?;
                }
            }
            Event::End(element) => {
                if element.local_name().as_ref() == b"dependencies" {
                    depth_in_dependencies = depth_in_dependencies.saturating_sub(1);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(dependencies)
}

fn push_dependency_id(
    element: &quick_xml::events::BytesStart<'_>,
    dependencies: &mut Vec<String>,
) -> Result<(), quick_xml::Error> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
        if attribute.key.local_name().as_ref() != b"id" {
            continue;
        }

        let id = String::from_utf8_lossy(&attribute.value).trim().to_string();
        if !id.is_empty() && !dependencies.iter().any(|d| d.eq_ignore_ascii_case(&id)) {
            dependencies.push(id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("nuget.test.rs");
}
