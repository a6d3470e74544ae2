//! Package identifiers
//!
//! Registry ids are case-insensitive (`Newtonsoft.Json` and `newtonsoft.json`
//! name the same package) and manifest ids are treated the same way, so the
//! fold happens here, once, instead of in each provider.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque, case-insensitive package identifier
///
/// Keeps the spelling it was created with for display; equality, ordering and
/// hashing use the ASCII-lowercased form.
#[derive(Debug, Clone)]
pub struct PackageId {
    name: String,
    key: String,
}

impl PackageId {
    /// Create an identifier, trimming surrounding whitespace
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim().to_string();
        let key = name.to_ascii_lowercase();
        Self { name, key }
    }

    /// Spelling as first supplied
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Case-folded comparison key (also the NuGet flat-container id)
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Case-insensitive substring test; `needle` must already be lowercase
    pub(crate) fn contains_folded(&self, needle: &str) -> bool {
        self.key.contains(needle)
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PackageId {}

impl PartialEq<str> for PackageId {
    fn eq(&self, other: &str) -> bool {
        self.key.eq_ignore_ascii_case(other.trim())
    }
}

impl PartialEq<&str> for PackageId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Hash for PackageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for PackageId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PackageId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&String> for PackageId {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

/// Convenience for building identifier lists
pub fn package_ids<I, S>(names: I) -> Vec<PackageId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(PackageId::new).collect()
}
