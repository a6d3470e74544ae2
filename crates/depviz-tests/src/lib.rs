pub mod fixtures;
pub mod test_env;

// Re-export key testing utilities
pub use fixtures::{REFERENCE_MANIFEST, nuspec_xml, reference_lookup, version_index};
pub use test_env::TestEnvironment;
