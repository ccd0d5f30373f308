//! Test utilities for HTTP handler testing.
//!
//! This module provides fixtures and helpers for testing handlers against
//! either the built-in catalog or the CSV fixture catalog.

use std::path::PathBuf;
use std::sync::OnceLock;

use cafelist_lib::Catalog;

use crate::state::AppState;

/// Path to the CSV fixture catalog shipped with the library crate.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../cafelist-lib/tests/fixtures/catalog.csv"
);

/// Lazily-initialized state backed by the fixture catalog.
static FIXTURE_STATE: OnceLock<AppState> = OnceLock::new();

/// State backed by the built-in catalog.
pub fn test_state() -> AppState {
    AppState::from_catalog(Catalog::builtin())
}

/// Shared state loaded from the fixture catalog, cached after first use.
///
/// # Panics
///
/// Panics if the fixture catalog cannot be loaded. This indicates a test
/// configuration issue.
pub fn fixture_state() -> AppState {
    FIXTURE_STATE
        .get_or_init(|| {
            let path = fixture_catalog_path();
            AppState::load(Some(path.as_path()))
                .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e))
        })
        .clone()
}

/// Get the absolute path to the fixture catalog.
pub fn fixture_catalog_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// City keys present in the built-in catalog.
pub mod builtin_cities {
    pub const MOSCOW: &str = "moscow";
    pub const TULA: &str = "tula";
}
