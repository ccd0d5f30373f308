//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! access the loaded catalog and its query resolver.

use std::path::Path;
use std::sync::Arc;

use cafelist_lib::{Catalog, Error as LibError, QueryResolver};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to load the catalog file.
    CatalogLoad(LibError),

    /// Catalog file not found.
    CatalogNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CatalogLoad(e) => write!(f, "failed to load catalog: {}", e),
            Self::CatalogNotFound(path) => write!(f, "catalog not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogLoad(e) => Some(e),
            Self::CatalogNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::CatalogNotFound { path } => Self::CatalogNotFound(path.display().to_string()),
            other => Self::CatalogLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The catalog inside is never mutated
/// after construction, so handlers read it without locking.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use cafelist_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let catalog = state.catalog();
///     // ... use catalog
/// }
///
/// let state = AppState::load(None).unwrap();
/// let app = Router::new()
///     .route("/cafe", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    resolver: QueryResolver,
}

impl AppState {
    /// Load application state.
    ///
    /// When `catalog_path` is `None` the built-in catalog is used; otherwise
    /// the CSV catalog at that path is loaded.
    pub fn load(catalog_path: Option<&Path>) -> Result<Self, AppStateError> {
        let catalog = match catalog_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading catalog");
                Catalog::from_path(path)?
            }
            None => {
                tracing::info!("using built-in catalog");
                Catalog::builtin()
            }
        };

        tracing::info!(
            cities = catalog.city_count(),
            cafes = catalog.cafe_count(),
            "catalog loaded successfully"
        );

        Ok(Self::from_catalog(catalog))
    }

    /// Create application state from a pre-built catalog.
    ///
    /// This is useful for testing or when embedding a custom catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                resolver: QueryResolver::new(Arc::new(catalog)),
            }),
        }
    }

    /// Access the loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        self.inner.resolver.catalog()
    }

    /// Access the query resolver bound to the catalog.
    pub fn resolver(&self) -> &QueryResolver {
        &self.inner.resolver
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("city_count", &self.catalog().city_count())
            .field("cafe_count", &self.catalog().cafe_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_from_catalog() {
        let catalog = Catalog::from_entries([("omsk", vec!["Blue Cup"])]);
        let state = AppState::from_catalog(catalog);

        assert_eq!(state.catalog().city_count(), 1);
        assert_eq!(state.catalog().cafe_count(), 1);
    }

    #[test]
    fn test_app_state_load_builtin() {
        let state = AppState::load(None).expect("built-in catalog loads");
        assert!(state.catalog().contains_city("moscow"));
        assert!(state.catalog().contains_city("tula"));
    }

    #[test]
    fn test_app_state_clone_shares_catalog() {
        let state1 = AppState::load(None).unwrap();
        let state2 = state1.clone();

        assert!(std::ptr::eq(state1.catalog(), state2.catalog()));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::load(None).unwrap();
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("city_count"));
        assert!(debug.contains("cafe_count"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::CatalogNotFound("/path/to/catalog.csv".to_string());
        assert!(err.to_string().contains("/path/to/catalog.csv"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load(Some(Path::new("/nonexistent/path/to/catalog.csv")));

        match result.unwrap_err() {
            AppStateError::CatalogNotFound(path) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
