//! Café list query validation and resolution.
//!
//! A [`CafeQuery`] carries the raw, still-unvalidated parameters of a single
//! request. [`QueryResolver::resolve`] validates them against the catalog in a
//! fixed order (city, then count), then filters by search text and caps the
//! result length.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// Raw parameters of a café list request.
///
/// Every field distinguishes "absent" (`None`) from "present but empty".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CafeQuery {
    pub city: Option<String>,
    pub count: Option<String>,
    pub search: Option<String>,
}

impl CafeQuery {
    /// Query for the full list of `city`.
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = Some(count.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Parse a `count` parameter. `None` means no limit.
pub fn parse_count(raw: Option<&str>) -> Result<Option<usize>> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| Error::InvalidCount {
                value: value.to_string(),
            }),
    }
}

/// Whether `name` contains `needle` ignoring case.
///
/// `needle` must already be lower-cased.
fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

/// Resolves café list queries against a shared, immutable catalog.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    catalog: Arc<Catalog>,
}

impl QueryResolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Validate `query` and return the matching café names in catalog order.
    ///
    /// City is validated before count, and search is only applied once both
    /// are valid. Filtering happens before capping.
    pub fn resolve(&self, query: &CafeQuery) -> Result<Vec<String>> {
        let city = query.city.as_deref();
        let cafes = city
            .and_then(|city| self.catalog.lookup(city))
            .ok_or_else(|| Error::UnknownCity {
                name: city.map(str::to_string),
                suggestions: city
                    .map(|city| self.catalog.suggest_cities(city, 3))
                    .unwrap_or_default(),
            })?;

        let limit = parse_count(query.count.as_deref())?;

        let needle = query
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let names: Vec<String> = cafes
            .iter()
            .filter(|cafe| {
                needle
                    .as_deref()
                    .is_none_or(|needle| name_matches(&cafe.name, needle))
            })
            .take(limit.unwrap_or(usize::MAX))
            .map(|cafe| cafe.name.clone())
            .collect();

        debug!(
            city = city.unwrap_or_default(),
            returned = names.len(),
            "resolved cafe query"
        );

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> QueryResolver {
        QueryResolver::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn parse_count_accepts_non_negative_integers() {
        assert_eq!(parse_count(None).unwrap(), None);
        assert_eq!(parse_count(Some("0")).unwrap(), Some(0));
        assert_eq!(parse_count(Some("42")).unwrap(), Some(42));
        assert_eq!(parse_count(Some("+2")).unwrap(), Some(2));
    }

    #[test]
    fn parse_count_rejects_garbage() {
        for raw in ["na", "", "-1", "1.5", " 2", "two", "99999999999999999999999"] {
            match parse_count(Some(raw)) {
                Err(Error::InvalidCount { value }) => assert_eq!(value, raw),
                other => panic!("expected InvalidCount for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn name_matching_folds_cyrillic_case() {
        assert!(name_matches("Кофе и завтраки", "кофе"));
        assert!(name_matches("Мир КОФЕ", "кофе"));
        assert!(!name_matches("Сладкоежка", "кофе"));
    }

    #[test]
    fn missing_city_has_no_suggestions() {
        match resolver().resolve(&CafeQuery::default()) {
            Err(Error::UnknownCity { name, suggestions }) => {
                assert!(name.is_none());
                assert!(suggestions.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unknown_city_carries_suggestions() {
        match resolver().resolve(&CafeQuery::city("moskow")) {
            Err(Error::UnknownCity { name, suggestions }) => {
                assert_eq!(name.as_deref(), Some("moskow"));
                assert_eq!(suggestions, vec!["moscow".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_search_does_not_filter() {
        let all = resolver().resolve(&CafeQuery::city("tula")).unwrap();
        let searched = resolver()
            .resolve(&CafeQuery::city("tula").with_search(""))
            .unwrap();
        assert_eq!(all, searched);
    }
}
