//! Café catalog loading and lookup.
//!
//! The catalog maps a city key to the ordered list of cafés in that city. It
//! is built once (either from the built-in table or a CSV file) and is never
//! mutated afterwards, so it can be shared between threads without locking.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::{Error, Result};

/// Minimum similarity for a city to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

const BUILTIN_CITIES: &[(&str, &[&str])] = &[
    (
        "moscow",
        &[
            "Мир кофе",
            "Сладкоежка",
            "Кофе и завтраки",
            "Сытый студент",
            "Ложка и вилка",
        ],
    ),
    ("tula", &["Кофе с собой", "Лучше дома", "Горячий хлеб"]),
];

/// A single café entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeRecord {
    pub name: String,
}

impl CafeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Immutable city → café list mapping.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cities: HashMap<String, Vec<CafeRecord>>,
    source: Option<PathBuf>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_CITIES
                .iter()
                .map(|(city, cafes)| (*city, cafes.iter().copied())),
        )
    }

    /// Build a catalog from `(city, cafe names)` pairs.
    ///
    /// Repeated cities are merged, appending in iteration order.
    pub fn from_entries<C, I, N>(entries: impl IntoIterator<Item = (C, I)>) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut cities: HashMap<String, Vec<CafeRecord>> = HashMap::new();
        for (city, names) in entries {
            cities
                .entry(city.into())
                .or_default()
                .extend(names.into_iter().map(CafeRecord::new));
        }
        Self {
            cities,
            source: None,
        }
    }

    /// Load a catalog from a CSV file with `city,name` columns.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from a CSV reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::CatalogValidation {
                message: format!("failed to read catalog headers: {err}"),
            })?
            .clone();

        let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
        for (i, header) in headers.iter().enumerate() {
            let header = header.to_ascii_lowercase();
            for column in ["city", "name"] {
                if header == column {
                    index_map.entry(column).or_insert(i);
                }
            }
        }

        let missing: Vec<&str> = ["city", "name"]
            .into_iter()
            .filter(|c| !index_map.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(Error::CatalogValidation {
                message: format!(
                    "catalog missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        let city_idx = index_map["city"];
        let name_idx = index_map["name"];

        let mut cities: HashMap<String, Vec<CafeRecord>> = HashMap::new();
        let mut row_num: usize = 1; // header is line 1
        for result in csv_reader.records() {
            row_num += 1;
            let record = result?;

            let city = record.get(city_idx).unwrap_or_default();
            let name = record.get(name_idx).unwrap_or_default();
            if city.is_empty() {
                return Err(Error::CatalogValidation {
                    message: format!("row {row_num}: city must not be empty"),
                });
            }
            if name.is_empty() {
                return Err(Error::CatalogValidation {
                    message: format!("row {row_num}: name must not be empty"),
                });
            }

            cities
                .entry(city.to_string())
                .or_default()
                .push(CafeRecord::new(name));
        }

        if cities.is_empty() {
            return Err(Error::CatalogValidation {
                message: "catalog is empty".to_string(),
            });
        }

        debug!(cities = cities.len(), "parsed catalog");

        Ok(Self {
            cities,
            source: None,
        })
    }

    /// Look up the cafés of a city by exact, case-sensitive key.
    pub fn lookup(&self, city: &str) -> Option<&[CafeRecord]> {
        self.cities.get(city).map(Vec::as_slice)
    }

    /// Whether `city` is a catalog key.
    pub fn contains_city(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    /// All city keys, sorted.
    pub fn cities(&self) -> Vec<&str> {
        let mut cities: Vec<&str> = self.cities.keys().map(String::as_str).collect();
        cities.sort_unstable();
        cities
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    /// Total number of café records across every city.
    pub fn cafe_count(&self) -> usize {
        self.cities.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// File the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Known cities similar to `name`, best match first.
    pub fn suggest_cities(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .cities
            .keys()
            .map(|city| {
                (
                    strsim::normalized_levenshtein(&needle, &city.to_lowercase()),
                    city.as_str(),
                )
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, city)| city.to_string())
            .collect()
    }
}
