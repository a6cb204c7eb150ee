//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition known to a game behind
//! `Arc`, keyed by printed card id. Games hold one catalog handle in their
//! state so zone-moving effects can rebuild a definition from an instance.
//!
//! ## Loading
//!
//! Card data arrives as JSON arrays of loosely-typed records. Loading is
//! forgiving: a record that cannot be turned into a definition is skipped
//! and reported, and effect text the parser does not understand yields no
//! effects rather than an error. Only I/O failures and a document that is
//! not a JSON array are fatal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::definition::{CardAttribute, CardCategory, CardColor, CardDefinition, CardId};
use crate::effects::parse_effect_text;

/// Fatal catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid card JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("card data must be a JSON array of records")]
    NotAnArray,
}

/// A record that was skipped during loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position of the record within its array.
    pub index: usize,
    pub reason: String,
}

/// Summary of a load call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
    /// Effect text chunks the parser could not turn into effects.
    pub unparsed_chunks: usize,
}

impl LoadReport {
    fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.skipped.extend(other.skipped);
        self.unparsed_chunks += other.unparsed_chunks;
    }
}

/// Raw card record as found in card data files.
#[derive(Debug, Deserialize)]
struct RawCardRecord {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    card_type: Option<String>,
    color: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    cost: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    power: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    counter: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    life: Option<i64>,
    attribute: Option<String>,
    effect: Option<String>,
    types: Option<Value>,
}

/// Accept numbers, numeric strings ("1000") and placeholders ("-", null).
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().trim_start_matches('+').parse().ok(),
        _ => None,
    })
}

impl RawCardRecord {
    /// Build a definition, returning the skip reason on failure.
    fn into_definition(self) -> Result<(CardDefinition, usize), String> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| "missing id".to_string())?;

        let raw_type = self.card_type.as_deref().unwrap_or("Character");
        let category = CardCategory::parse(raw_type)
            .ok_or_else(|| format!("{id}: unknown card type {raw_type:?}"))?;

        let name = self.name.unwrap_or_else(|| id.clone());
        let mut definition = CardDefinition::new(id, name, category)
            .with_cost(self.cost.unwrap_or(0))
            .with_power(self.power.unwrap_or(0))
            .with_counter(self.counter.unwrap_or(0))
            .with_life(self.life.unwrap_or(0).max(0) as u32);

        definition.colors = CardColor::parse_list(self.color.as_deref().unwrap_or("Red"));
        definition.attribute = self.attribute.as_deref().and_then(CardAttribute::parse);
        definition.tags = match self.types {
            Some(Value::String(s)) => s.split('/').map(|t| t.trim().to_string()).collect(),
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        let mut unparsed = 0;
        if let Some(text) = self.effect.filter(|t| !t.trim().is_empty()) {
            let report = parse_effect_text(&text);
            unparsed = report.unmatched.len();
            definition.effects = report.effects;
            definition.effect_text = text;
        }

        Ok((definition, unparsed))
    }
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use optcg_engine::cards::{CardCatalog, CardId};
///
/// let mut catalog = CardCatalog::new();
/// let report = catalog
///     .load_json_str(r#"[{"id": "OP01-013", "name": "Sanji", "type": "Character",
///                         "cost": 2, "power": 4000, "counter": 1000}]"#)
///     .unwrap();
///
/// assert_eq!(report.loaded, 1);
/// assert_eq!(catalog.get(&CardId::from("OP01-013")).unwrap().power, 4000);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from definitions.
    pub fn from_definitions(definitions: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition);
        }
        catalog
    }

    /// Insert a definition, replacing any previous one with the same id.
    pub fn insert(&mut self, definition: CardDefinition) -> Arc<CardDefinition> {
        let definition = Arc::new(definition);
        if self
            .cards
            .insert(definition.id.clone(), Arc::clone(&definition))
            .is_some()
        {
            debug!("Replaced card definition {}", definition.id);
        }
        definition
    }

    /// Look up a definition.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values()
    }

    /// Find definitions matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Arc<CardDefinition>>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// Load a JSON array of card records.
    pub fn load_json_str(&mut self, json: &str) -> Result<LoadReport, CatalogError> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Array(records) = document else {
            return Err(CatalogError::NotAnArray);
        };

        let mut report = LoadReport::default();
        for (index, record) in records.into_iter().enumerate() {
            let parsed = serde_json::from_value::<RawCardRecord>(record)
                .map_err(|e| e.to_string())
                .and_then(RawCardRecord::into_definition);

            match parsed {
                Ok((definition, unparsed)) => {
                    report.unparsed_chunks += unparsed;
                    report.loaded += 1;
                    self.insert(definition);
                }
                Err(reason) => {
                    warn!("Skipping card record {index}: {reason}");
                    report.skipped.push(SkippedRecord { index, reason });
                }
            }
        }

        debug!(
            "Loaded {} cards ({} skipped, {} unparsed effect chunks)",
            report.loaded,
            report.skipped.len(),
            report.unparsed_chunks
        );
        Ok(report)
    }

    /// Load one card data file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_json_str(&json)
    }

    /// Load every `*.json` file in a directory.
    ///
    /// Files that fail to parse are skipped with a warning; only a failure
    /// to read the directory itself is returned as an error.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<LoadReport, CatalogError> {
        let dir = dir.as_ref();
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(io_err)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut report = LoadReport::default();
        for path in paths {
            match self.load_file(&path) {
                Ok(file_report) => report.merge(file_report),
                Err(e) => warn!("Skipping card file {}: {e}", path.display()),
            }
        }
        Ok(report)
    }
}
