//! Brand and substitute suggestions for ingredients.
//!
//! The tables are plain data (`data/reference.json`), compiled into the binary and
//! optionally swapped for a file at run time. Lookups never come back empty: names
//! missing from a table get that table's fallback list.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    static ref BUILTIN: ReferenceData = ReferenceData::from_json(include_str!("../data/reference.json"))
        .expect("Built-in reference data is invalid");
}

#[derive(thiserror::Error, Debug)]
pub enum ReferenceError {
    #[error("Could not read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed reference data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Reference data has an empty suggestion list for {0}")]
    EmptyList(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    brands: BTreeMap<String, Vec<String>>,
    substitutes: BTreeMap<String, Vec<String>>,
    fallback: Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Fallback {
    brands: Vec<String>,
    substitutes: Vec<String>,
}

impl ReferenceData {
    /// The tables that ship with the application.
    pub fn builtin() -> &'static ReferenceData {
        &BUILTIN
    }

    /// Load replacement tables from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let data: ReferenceData = serde_json::from_str(json)?;
        data.check()?;
        Ok(data)
    }

    /// Popular brands for an ingredient, matched on the exact name.
    pub fn brands_for(&self, ingredient: &str) -> &[String] {
        self.brands
            .get(ingredient)
            .unwrap_or(&self.fallback.brands)
    }

    /// Things to use instead of an ingredient, matched on the exact name.
    pub fn substitutes_for(&self, ingredient: &str) -> &[String] {
        self.substitutes
            .get(ingredient)
            .unwrap_or(&self.fallback.substitutes)
    }

    /// Every list must hold at least one non-blank suggestion.
    fn check(&self) -> Result<(), ReferenceError> {
        let tables = [("brands", &self.brands), ("substitutes", &self.substitutes)];
        let named = tables.iter().flat_map(|(table, entries)| {
            entries
                .iter()
                .map(move |(name, list)| (format!("{} of {:?}", table, name), list))
        });
        let fallbacks = [
            ("fallback brands".to_string(), &self.fallback.brands),
            ("fallback substitutes".to_string(), &self.fallback.substitutes),
        ];
        for (label, list) in named.chain(fallbacks) {
            if list.is_empty() || list.iter().any(|s| s.trim().is_empty()) {
                return Err(ReferenceError::EmptyList(label));
            }
        }
        Ok(())
    }
}
