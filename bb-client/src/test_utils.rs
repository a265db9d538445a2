//! In-memory catalog for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bb::basic_models::SourcedRecord;
use tokio::sync::{Barrier, Notify};

use crate::source::{require_term, RecipeSource, SourceError};

/// A full catalog record with one ingredient.
pub fn drink(id: &str, name: &str) -> SourcedRecord {
    SourcedRecord::default()
        .with("idDrink", id)
        .with("strDrink", name)
        .with("strCategory", "Cocktail")
        .with("strGlass", "Highball glass")
        .with("strInstructions", "Stir.")
        .with("strIngredient1", "Gin")
        .with("strMeasure1", "2 oz")
}

/// What the filter endpoint returns: only id, name and thumbnail.
pub fn partial(id: &str) -> SourcedRecord {
    SourcedRecord::default()
        .with("idDrink", id)
        .with("strDrink", format!("Drink {}", id))
        .with("strDrinkThumb", format!("https://example.test/{}.jpg", id))
}

#[derive(Default)]
pub struct FakeSource {
    pub by_name: HashMap<String, Vec<SourcedRecord>>,
    pub by_ingredient: HashMap<String, Vec<SourcedRecord>>,
    pub details: HashMap<String, SourcedRecord>,
    /// Ids whose lookup fails as if the network dropped.
    pub unreachable: HashSet<String>,
    /// Name searches that wait for a signal before answering.
    pub gates: HashMap<String, Arc<Notify>>,
    /// Every lookup waits here, so lookups only finish if they all run at once.
    pub barrier: Option<Arc<Barrier>>,
    pub lookups: AtomicUsize,
}

impl FakeSource {
    /// A catalog that knows the full record of every given id.
    pub fn with_details(ids: impl IntoIterator<Item = String>) -> Self {
        let details = ids
            .into_iter()
            .map(|id| {
                let record = drink(&id, &format!("Drink {}", id));
                (id, record)
            })
            .collect();
        Self {
            details,
            ..Default::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeSource for FakeSource {
    async fn search_by_name(&self, term: &str) -> Result<Vec<SourcedRecord>, SourceError> {
        let term = require_term(term)?;
        if let Some(gate) = self.gates.get(term) {
            gate.notified().await;
        }
        self.by_name
            .get(term)
            .cloned()
            .ok_or(SourceError::NotFound)
    }

    async fn filter_by_ingredient(&self, term: &str) -> Result<Vec<SourcedRecord>, SourceError> {
        let term = require_term(term)?;
        self.by_ingredient
            .get(term)
            .cloned()
            .ok_or(SourceError::NotFound)
    }

    async fn lookup(&self, id: &str) -> Result<SourcedRecord, SourceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.unreachable.contains(id) {
            return Err(SourceError::Unavailable("connection reset".into()));
        }
        self.details.get(id).cloned().ok_or(SourceError::NotFound)
    }

    async fn random(&self) -> Result<Vec<SourcedRecord>, SourceError> {
        Ok(vec![drink("11000", "Mojito")])
    }
}
