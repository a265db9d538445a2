use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bb::reference::ReferenceData;
use bb_client::collection::CollectionStore;
use bb_client::search::Searcher;
use bb_client::source::CocktailDb;
use bb_client::storage::SqliteStore;
use tokio::sync::Mutex;

use crate::config::Config;

/// Everything the handlers share. The collection sits behind one lock, so
/// changes to it are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    pub searcher: Arc<Searcher>,
    pub collection: Arc<Mutex<CollectionStore>>,
    pub reference: Arc<ReferenceData>,
}

impl AppState {
    pub fn new(searcher: Searcher, collection: CollectionStore, reference: ReferenceData) -> Self {
        Self {
            searcher: Arc::new(searcher),
            collection: Arc::new(Mutex::new(collection)),
            reference: Arc::new(reference),
        }
    }

    /// Connect to the catalog, open the saved collection and load the reference tables.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = CocktailDb::new(
            &config.catalog.base_url,
            Duration::from_secs(config.catalog.timeout_secs),
        )
        .context("Building catalog client")?;
        let store = SqliteStore::open(&config.store.path).context("Opening the collection store")?;
        let collection = CollectionStore::initialize(store).context("Loading the collection")?;
        let reference = match &config.reference.path {
            Some(path) => ReferenceData::load(path)
                .with_context(|| format!("Loading reference data from {}", path.display()))?,
            None => ReferenceData::builtin().clone(),
        };
        Ok(Self::new(
            Searcher::new(Arc::new(catalog)),
            collection,
            reference,
        ))
    }
}
