use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bb::basic_models::{Liquor, Recipe};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

use crate::aggregate::resolve_details;
use crate::source::{Query, RecipeSource, SourceError};

/// Which search box the user typed into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Name,
    Ingredient,
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    ByName(String),
    ByIngredient(String),
    ByLiquor(Liquor),
    Random,
}

impl SearchRequest {
    pub fn from_mode(mode: SearchMode, term: &str) -> Self {
        match mode {
            SearchMode::Name => SearchRequest::ByName(term.to_string()),
            SearchMode::Ingredient => SearchRequest::ByIngredient(term.to_string()),
            SearchMode::Random => SearchRequest::Random,
        }
    }

    fn query(&self) -> Query {
        match self {
            SearchRequest::ByName(term) => Query::ByName(term.clone()),
            SearchRequest::ByIngredient(term) => Query::ByIngredient(term.clone()),
            SearchRequest::ByLiquor(liquor) => Query::ByIngredient(liquor.to_string()),
            SearchRequest::Random => Query::Random,
        }
    }

    /// Ingredient filters only return partial records, which need a lookup each.
    fn needs_details(&self) -> bool {
        matches!(
            self,
            SearchRequest::ByIngredient(_) | SearchRequest::ByLiquor(_)
        )
    }

    /// What to tell the user when the catalog has nothing.
    pub fn empty_message(&self) -> &'static str {
        match self {
            SearchRequest::ByLiquor(_) => "No cocktails found with this liquor.",
            _ => "No cocktails found. Try a different search!",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error(transparent)]
    Source(#[from] SourceError),
    /// A newer search was started before this one finished.
    #[error("Superseded by a newer search")]
    Superseded,
}

impl SearchError {
    /// The text to show in place of results.
    pub fn user_message(&self, request: &SearchRequest) -> String {
        match self {
            SearchError::Source(SourceError::Validation(err)) => err.to_string(),
            SearchError::Source(SourceError::NotFound) => request.empty_message().to_string(),
            SearchError::Source(SourceError::Unavailable(_)) => {
                "Error loading cocktails. Please try again.".to_string()
            }
            SearchError::Superseded => String::new(),
        }
    }
}

/// Ticket handed to a search when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Hands out increasing tickets, and tells whether a ticket is still the newest.
#[derive(Debug, Default)]
pub struct SearchGeneration {
    latest: AtomicU64,
}

impl SearchGeneration {
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Runs searches against a catalog and drops results that arrive after a newer search began.
pub struct Searcher {
    source: Arc<dyn RecipeSource>,
    generation: SearchGeneration,
}

impl Searcher {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            generation: SearchGeneration::default(),
        }
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Recipe>, SearchError> {
        let ticket = self.generation.issue();
        let outcome = self.run(request).await;
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale results for {:?}", request);
            return Err(SearchError::Superseded);
        }
        let recipes = outcome?;
        tracing::info!("{:?} found {} cocktails", request, recipes.len());
        Ok(recipes)
    }

    /// Run a search without taking a ticket, for callers that give every result its
    /// own page. Nothing it returns can overwrite a newer search.
    pub async fn search_unguarded(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Recipe>, SourceError> {
        let recipes = self.run(request).await?;
        tracing::info!("{:?} found {} cocktails", request, recipes.len());
        Ok(recipes)
    }

    /// The full recipe behind a catalog id.
    pub async fn recipe(&self, id: &str) -> Result<Recipe, SourceError> {
        let record = self.source.lookup(id).await?;
        Recipe::from_sourced(&record).ok_or(SourceError::NotFound)
    }

    async fn run(&self, request: &SearchRequest) -> Result<Vec<Recipe>, SourceError> {
        let records = self.source.query(&request.query()).await?;
        let recipes = if request.needs_details() {
            resolve_details(Arc::clone(&self.source), &records).await?
        } else {
            records.iter().filter_map(Recipe::from_sourced).collect()
        };
        if recipes.is_empty() {
            Err(SourceError::NotFound)
        } else {
            Ok(recipes)
        }
    }
}
