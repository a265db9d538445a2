use std::time::Duration;

use async_trait::async_trait;
use bb::basic_models::SourcedRecord;
use bb::errors::ValidationError;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_API_BASE: &str = "https://www.thecocktaildb.com/api/json/v1/1";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The catalog could not be reached, answered with an error, or sent something unreadable.
    #[error("Recipe catalog unavailable: {0}")]
    Unavailable(String),
    /// The catalog answered, and it has nothing.
    #[error("No cocktails found")]
    NotFound,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Unavailable(err.to_string())
    }
}

/// One request to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    ByName(String),
    ByIngredient(String),
    Random,
}

/// Read access to a recipe catalog.
///
/// Every method either returns at least one record or fails; an empty answer is
/// reported as [`SourceError::NotFound`].
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Full records whose name matches the term.
    async fn search_by_name(&self, term: &str) -> Result<Vec<SourcedRecord>, SourceError>;

    /// Partial records (id, name, thumbnail) of drinks using the ingredient.
    async fn filter_by_ingredient(&self, term: &str) -> Result<Vec<SourcedRecord>, SourceError>;

    /// The full record for one id.
    async fn lookup(&self, id: &str) -> Result<SourcedRecord, SourceError>;

    /// A single random full record.
    async fn random(&self) -> Result<Vec<SourcedRecord>, SourceError>;

    /// Run a query. Blank terms are rejected before anything is sent.
    async fn query(&self, query: &Query) -> Result<Vec<SourcedRecord>, SourceError> {
        match query {
            Query::ByName(term) => self.search_by_name(require_term(term)?).await,
            Query::ByIngredient(term) => self.filter_by_ingredient(require_term(term)?).await,
            Query::Random => self.random().await,
        }
    }
}

/// Trim a search term, refusing one that is empty.
pub fn require_term(term: &str) -> Result<&str, ValidationError> {
    let term = term.trim();
    if term.is_empty() {
        Err(ValidationError::EmptySearchTerm)
    } else {
        Ok(term)
    }
}

/// The catalog wraps every answer as `{"drinks": [...]}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    drinks: Value,
}

impl Envelope {
    /// A missing or null list means "no results". So does the odd string the filter
    /// endpoint sends back for unknown ingredients.
    fn into_records(self) -> Result<Vec<SourcedRecord>, SourceError> {
        let records: Vec<SourcedRecord> = match self.drinks {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => vec![],
        };
        if records.is_empty() {
            Err(SourceError::NotFound)
        } else {
            Ok(records)
        }
    }
}

/// HTTP client for TheCocktailDB.
#[derive(Clone, Debug)]
pub struct CocktailDb {
    client: reqwest::Client,
    base_url: String,
}

impl CocktailDb {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, endpoint: &str) -> Result<Vec<SourcedRecord>, SourceError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("Fetching {}", url);
        let envelope: Envelope = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        envelope.into_records()
    }
}

#[async_trait]
impl RecipeSource for CocktailDb {
    async fn search_by_name(&self, term: &str) -> Result<Vec<SourcedRecord>, SourceError> {
        let term = require_term(term)?;
        self.fetch(&format!("search.php?s={}", url_escape::encode_component(term)))
            .await
    }

    async fn filter_by_ingredient(&self, term: &str) -> Result<Vec<SourcedRecord>, SourceError> {
        let term = require_term(term)?;
        self.fetch(&format!("filter.php?i={}", url_escape::encode_component(term)))
            .await
    }

    async fn lookup(&self, id: &str) -> Result<SourcedRecord, SourceError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(SourceError::NotFound);
        }
        self.fetch(&format!("lookup.php?i={}", url_escape::encode_component(id)))
            .await?
            .into_iter()
            .next()
            .ok_or(SourceError::NotFound)
    }

    async fn random(&self) -> Result<Vec<SourcedRecord>, SourceError> {
        self.fetch("random.php").await
    }
}
