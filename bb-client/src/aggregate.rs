use std::collections::HashSet;
use std::sync::Arc;

use bb::basic_models::{Recipe, SourcedRecord};
use tokio::task::JoinSet;

use crate::source::{RecipeSource, SourceError};

/// A results page never shows more than this many cocktails.
pub const MAX_DETAIL_RESULTS: usize = 12;

/// Turn partial catalog records into full recipes.
///
/// Looks up the first [`MAX_DETAIL_RESULTS`] distinct ids, all at the same time, and
/// waits for every lookup to settle. Lookups that fail are left out. The call only
/// fails when there was something to look up and nothing came back; in that case an
/// unreachable catalog wins over "not found".
///
/// Results keep the order of the input.
pub async fn resolve_details<S>(
    source: Arc<S>,
    references: &[SourcedRecord],
) -> Result<Vec<Recipe>, SourceError>
where
    S: RecipeSource + ?Sized + 'static,
{
    let mut seen = HashSet::new();
    let ids: Vec<String> = references
        .iter()
        .filter_map(SourcedRecord::id)
        .filter(|id| seen.insert(id.to_string()))
        .take(MAX_DETAIL_RESULTS)
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let mut lookups = JoinSet::new();
    for (position, id) in ids.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        lookups.spawn(async move {
            let outcome = source.lookup(&id).await.and_then(|record| {
                Recipe::from_sourced(&record).ok_or(SourceError::NotFound)
            });
            (position, id, outcome)
        });
    }

    let mut resolved = Vec::with_capacity(ids.len());
    let mut unavailable = None;
    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((position, _, Ok(recipe))) => resolved.push((position, recipe)),
            Ok((_, id, Err(err))) => {
                tracing::warn!("Dropping cocktail {} from results: {}", id, err);
                if matches!(err, SourceError::Unavailable(_)) {
                    unavailable = Some(err);
                }
            }
            Err(err) => {
                tracing::warn!("Detail lookup task failed: {}", err);
                unavailable = Some(SourceError::Unavailable(err.to_string()));
            }
        }
    }

    if resolved.is_empty() {
        return Err(unavailable.unwrap_or(SourceError::NotFound));
    }

    resolved.sort_by_key(|(position, _)| *position);
    let mut returned = HashSet::new();
    let recipes: Vec<Recipe> = resolved
        .into_iter()
        .map(|(_, recipe)| recipe)
        .filter(|recipe| returned.insert(recipe.id.clone()))
        .collect();
    tracing::info!("Resolved {} of {} cocktails", recipes.len(), ids.len());
    Ok(recipes)
}
