//! The user's own cocktails.
//!
//! The whole collection is stored as one JSON array under [`COLLECTION_KEY`]. Every
//! change writes the complete new array first and only then updates the in-memory
//! copy, so the two never disagree.

use bb::basic_models::{Recipe, RecipeDraft};
use bb::errors::ValidationError;

use crate::storage::{KeyValueStore, StorageError};

pub const COLLECTION_KEY: &str = "saved_cocktails";

#[derive(thiserror::Error, Debug)]
pub enum CollectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Could not save your collection: {0}")]
    Persist(#[from] StorageError),
    #[error("Could not encode your collection: {0}")]
    Encode(#[from] serde_json::Error),
}

pub struct CollectionStore {
    backing: Box<dyn KeyValueStore>,
    recipes: Vec<Recipe>,
    last_issued: i64,
}

impl CollectionStore {
    /// Load the saved collection.
    ///
    /// A missing or unreadable value starts an empty collection. Only a failure to
    /// read from the backing store at all is an error.
    pub fn initialize(backing: impl KeyValueStore + 'static) -> Result<Self, StorageError> {
        let recipes = match backing.get(COLLECTION_KEY)? {
            None => vec![],
            Some(text) => serde_json::from_str::<Vec<Recipe>>(&text).unwrap_or_else(|err| {
                tracing::warn!("Saved collection is unreadable, starting empty: {}", err);
                vec![]
            }),
        };
        let last_issued = recipes
            .iter()
            .filter_map(|recipe| recipe.id.authored())
            .max()
            .unwrap_or(0);
        tracing::info!("Loaded {} saved cocktails", recipes.len());
        Ok(Self {
            backing: Box::new(backing),
            recipes,
            last_issued,
        })
    }

    /// Validate a draft, give it a fresh id, and save it at the end of the collection.
    pub fn create(&mut self, draft: RecipeDraft) -> Result<Recipe, CollectionError> {
        let id = self.next_id();
        let recipe = draft.into_recipe(id)?;
        let mut updated = self.recipes.clone();
        updated.push(recipe.clone());
        self.persist(&updated)?;
        self.recipes = updated;
        self.last_issued = id;
        tracing::info!("Saved {} ({}) to the collection", recipe.name, id);
        Ok(recipe)
    }

    /// Saved cocktails, oldest first.
    pub fn list(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: i64) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|recipe| recipe.id.authored() == Some(id))
    }

    /// Remove a saved cocktail. Returns whether anything was removed; removing an id
    /// that is not there is not an error.
    pub fn delete(&mut self, id: i64) -> Result<bool, CollectionError> {
        let updated: Vec<Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| recipe.id.authored() != Some(id))
            .cloned()
            .collect();
        if updated.len() == self.recipes.len() {
            return Ok(false);
        }
        self.persist(&updated)?;
        self.recipes = updated;
        tracing::info!("Deleted {} from the collection", id);
        Ok(true)
    }

    /// Millisecond timestamps, bumped past the last id when the clock has not moved on.
    fn next_id(&self) -> i64 {
        chrono::Utc::now()
            .timestamp_millis()
            .max(self.last_issued + 1)
    }

    fn persist(&self, recipes: &[Recipe]) -> Result<(), CollectionError> {
        let text = serde_json::to_string(recipes)?;
        self.backing.set(COLLECTION_KEY, &text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};
    use bb::basic_models::{DraftIngredient, IngredientLine, RecipeId, DEFAULT_MEASURE};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn draft(name: &str) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            glass: Some("Coupe".into()),
            instructions: Some("Shake with ice.".into()),
            image_url: None,
            ingredients: vec![
                DraftIngredient {
                    name: "Gin".into(),
                    measure: Some("2 oz".into()),
                },
                DraftIngredient {
                    name: "Lemon juice".into(),
                    measure: None,
                },
            ],
        }
    }

    fn persisted(store: &MemoryStore) -> Vec<Recipe> {
        serde_json::from_str(&store.get(COLLECTION_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn create_list_delete_round_trip() {
        let backing = Arc::new(MemoryStore::default());
        let mut collection = CollectionStore::initialize(backing.clone()).unwrap();
        assert!(collection.list().is_empty());

        let recipe = collection.create(draft("Bee's Knees")).unwrap();
        assert_eq!(collection.list(), [recipe.clone()]);
        assert_eq!(persisted(&backing), collection.list());
        assert_eq!(recipe.name, "Bee's Knees");
        assert_eq!(recipe.glass.as_deref(), Some("Coupe"));
        assert_eq!(recipe.instructions, "Shake with ice.");
        assert_eq!(
            recipe.ingredients,
            vec![
                IngredientLine::new("Gin", Some("2 oz")),
                IngredientLine::new("Lemon juice", Some(DEFAULT_MEASURE)),
            ]
        );
        assert!(recipe.custom);

        let id = recipe.id.authored().unwrap();
        assert_eq!(collection.get(id), Some(&recipe));
        assert!(collection.delete(id).unwrap());
        assert!(collection.list().is_empty());
        assert!(persisted(&backing).is_empty());
        assert!(!collection.delete(id).unwrap());
    }

    #[test]
    fn invalid_drafts_change_nothing() {
        let backing = Arc::new(MemoryStore::default());
        let mut collection = CollectionStore::initialize(backing.clone()).unwrap();
        collection.create(draft("Aviation")).unwrap();
        let before = collection.list().to_vec();

        let err = collection.create(draft("")).unwrap_err();
        assert!(matches!(err, CollectionError::Validation(ValidationError::EmptyName)));

        let mut no_ingredients = draft("Empty Glass");
        no_ingredients.ingredients = vec![DraftIngredient::default()];
        let err = collection.create(no_ingredients).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::Validation(ValidationError::NoIngredients)
        ));

        assert_eq!(collection.list(), before);
        assert_eq!(persisted(&backing), before);
    }

    #[test]
    fn failed_write_leaves_both_sides_untouched() {
        let backing = Arc::new(MemoryStore::default());
        let mut collection = CollectionStore::initialize(backing.clone()).unwrap();
        let kept = collection.create(draft("Gimlet")).unwrap();

        backing.set_read_only(true);
        assert!(matches!(
            collection.create(draft("Daiquiri")),
            Err(CollectionError::Persist(StorageError::ReadOnly))
        ));
        let id = kept.id.authored().unwrap();
        assert!(matches!(
            collection.delete(id),
            Err(CollectionError::Persist(StorageError::ReadOnly))
        ));
        assert_eq!(collection.list(), [kept.clone()]);
        assert_eq!(persisted(&backing), [kept]);
    }

    #[test]
    fn ids_strictly_increase() {
        let mut collection = CollectionStore::initialize(MemoryStore::default()).unwrap();
        let ids: Vec<i64> = (0..25)
            .map(|n| {
                collection
                    .create(draft(&format!("Round {}", n)))
                    .unwrap()
                    .id
                    .authored()
                    .unwrap()
            })
            .collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
    }

    #[test]
    fn ids_continue_after_the_newest_saved_one() {
        let backing = MemoryStore::default();
        let far_future = chrono::Utc::now().timestamp_millis() + 86_400_000;
        let saved = draft("Time Traveler").into_recipe(far_future).unwrap();
        backing
            .set(COLLECTION_KEY, &serde_json::to_string(&[saved]).unwrap())
            .unwrap();
        let mut collection = CollectionStore::initialize(backing).unwrap();
        let next = collection.create(draft("Next")).unwrap();
        assert_eq!(next.id, RecipeId::Authored(far_future + 1));
    }

    #[test]
    fn unreadable_collection_starts_empty() {
        let backing = MemoryStore::default();
        backing.set(COLLECTION_KEY, "{not json").unwrap();
        let collection = CollectionStore::initialize(backing).unwrap();
        assert!(collection.list().is_empty());

        let backing = MemoryStore::default();
        backing.set(COLLECTION_KEY, r#"{"name": "not a list"}"#).unwrap();
        let collection = CollectionStore::initialize(backing).unwrap();
        assert!(collection.list().is_empty());
    }

    #[test]
    fn collection_survives_reopening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backbar.db");
        let created = {
            let mut collection =
                CollectionStore::initialize(SqliteStore::open(&path).unwrap()).unwrap();
            let first = collection.create(draft("Negroni")).unwrap();
            let second = collection.create(draft("Boulevardier")).unwrap();
            vec![first, second]
        };
        let collection = CollectionStore::initialize(SqliteStore::open(&path).unwrap()).unwrap();
        assert_eq!(collection.list(), created);
    }
}
