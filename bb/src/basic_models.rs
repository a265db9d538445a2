use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::errors::ValidationError;
use crate::ingredients::extract_ingredients;

/// Shown for any recipe without a picture of its own.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://www.thecocktaildb.com/images/media/drink/default.jpg";
pub const DEFAULT_MEASURE: &str = "To taste";
pub const DEFAULT_AUTHORED_INSTRUCTIONS: &str = "Mix ingredients as desired.";
pub const MISSING_INSTRUCTIONS: &str = "No instructions available.";
pub const CUSTOM_CATEGORY: &str = "Custom";
pub const UNKNOWN_ALCOHOLIC_TYPE: &str = "Unknown";

/// Identity of a recipe.
///
/// Catalog recipes keep the catalog's string id. Recipes written by the user get a
/// millisecond timestamp, which is stored as a plain JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Authored(i64),
    Sourced(String),
}

impl RecipeId {
    pub fn authored(&self) -> Option<i64> {
        match self {
            RecipeId::Authored(id) => Some(*id),
            RecipeId::Sourced(_) => None,
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Authored(id) => write!(f, "{}", id),
            RecipeId::Sourced(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

impl IngredientLine {
    /// Build a line, falling back to "To taste" when the measure is missing or blank.
    pub fn new(name: &str, measure: Option<&str>) -> Self {
        Self {
            name: name.trim().to_string(),
            measure: non_blank(measure).unwrap_or_else(|| DEFAULT_MEASURE.to_string()),
        }
    }
}

/// A cocktail, either from the catalog or written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub image_url: String,
    pub category: Option<String>,
    pub glass: Option<String>,
    pub alcoholic_type: Option<String>,
    pub instructions: String,
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub custom: bool,
}

impl Recipe {
    /// Normalize a full catalog record.
    ///
    /// Returns `None` for records that lack an id or a name; those cannot be shown
    /// or looked up again.
    pub fn from_sourced(record: &SourcedRecord) -> Option<Recipe> {
        Some(Recipe {
            id: RecipeId::Sourced(record.id()?.to_string()),
            name: record.name()?.to_string(),
            image_url: record
                .field("strDrinkThumb")
                .unwrap_or(PLACEHOLDER_IMAGE_URL)
                .to_string(),
            category: record.field("strCategory").map(str::to_string),
            glass: record.field("strGlass").map(str::to_string),
            alcoholic_type: record.field("strAlcoholic").map(str::to_string),
            instructions: record
                .field("strInstructions")
                .unwrap_or(MISSING_INSTRUCTIONS)
                .to_string(),
            ingredients: extract_ingredients(record),
            custom: false,
        })
    }
}

/// One raw drink object from the catalog.
///
/// The catalog publishes drinks as flat objects (`idDrink`, `strDrink`,
/// `strIngredient1`..`strIngredient15`, ...) where any field may be null or missing.
/// Partial records from the filter endpoint carry only the id, name and thumbnail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcedRecord(BTreeMap<String, Value>);

impl SourcedRecord {
    /// A field counts as present only if it is a string with something besides whitespace.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.field("idDrink")
    }

    pub fn name(&self) -> Option<&str> {
        self.field("strDrink")
    }

    /// Set a field, returning the record for chaining.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

/// An ingredient row as typed into the authoring form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftIngredient {
    pub name: String,
    #[serde(default)]
    pub measure: Option<String>,
}

/// The authoring form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub glass: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<DraftIngredient>,
}

impl RecipeDraft {
    /// Ingredient rows with a name, in the order they were entered.
    pub fn ingredient_lines(&self) -> Vec<IngredientLine> {
        self.ingredients
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| IngredientLine::new(&row.name, row.measure.as_deref()))
            .collect()
    }

    /// Check the draft and turn it into a saved recipe with the given id.
    pub fn into_recipe(self, id: i64) -> Result<Recipe, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let ingredients = self.ingredient_lines();
        if ingredients.is_empty() {
            return Err(ValidationError::NoIngredients);
        }
        Ok(Recipe {
            id: RecipeId::Authored(id),
            name: name.to_string(),
            image_url: non_blank(self.image_url.as_deref())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            category: Some(CUSTOM_CATEGORY.to_string()),
            glass: non_blank(self.glass.as_deref()),
            alcoholic_type: Some(UNKNOWN_ALCOHOLIC_TYPE.to_string()),
            instructions: non_blank(self.instructions.as_deref())
                .unwrap_or_else(|| DEFAULT_AUTHORED_INSTRUCTIONS.to_string()),
            ingredients,
            custom: true,
        })
    }
}

/// The base spirits offered by the "search by liquor" view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr, Serialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Liquor {
    Vodka,
    Rum,
    Gin,
    Tequila,
    Whiskey,
    Bourbon,
    Brandy,
    Scotch,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn draft(name: &str, rows: &[(&str, Option<&str>)]) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            ingredients: rows
                .iter()
                .map(|(name, measure)| DraftIngredient {
                    name: name.to_string(),
                    measure: measure.map(str::to_string),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn recipe_ids_keep_their_json_shape() {
        let authored = serde_json::to_value(RecipeId::Authored(1_700_000_000_000)).unwrap();
        assert_eq!(authored, json!(1_700_000_000_000_i64));
        let sourced: RecipeId = serde_json::from_value(json!("11007")).unwrap();
        assert_eq!(sourced, RecipeId::Sourced("11007".into()));
        assert_eq!(sourced.to_string(), "11007");
        assert_eq!(sourced.authored(), None);
    }

    #[test]
    fn sourced_recipe_fills_in_defaults() {
        let record = SourcedRecord::default()
            .with("idDrink", "11007")
            .with("strDrink", "Margarita")
            .with("strDrinkThumb", Value::Null)
            .with("strIngredient1", "Tequila")
            .with("strMeasure1", "1 1/2 oz ");
        let recipe = Recipe::from_sourced(&record).unwrap();
        assert_eq!(recipe.id, RecipeId::Sourced("11007".into()));
        assert_eq!(recipe.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(recipe.instructions, MISSING_INSTRUCTIONS);
        assert_eq!(recipe.category, None);
        assert!(!recipe.custom);
        assert_eq!(
            recipe.ingredients,
            vec![IngredientLine::new("Tequila", Some("1 1/2 oz"))]
        );
    }

    #[test]
    fn records_without_identity_or_name_are_skipped() {
        let nameless = SourcedRecord::default().with("idDrink", "1");
        let anonymous = SourcedRecord::default().with("strDrink", "Mystery");
        let blank = SourcedRecord::default()
            .with("idDrink", "2")
            .with("strDrink", "   ");
        assert!(Recipe::from_sourced(&nameless).is_none());
        assert!(Recipe::from_sourced(&anonymous).is_none());
        assert!(Recipe::from_sourced(&blank).is_none());
    }

    #[test]
    fn draft_becomes_custom_recipe() {
        let recipe = draft(" Sunset ", &[("Rum", Some("2 oz")), ("  ", None), ("Lime", None)])
            .into_recipe(42)
            .unwrap();
        assert_eq!(recipe.id, RecipeId::Authored(42));
        assert_eq!(recipe.name, "Sunset");
        assert!(recipe.custom);
        assert_eq!(recipe.category.as_deref(), Some(CUSTOM_CATEGORY));
        assert_eq!(recipe.alcoholic_type.as_deref(), Some(UNKNOWN_ALCOHOLIC_TYPE));
        assert_eq!(recipe.instructions, DEFAULT_AUTHORED_INSTRUCTIONS);
        assert_eq!(recipe.image_url, PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            recipe.ingredients,
            vec![
                IngredientLine::new("Rum", Some("2 oz")),
                IngredientLine::new("Lime", Some(DEFAULT_MEASURE)),
            ]
        );
    }

    #[test]
    fn draft_validation_names_the_broken_rule() {
        assert_eq!(
            draft("  ", &[("Gin", None)]).into_recipe(1),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            draft("Nothing", &[("", Some("1 oz"))]).into_recipe(1),
            Err(ValidationError::NoIngredients)
        );
    }

    #[test]
    fn liquor_parses_case_insensitively() {
        assert_eq!(Liquor::from_str("vodka").unwrap(), Liquor::Vodka);
        assert_eq!(Liquor::Tequila.to_string(), "Tequila");
        assert!(Liquor::from_str("Unobtainium").is_err());
    }
}
