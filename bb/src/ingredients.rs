use crate::basic_models::{IngredientLine, SourcedRecord};

/// The catalog has room for this many ingredient/measure pairs per drink.
pub const INGREDIENT_SLOTS: usize = 15;

/// Pull the ingredient list out of a flat catalog record.
///
/// Every slot from 1 to 15 is checked, so a blank slot in the middle does not hide the
/// ones after it. A slot counts when it names an ingredient; its measure defaults to
/// "To taste".
pub fn extract_ingredients(record: &SourcedRecord) -> Vec<IngredientLine> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let name = record.field(&format!("strIngredient{}", slot))?;
            let measure = record.field(&format!("strMeasure{}", slot));
            Some(IngredientLine::new(name, measure))
        })
        .collect()
}
