use bb::basic_models::Recipe;

/// Plain-text card for printing a recipe to the terminal.
pub fn format_recipe(recipe: &Recipe) -> String {
    let mut lines = vec![format!("{} [{}]", recipe.name, recipe.id)];
    let tags: Vec<&str> = [&recipe.category, &recipe.alcoholic_type, &recipe.glass]
        .into_iter()
        .filter_map(|tag| tag.as_deref())
        .collect();
    if !tags.is_empty() {
        lines.push(format!("  {}", tags.join(" · ")));
    }
    if recipe.custom {
        lines.push("  Your creation".to_string());
    }
    lines.push("  Ingredients:".to_string());
    for ingredient in &recipe.ingredients {
        lines.push(format!("    - {}: {}", ingredient.name, ingredient.measure));
    }
    lines.push(format!("  Instructions: {}", recipe.instructions));
    lines.join("\n")
}
