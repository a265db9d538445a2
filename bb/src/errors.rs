/// A user-supplied value failed a precondition. Nothing is changed when one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a search term")]
    EmptySearchTerm,
    #[error("Please enter a cocktail name")]
    EmptyName,
    #[error("Please add at least one ingredient")]
    NoIngredients,
}
