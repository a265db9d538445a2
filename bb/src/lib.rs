pub mod basic_models;
pub mod errors;
pub mod ingredients;
pub mod reference;
