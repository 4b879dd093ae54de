mod model;
mod normalize;
mod validate;

pub use model::{FoodItem, MacrosG, NutritionReport, Range, TotalMacros};
pub use normalize::{normalize, Normalized};
pub use validate::{validate, ValidationError};
