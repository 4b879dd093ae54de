use thiserror::Error;

use super::model::NutritionReport;
use super::normalize::Normalized;

/// Schema mismatch after normalization. Distinct from a parse failure, which
/// the normalizer absorbs into a fallback report: reaching this error means
/// even the recovered object does not match the contract.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("response does not match the nutrition report schema: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("overview must not be empty")]
    EmptyOverview,

    #[error("item `{item}` has a negative {field} value")]
    NegativeMacro { item: String, field: &'static str },
}

/// Checks a normalized object against the report schema, coercing integer
/// calorie values to floats along the way. Inverted ranges are repaired
/// rather than rejected, so `low <= high` holds on every returned report.
pub fn validate(normalized: Normalized) -> Result<NutritionReport, ValidationError> {
    let mut report: NutritionReport = serde_json::from_value(normalized.into_value())?;

    if report.overview.trim().is_empty() {
        return Err(ValidationError::EmptyOverview);
    }

    for item in &report.items {
        for (field, value) in [
            ("protein", item.macros_g.protein),
            ("carbs", item.macros_g.carbs),
            ("fat", item.macros_g.fat),
        ] {
            if value < 0.0 {
                return Err(ValidationError::NegativeMacro {
                    item: item.name.clone(),
                    field,
                });
            }
        }
    }

    report.total_calories_kcal = report.total_calories_kcal.ordered();
    report.total_macros.proteins = report.total_macros.proteins.ordered();
    report.total_macros.carbs = report.total_macros.carbs.ordered();
    report.total_macros.fat = report.total_macros.fat.ordered();
    for item in &mut report.items {
        item.calories_kcal = item.calories_kcal.ordered();
    }

    Ok(report)
}
