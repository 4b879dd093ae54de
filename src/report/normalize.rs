use serde_json::Value;

use super::model::{FoodItem, MacrosG, NutritionReport, Range, TotalMacros};

/// How much of an unparseable model response is quoted in the fallback notes.
const RAW_EXCERPT_MAX: usize = 200;

/// Outcome of extracting a JSON document from raw model output. Both variants
/// carry a report-shaped value so the validator has a single input type.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The model output parsed as JSON (after fence stripping).
    Parsed(Value),
    /// The output was not JSON; a deterministic placeholder report stands in.
    Fallback(Value),
}

impl Normalized {
    pub fn into_value(self) -> Value {
        match self {
            Normalized::Parsed(v) | Normalized::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }
}

/// Extracts a JSON object from raw model output. The model is not guaranteed
/// to return clean JSON; it often wraps the document in a markdown code
/// fence. A parse failure never propagates: the request path stays on a
/// well-typed report either way.
pub fn normalize(raw: &str) -> Normalized {
    let candidate = strip_code_fence(raw.trim());
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => Normalized::Parsed(value),
        Err(err) => {
            tracing::warn!(error = %err, "model output was not valid JSON, using fallback report");
            let report = fallback_report(raw);
            let value = serde_json::to_value(report).expect("fallback report serializes");
            Normalized::Fallback(value)
        }
    }
}

/// Strips a surrounding markdown code fence, labeled (```json) or not.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Schema-valid but semantically empty report produced when the model output
/// cannot be recovered. The notes quote a capped excerpt of the raw text.
fn fallback_report(raw: &str) -> NutritionReport {
    let excerpt: String = raw.trim().chars().take(RAW_EXCERPT_MAX).collect();
    NutritionReport {
        overview: "The vision model response could not be read as a nutrition analysis.".into(),
        short_name: "unrecognized meal".into(),
        items: vec![FoodItem {
            name: "unidentified item".into(),
            kind: "unknown".into(),
            portion_size: "unknown".into(),
            cooking_method: None,
            macros_g: MacrosG {
                protein: 0.0,
                carbs: 0.0,
                fat: 0.0,
            },
            calories_kcal: Range::ZERO,
            assumptions: "No food item could be identified in the model response.".into(),
        }],
        total_calories_kcal: Range::ZERO,
        total_macros: TotalMacros {
            proteins: Range::ZERO,
            carbs: Range::ZERO,
            fat: Range::ZERO,
        },
        notes: format!(
            "Automatic fallback: the model returned text that was not valid JSON. \
             Raw response excerpt: {excerpt}"
        ),
    }
}
