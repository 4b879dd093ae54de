use serde::{Deserialize, Serialize};

/// Low/high bounds for an estimated quantity. Integer JSON values coerce to
/// floats during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const ZERO: Range = Range { low: 0.0, high: 0.0 };

    /// Returns the range with `low <= high`, swapping the bounds if the model
    /// inverted them.
    pub fn ordered(self) -> Range {
        if self.low <= self.high {
            self
        } else {
            Range {
                low: self.high,
                high: self.low,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacrosG {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub portion_size: String,
    #[serde(default)]
    pub cooking_method: Option<String>,
    pub macros_g: MacrosG,
    pub calories_kcal: Range,
    pub assumptions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalMacros {
    pub proteins: Range,
    pub carbs: Range,
    pub fat: Range,
}

/// The validated result of one image analysis. This is both the `/analyze`
/// response body and the document persisted per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    pub overview: String,
    pub short_name: String,
    pub items: Vec<FoodItem>,
    pub total_calories_kcal: Range,
    pub total_macros: TotalMacros,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_keeps_a_sane_range() {
        let r = Range { low: 100.0, high: 200.0 };
        assert_eq!(r.ordered(), r);
    }

    #[test]
    fn ordered_swaps_inverted_bounds() {
        let r = Range { low: 200.0, high: 100.0 };
        assert_eq!(r.ordered(), Range { low: 100.0, high: 200.0 });
    }

    #[test]
    fn food_item_type_field_round_trips() {
        let json = r#"{
            "name": "rice",
            "type": "carb",
            "portion_size": "1 cup",
            "macros_g": {"protein": 4, "carbs": 45, "fat": 0.5},
            "calories_kcal": {"low": 190, "high": 220},
            "assumptions": "Cooked white rice."
        }"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, "carb");
        assert_eq!(item.cooking_method, None);
        // integer calories coerce to f64
        assert_eq!(item.calories_kcal.low, 190.0);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["type"], "carb");
        assert!(back.get("kind").is_none());
    }
}
