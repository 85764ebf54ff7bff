use serde::{Deserialize, Serialize};

/// Product category as sent by the client: either a numeric code or a name like "dairy".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Numeric(i64),
    Named(String),
}

impl Category {
    /// Canonical lowercase key used by the placement rule.
    pub fn normalized(&self) -> String {
        match self {
            Category::Numeric(code) => code.to_string(),
            Category::Named(name) => name.to_lowercase(),
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Category::Numeric(code) => Some(*code),
            Category::Named(_) => None,
        }
    }
}

/// A single shelf item to assess, already coerced from the request body.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionRequest {
    pub category: Category,
    pub sales_per_day: f64,
    pub shelf_life_days: u32,
    pub days_on_shelf: u32,
    pub temperature_c: f64,
}

impl PredictionRequest {
    pub fn is_expired(&self) -> bool {
        self.days_on_shelf >= self.shelf_life_days
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    Low,
    High,
}

impl Risk {
    /// Classifier label `1` means high waste risk; anything else is low.
    pub fn from_label(label: i64) -> Self {
        if label == 1 {
            Risk::High
        } else {
            Risk::Low
        }
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            Risk::High => "Donate / discount / remove",
            Risk::Low => "Keep on shelf and monitor",
        }
    }

    /// Confidence reported when the classifier cannot estimate probabilities.
    pub fn fallback_confidence(self) -> u8 {
        match self {
            Risk::High => 95,
            Risk::Low => 90,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShelfAction {
    Front,
    #[serde(rename = "Refrigerated Shelf")]
    RefrigeratedShelf,
    Back,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk: Risk,
    pub suggestion: String,
    pub confidence: u8,
    pub shelf_action: ShelfAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_normalization() {
        assert_eq!(Category::Numeric(3).normalized(), "3");
        assert_eq!(Category::Named("Dairy".into()).normalized(), "dairy");
        assert_eq!(Category::Named("MEAT".into()).code(), None);
    }

    #[test]
    fn only_label_one_is_high_risk() {
        assert_eq!(Risk::from_label(1), Risk::High);
        assert_eq!(Risk::from_label(0), Risk::Low);
        assert_eq!(Risk::from_label(2), Risk::Low);
        assert_eq!(Risk::from_label(-1), Risk::Low);
    }

    #[test]
    fn shelf_action_wire_names() {
        let json = serde_json::to_value(ShelfAction::RefrigeratedShelf).unwrap();
        assert_eq!(json, "Refrigerated Shelf");
        assert_eq!(serde_json::to_value(ShelfAction::Back).unwrap(), "Back");
        assert_eq!(serde_json::to_value(Risk::High).unwrap(), "High");
    }
}
