use serde_json::{Map, Value};

use crate::error::PredictError;
use crate::model::{Category, PredictionRequest};

pub const CATEGORY: &str = "category";
pub const SALES_PER_DAY: &str = "sales_per_day";
pub const SHELF_LIFE_DAYS: &str = "shelf_life_days";
pub const DAYS_ON_SHELF: &str = "days_on_shelf";
pub const TEMPERATURE_C: &str = "temperature_C";

/// Parses a `/predict` body. The content type is not checked, only the bytes.
pub fn parse_body(body: &[u8]) -> Result<PredictionRequest, PredictError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictError::invalid(format!("request body is not valid JSON: {e}")))?;
    match value {
        Value::Object(fields) => coerce_request(&fields),
        _ => Err(PredictError::invalid("request body must be a JSON object")),
    }
}

/// Extracts and coerces the five fields in wire order; the first failure wins.
pub fn coerce_request(fields: &Map<String, Value>) -> Result<PredictionRequest, PredictError> {
    let category = coerce_category(required(fields, CATEGORY)?)?;
    let sales_per_day = coerce_real(SALES_PER_DAY, required(fields, SALES_PER_DAY)?)
        .and_then(|x| non_negative(SALES_PER_DAY, x))?;
    let shelf_life_days = coerce_count(SHELF_LIFE_DAYS, required(fields, SHELF_LIFE_DAYS)?)?;
    let days_on_shelf = coerce_count(DAYS_ON_SHELF, required(fields, DAYS_ON_SHELF)?)?;
    let temperature_c = coerce_real(TEMPERATURE_C, required(fields, TEMPERATURE_C)?)?;

    Ok(PredictionRequest {
        category,
        sales_per_day,
        shelf_life_days,
        days_on_shelf,
        temperature_c,
    })
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, PredictError> {
    fields.get(name).ok_or(PredictError::MissingField(name))
}

fn coerce_category(value: &Value) -> Result<Category, PredictError> {
    match value {
        Value::Number(n) => Ok(match integral(n) {
            Some(code) => Category::Numeric(code),
            None => Category::Named(n.to_string()),
        }),
        Value::String(s) => Ok(match s.trim().parse::<i64>() {
            Ok(code) => Category::Numeric(code),
            Err(_) => Category::Named(s.clone()),
        }),
        other => Err(PredictError::invalid(format!(
            "{CATEGORY} must be a number or a name, got {other}"
        ))),
    }
}

fn coerce_real(name: &str, value: &Value) -> Result<f64, PredictError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(x) if x.is_finite() => Ok(x),
        _ => Err(PredictError::invalid(format!("{name} must be a number, got {value}"))),
    }
}

fn coerce_count(name: &str, value: &Value) -> Result<u32, PredictError> {
    let parsed = match value {
        Value::Number(n) => integral(n),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(count) = parsed else {
        return Err(PredictError::invalid(format!("{name} must be an integer, got {value}")));
    };
    u32::try_from(count).map_err(|_| {
        if count < 0 {
            PredictError::invalid(format!("{name} must be non-negative, got {count}"))
        } else {
            PredictError::invalid(format!("{name} is out of range, got {count}"))
        }
    })
}

fn non_negative(name: &str, x: f64) -> Result<f64, PredictError> {
    if x < 0.0 {
        return Err(PredictError::invalid(format!("{name} must be non-negative, got {x}")));
    }
    Ok(x)
}

// Integral floats such as `10.0` count as integers.
fn integral(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test body must be an object"),
        }
    }

    fn valid() -> Value {
        json!({
            "category": 0,
            "sales_per_day": 5,
            "shelf_life_days": 10,
            "days_on_shelf": 3,
            "temperature_C": 4
        })
    }

    #[test]
    fn coerces_numeric_body() {
        let request = coerce_request(&fields(valid())).unwrap();
        assert_eq!(request.category, Category::Numeric(0));
        assert_eq!(request.sales_per_day, 5.0);
        assert_eq!(request.shelf_life_days, 10);
        assert_eq!(request.days_on_shelf, 3);
        assert_eq!(request.temperature_c, 4.0);
    }

    #[test]
    fn coerces_string_encoded_numbers() {
        let body = json!({
            "category": "3",
            "sales_per_day": "12.5",
            "shelf_life_days": "7",
            "days_on_shelf": 2.0,
            "temperature_C": "-1.5"
        });
        let request = coerce_request(&fields(body)).unwrap();
        assert_eq!(request.category, Category::Numeric(3));
        assert_eq!(request.sales_per_day, 12.5);
        assert_eq!(request.shelf_life_days, 7);
        assert_eq!(request.days_on_shelf, 2);
        assert_eq!(request.temperature_c, -1.5);
    }

    #[test]
    fn keeps_category_names() {
        let mut body = valid();
        body["category"] = json!("Dairy");
        let request = coerce_request(&fields(body)).unwrap();
        assert_eq!(request.category, Category::Named("Dairy".into()));

        let mut body = valid();
        body["category"] = json!(2.5);
        let request = coerce_request(&fields(body)).unwrap();
        assert_eq!(request.category, Category::Named("2.5".into()));
    }

    #[test]
    fn reports_each_missing_field_by_wire_name() {
        for name in [CATEGORY, SALES_PER_DAY, SHELF_LIFE_DAYS, DAYS_ON_SHELF, TEMPERATURE_C] {
            let mut body = fields(valid());
            body.remove(name);
            let err = coerce_request(&body).unwrap_err();
            assert!(matches!(err, PredictError::MissingField(field) if field == name));
            assert_eq!(err.to_string(), format!("Missing field: {name}"));
        }
    }

    #[test]
    fn rejects_uncoercible_values() {
        let cases = [
            (SALES_PER_DAY, json!("lots")),
            (SALES_PER_DAY, json!(null)),
            (SHELF_LIFE_DAYS, json!(10.5)),
            (SHELF_LIFE_DAYS, json!("ten")),
            (DAYS_ON_SHELF, json!(true)),
            (TEMPERATURE_C, json!([4])),
            (TEMPERATURE_C, json!("NaN")),
            (CATEGORY, json!(null)),
            (CATEGORY, json!({"name": "dairy"})),
        ];
        for (name, value) in cases {
            let mut body = valid();
            body[name] = value;
            let err = coerce_request(&fields(body)).unwrap_err();
            assert!(matches!(err, PredictError::InvalidInput(_)), "{name}: {err}");
        }
    }

    #[test]
    fn rejects_negative_quantities() {
        for name in [SALES_PER_DAY, SHELF_LIFE_DAYS, DAYS_ON_SHELF] {
            let mut body = valid();
            body[name] = json!(-1);
            let err = coerce_request(&fields(body)).unwrap_err();
            assert!(err.to_string().contains("non-negative"), "{name}: {err}");
        }
    }

    #[test]
    fn first_failure_in_wire_order_wins() {
        let body = json!({ "category": null });
        let err = coerce_request(&fields(body)).unwrap_err();
        assert!(matches!(err, PredictError::InvalidInput(_)));

        let body = json!({ "category": 1, "shelf_life_days": "x" });
        let err = coerce_request(&fields(body)).unwrap_err();
        assert!(matches!(err, PredictError::MissingField(SALES_PER_DAY)));
    }

    #[test]
    fn body_must_be_a_json_object() {
        assert!(matches!(parse_body(b"not json"), Err(PredictError::InvalidInput(_))));
        assert!(matches!(parse_body(b"[1, 2]"), Err(PredictError::InvalidInput(_))));
        assert!(matches!(parse_body(b""), Err(PredictError::InvalidInput(_))));
        assert!(parse_body(valid().to_string().as_bytes()).is_ok());
    }
}
