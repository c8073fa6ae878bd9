//! Structural checks for poem data before it reaches the game.
//!
//! Validation never fails with an error: every broken rule is collected into a list of
//! human-readable messages so the caller can decide whether to reject the whole catalog or
//! filter out individual records.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::poem::{CATALOG_SIZE, MAX_POEM_ID, MIN_POEM_ID, PoemRecord};

const TEXT_FIELDS: [&str; 3] = ["author", "upperVerse", "lowerVerse"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors }
    }
}

fn id_error() -> String {
    format!("id must be an integer between {MIN_POEM_ID} and {MAX_POEM_ID}")
}

/// Integral value of a JSON number. JS hands integers over as floats, so `3.0` counts.
fn integral(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

fn id_in_range(id: i64) -> bool {
    (i64::from(MIN_POEM_ID)..=i64::from(MAX_POEM_ID)).contains(&id)
}

fn is_filled(text: &str) -> bool {
    !text.trim().is_empty()
}

fn record_errors(candidate: &Value) -> Vec<String> {
    let Some(fields) = candidate.as_object() else {
        return vec!["record must be an object".to_string()];
    };
    let mut errors = Vec::new();
    match fields.get("id").and_then(integral) {
        Some(id) if id_in_range(id) => {}
        _ => errors.push(id_error()),
    }
    for name in TEXT_FIELDS {
        let ok = fields.get(name).and_then(Value::as_str).is_some_and(is_filled);
        if !ok {
            errors.push(format!("{name} must be a non-empty string"));
        }
    }
    errors
}

/// Check one candidate poem: object shape, id range, and non-blank text fields.
pub fn validate_record(candidate: &Value) -> Validation {
    Validation::from_errors(record_errors(candidate))
}

/// Check a full catalog: array shape, exact size, each element, and id uniqueness.
pub fn validate_collection(candidates: &Value) -> Validation {
    let Some(items) = candidates.as_array() else {
        return Validation::from_errors(vec!["collection must be an array".to_string()]);
    };
    let mut errors = Vec::new();
    if items.len() != CATALOG_SIZE {
        errors.push(format!("expected {CATALOG_SIZE} poems, found {}", items.len()));
    }
    for (index, item) in items.iter().enumerate() {
        errors.extend(record_errors(item).into_iter().map(|e| format!("poem[{index}]: {e}")));
    }
    let ids = items
        .iter()
        .filter_map(|item| item.get("id").and_then(integral));
    errors.extend(duplicate_errors(ids));
    Validation::from_errors(errors)
}

/// Same rules as [`validate_collection`] for records that are already typed.
pub fn validate_records(records: &[PoemRecord]) -> Validation {
    let mut errors = Vec::new();
    if records.len() != CATALOG_SIZE {
        errors.push(format!("expected {CATALOG_SIZE} poems, found {}", records.len()));
    }
    for (index, poem) in records.iter().enumerate() {
        if !id_in_range(i64::from(poem.id)) {
            errors.push(format!("poem[{index}]: {}", id_error()));
        }
        let texts = [&poem.author, &poem.upper_verse, &poem.lower_verse];
        for (name, text) in TEXT_FIELDS.iter().zip(texts) {
            if !is_filled(text) {
                errors.push(format!("poem[{index}]: {name} must be a non-empty string"));
            }
        }
    }
    errors.extend(duplicate_errors(records.iter().map(|p| i64::from(p.id))));
    Validation::from_errors(errors)
}

/// One message per duplicated id value, in order of first repetition.
fn duplicate_errors(ids: impl Iterator<Item = i64>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            errors.push(format!("duplicate id: {id}"));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poem::fixtures::poems;
    use serde_json::json;

    fn full_collection() -> Value {
        serde_json::to_value(poems(100)).unwrap()
    }

    #[test]
    fn accepts_well_formed_record() {
        let v = validate_record(&json!({
            "id": 1,
            "author": "Tenji Tennō",
            "upperVerse": "aki no ta no",
            "lowerVerse": "waga koromode wa",
        }));
        assert!(v.valid);
        assert!(v.errors.is_empty());
    }

    #[test]
    fn rejects_arrays_and_null() {
        for bad in [json!([]), json!(null), json!("poem"), json!(5)] {
            let v = validate_record(&bad);
            assert!(!v.valid);
            assert_eq!(v.errors, vec!["record must be an object"]);
        }
    }

    #[test]
    fn reports_every_broken_rule() {
        let v = validate_record(&json!({
            "id": 101,
            "author": "   ",
            "upperVerse": 3,
        }));
        assert!(!v.valid);
        assert_eq!(
            v.errors,
            vec![
                "id must be an integer between 1 and 100",
                "author must be a non-empty string",
                "upperVerse must be a non-empty string",
                "lowerVerse must be a non-empty string",
            ]
        );
    }

    #[test]
    fn id_accepts_integral_float_but_not_fraction() {
        let mut rec = json!({"id": 4.0, "author": "a", "upperVerse": "u", "lowerVerse": "l"});
        assert!(validate_record(&rec).valid);
        rec["id"] = json!(4.5);
        assert!(!validate_record(&rec).valid);
        rec["id"] = json!("4");
        assert!(!validate_record(&rec).valid);
        rec["id"] = json!(0);
        assert!(!validate_record(&rec).valid);
    }

    #[test]
    fn collection_of_hundred_is_valid() {
        let v = validate_collection(&full_collection());
        assert!(v.valid, "{:?}", v.errors);
    }

    #[test]
    fn collection_must_be_array() {
        let v = validate_collection(&json!({"poems": []}));
        assert_eq!(v.errors, vec!["collection must be an array"]);
    }

    #[test]
    fn collection_errors_are_prefixed_with_index() {
        let mut all = full_collection();
        all[5]["author"] = json!("");
        let v = validate_collection(&all);
        assert!(!v.valid);
        assert_eq!(v.errors, vec!["poem[5]: author must be a non-empty string"]);
    }

    #[test]
    fn duplicate_reported_once_by_value() {
        let mut all = full_collection();
        all[20]["id"] = json!(9);
        all[30]["id"] = json!(9);
        let v = validate_collection(&all);
        assert!(!v.valid);
        assert_eq!(v.errors, vec!["duplicate id: 9"]);
    }

    #[test]
    fn wrong_count_reported() {
        let mut all = full_collection();
        all.as_array_mut().unwrap().truncate(3);
        let v = validate_collection(&all);
        assert_eq!(v.errors, vec!["expected 100 poems, found 3"]);
    }

    #[test]
    fn typed_records_follow_same_rules() {
        let mut records = poems(100);
        records[0].lower_verse = " \t".into();
        records[1].id = 0;
        let v = validate_records(&records);
        assert_eq!(
            v.errors,
            vec![
                "poem[0]: lowerVerse must be a non-empty string",
                "poem[1]: id must be an integer between 1 and 100",
            ]
        );
    }
}
