//! # Repository Input Model
//!
//! The write-side input types for the recipe aggregate, plus the wire-payload
//! helpers the API layer uses to turn loosely-typed request fields into them.
//!
//! ## Why a ListField?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Child payloads on the wire                              │
//! │                                                                         │
//! │  JSON body:        "ingredients": [{"name": "...", ...}, ...]          │
//! │  Form field:       ingredients = "[{\"name\": \"...\", ...}]"          │
//! │                                     (a JSON-encoded string)            │
//! │                                                                         │
//! │  Both shapes are legal. ListField deserializes either and              │
//! │  into_items() resolves the encoded variant - a decode failure is a     │
//! │  ValidationError, never a storage error.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::validation;

// =============================================================================
// New Recipe
// =============================================================================

/// Input for creating a recipe or fully replacing one.
///
/// This is the repository's contract: structured, already parsed from
/// whatever wire encoding carried it. `image` is an already-resolved
/// reference - uploading the file itself happens before this is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub servings: Option<i64>,
    #[serde(default)]
    pub preparation_time: Option<i64>,
    #[serde(default)]
    pub cooking_time: Option<i64>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    /// Already-resolved image URL or object-store key.
    #[serde(default)]
    pub image: Option<String>,
    pub ingredients: Vec<IngredientInput>,
    /// Instruction texts in presentation order; positions become step_number.
    pub steps: Vec<String>,
}

impl NewRecipe {
    /// Runs the full validation rule set over this input.
    ///
    /// Delegates to [`validation::validate_new_recipe`]; the repository calls
    /// this before touching storage.
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_new_recipe(self)
    }
}

// =============================================================================
// Ingredient Input
// =============================================================================

/// One ingredient as submitted by the caller.
///
/// `quantity` is accepted as either a JSON string or a bare number and is
/// always carried as an opaque string from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub quantity: String,
    pub unit: String,
}

/// Deserializes a string from either a JSON string or a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

// =============================================================================
// List Field
// =============================================================================

/// A collection field that may arrive as a real array or as a JSON-encoded
/// string (the shape multipart form fields carry lists in).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField<T> {
    /// The field was a proper JSON array.
    Items(Vec<T>),
    /// The field was a string holding JSON-encoded items.
    Encoded(String),
}

impl<T: DeserializeOwned> ListField<T> {
    /// Resolves to the item list, decoding the encoded variant.
    ///
    /// `field` names the payload field in the error ("ingredients", "steps").
    pub fn into_items(self, field: &str) -> ValidationResult<Vec<T>> {
        match self {
            ListField::Items(items) => Ok(items),
            ListField::Encoded(raw) => {
                serde_json::from_str(&raw).map_err(|e| ValidationError::MalformedList {
                    field: field.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

/// Decodes a JSON-encoded list arriving as a plain form-field string.
///
/// Same contract as [`ListField::into_items`] for call sites that only ever
/// see text fields (multipart forms).
pub fn parse_list_field<T: DeserializeOwned>(field: &str, raw: &str) -> ValidationResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| ValidationError::MalformedList {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_field_array_passthrough() {
        let field: ListField<IngredientInput> = serde_json::from_str(
            r#"[{"name": "rice noodles", "quantity": "200", "unit": "g"}]"#,
        )
        .unwrap();

        let items = field.into_items("ingredients").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "rice noodles");
    }

    #[test]
    fn test_list_field_encoded_string() {
        // A JSON string whose content is itself JSON-encoded steps
        let field: ListField<String> =
            serde_json::from_str(r#""[\"Boil broth\",\"Add noodles\"]""#).unwrap();

        let items = field.into_items("steps").unwrap();
        assert_eq!(items, vec!["Boil broth", "Add noodles"]);
    }

    #[test]
    fn test_list_field_bad_encoding_is_validation_error() {
        let field: ListField<String> = ListField::Encoded("not json".to_string());

        let err = field.into_items("steps").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedList { field, .. } if field == "steps"));
    }

    #[test]
    fn test_quantity_accepts_number_or_string() {
        let a: IngredientInput =
            serde_json::from_str(r#"{"name": "flour", "quantity": 500, "unit": "g"}"#).unwrap();
        assert_eq!(a.quantity, "500");

        let b: IngredientInput =
            serde_json::from_str(r#"{"name": "flour", "quantity": "2 1/2", "unit": "cup"}"#)
                .unwrap();
        assert_eq!(b.quantity, "2 1/2");
    }

    #[test]
    fn test_parse_list_field_rejects_wrong_shape() {
        let err = parse_list_field::<String>("steps", r#"{"oops": true}"#).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedList { .. }));
    }
}
