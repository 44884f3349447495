//! # Validation Module
//!
//! Input validation for the recipe aggregate.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Wire decoding (serde)                                        │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Array-or-string child payload resolution (ListField)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields (name, description)                               │
//! │  └── Non-empty child collections, size caps                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Invalid input is rejected HERE, before any storage call runs.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::input::NewRecipe;
use crate::{MAX_DESCRIPTION_LEN, MAX_INGREDIENTS, MAX_INSTRUCTION_LEN, MAX_NAME_LEN, MAX_STEPS};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a recipe name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LEN`] characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a recipe description.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::required("description"));
    }

    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validator
// =============================================================================

/// Validates a full recipe input before it reaches storage.
///
/// ## Rules
/// - `name` and `description` required, non-empty
/// - `ingredients` non-empty, at most [`MAX_INGREDIENTS`]
/// - `steps` non-empty, at most [`MAX_STEPS`], each instruction at most
///   [`MAX_INSTRUCTION_LEN`] characters
///
/// Empty ingredient names are tolerated deliberately; the only hard contract
/// on child content is that the collections themselves are present.
pub fn validate_new_recipe(input: &NewRecipe) -> ValidationResult<()> {
    validate_name(&input.name)?;
    validate_description(&input.description)?;

    if input.ingredients.is_empty() {
        return Err(ValidationError::empty("ingredients"));
    }

    if input.ingredients.len() > MAX_INGREDIENTS {
        return Err(ValidationError::TooMany {
            field: "ingredients".to_string(),
            max: MAX_INGREDIENTS,
        });
    }

    if input.steps.is_empty() {
        return Err(ValidationError::empty("steps"));
    }

    if input.steps.len() > MAX_STEPS {
        return Err(ValidationError::TooMany {
            field: "steps".to_string(),
            max: MAX_STEPS,
        });
    }

    for instruction in &input.steps {
        if instruction.len() > MAX_INSTRUCTION_LEN {
            return Err(ValidationError::TooLong {
                field: "steps".to_string(),
                max: MAX_INSTRUCTION_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::IngredientInput;

    fn valid_input() -> NewRecipe {
        NewRecipe {
            name: "Pho".to_string(),
            description: "Vietnamese soup".to_string(),
            ingredients: vec![IngredientInput {
                name: "rice noodles".to_string(),
                quantity: "200".to_string(),
                unit: "g".to_string(),
            }],
            steps: vec!["Boil broth".to_string(), "Add noodles".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_new_recipe(&valid_input()).is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Pho").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Vietnamese soup").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"A".repeat(3000)).is_err());
    }

    #[test]
    fn test_missing_children_rejected() {
        let mut input = valid_input();
        input.ingredients.clear();
        assert!(matches!(
            validate_new_recipe(&input),
            Err(ValidationError::EmptyCollection { field }) if field == "ingredients"
        ));

        let mut input = valid_input();
        input.steps.clear();
        assert!(matches!(
            validate_new_recipe(&input),
            Err(ValidationError::EmptyCollection { field }) if field == "steps"
        ));
    }

    #[test]
    fn test_oversized_collections_rejected() {
        let mut input = valid_input();
        input.steps = vec!["stir".to_string(); MAX_STEPS + 1];
        assert!(matches!(
            validate_new_recipe(&input),
            Err(ValidationError::TooMany { .. })
        ));
    }

    #[test]
    fn test_overlong_instruction_rejected() {
        let mut input = valid_input();
        input.steps = vec!["x".repeat(MAX_INSTRUCTION_LEN + 1)];
        assert!(matches!(
            validate_new_recipe(&input),
            Err(ValidationError::TooLong { field, .. }) if field == "steps"
        ));
    }
}
