//! # Domain Types
//!
//! Core domain types for the recipe aggregate.
//!
//! ## The Aggregate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Recipe Aggregate                                 │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │     Recipe      │  parent row, owns both child collections          │
//! │  │  ─────────────  │                                                    │
//! │  │  id (i64)       │──┬──► Ingredient { name, quantity, unit }  (set)  │
//! │  │  name           │  │                                                 │
//! │  │  description    │  └──► Step { step_number, instruction }  (ordered)│
//! │  │  image (opt)    │                                                    │
//! │  │  timestamps     │  Children are created, replaced and deleted       │
//! │  └─────────────────┘  together with the parent - never independently.  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Recipe ids are storage-generated integers (last-insert-id). Ingredients and
//! steps have no identity of their own beyond the recipe they belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Recipe
// =============================================================================

/// A recipe's parent row: scalar fields and timestamps.
///
/// The nested read model is [`RecipeWithDetails`]; this type alone is the
/// shape of one `recipes` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Recipe {
    /// Storage-generated identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Number of servings the recipe yields.
    pub servings: Option<i64>,

    /// Preparation time in minutes.
    pub preparation_time: Option<i64>,

    /// Cooking time in minutes.
    pub cooking_time: Option<i64>,

    /// Free-text difficulty label ("easy", "medium", ...).
    pub difficulty: Option<String>,

    /// Country or cuisine of origin.
    pub country: Option<String>,

    /// Resolved image reference (public URL or object-store key).
    pub image: Option<String>,

    /// When the recipe was created.
    pub created_at: DateTime<Utc>,

    /// When the recipe was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Ingredient
// =============================================================================

/// One ingredient of a recipe.
///
/// `quantity` is an opaque string ("200", "2 1/2", "a pinch") - call sites
/// disagree on whether it is numeric, so no numeric contract is imposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

// =============================================================================
// Step
// =============================================================================

/// One step of a recipe.
///
/// `step_number` is 1-based and contiguous: for a recipe with N steps the
/// stored values are exactly 1..=N in the order the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Step {
    pub step_number: i64,
    pub instruction: String,
}

// =============================================================================
// Nested Read Model
// =============================================================================

/// A recipe with both child collections attached.
///
/// This is what `get` and `list` return: the parent fields flattened at the
/// top level plus `ingredients` and `steps`, matching the wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeWithDetails {
    #[serde(flatten)]
    pub recipe: Recipe,

    /// Unordered child set.
    pub ingredients: Vec<Ingredient>,

    /// Ordered ascending by `step_number`.
    pub steps: Vec<Step>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_serialization_flattens_parent() {
        let detail = RecipeWithDetails {
            recipe: Recipe {
                id: 7,
                name: "Pho".to_string(),
                description: "Vietnamese soup".to_string(),
                servings: Some(4),
                preparation_time: Some(30),
                cooking_time: Some(180),
                difficulty: Some("medium".to_string()),
                country: Some("Vietnam".to_string()),
                image: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            ingredients: vec![Ingredient {
                name: "rice noodles".to_string(),
                quantity: "200".to_string(),
                unit: "g".to_string(),
            }],
            steps: vec![
                Step {
                    step_number: 1,
                    instruction: "Boil broth".to_string(),
                },
                Step {
                    step_number: 2,
                    instruction: "Add noodles".to_string(),
                },
            ],
        };

        let json = serde_json::to_value(&detail).unwrap();
        // Parent fields sit at the top level, not under a "recipe" key
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Pho");
        assert!(json.get("recipe").is_none());
        assert_eq!(json["ingredients"][0]["unit"], "g");
        assert_eq!(json["steps"][1]["step_number"], 2);
    }
}
