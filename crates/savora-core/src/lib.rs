//! # savora-core: Pure Domain Logic for Savora
//!
//! This crate is the **heart** of the recipe backend. It holds the domain
//! types, the repository input model, and the validation rules — all as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Savora Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       HTTP API (axum)                           │   │
//! │  │    POST /recipes ── GET /recipes ── PUT /recipes/{id} ── ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ savora-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   input   │  │ validation│                  │   │
//! │  │   │  Recipe   │  │ NewRecipe │  │   rules   │                  │   │
//! │  │   │   Step    │  │ ListField │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    savora-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, RecipeRepository       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Recipe, Ingredient, Step)
//! - [`input`] - Repository input model and wire-payload parsing
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Validate Before Storage**: bad input never reaches the database layer
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod input;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use savora_core::Recipe` instead of
// `use savora_core::types::Recipe`

pub use error::ValidationError;
pub use input::{IngredientInput, ListField, NewRecipe};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a recipe name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a recipe description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Maximum number of ingredients on a single recipe.
///
/// ## Why a cap?
/// Child rows are fully re-inserted on every update; an unbounded child set
/// would let one request hold a write transaction open arbitrarily long.
pub const MAX_INGREDIENTS: usize = 200;

/// Maximum number of steps on a single recipe.
pub const MAX_STEPS: usize = 100;

/// Maximum length of a single step instruction.
pub const MAX_INSTRUCTION_LEN: usize = 2000;
