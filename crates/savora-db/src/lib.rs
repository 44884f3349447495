//! # savora-db: Database Layer for Savora
//!
//! This crate provides database access for the recipe backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Savora Data Flow                                 │
//! │                                                                         │
//! │  HTTP Handler (POST /recipes)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     savora-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (recipe.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ RecipeRepo    │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │ transactions  │    │              │  │   │
//! │  │   │ Management    │    │ + assembly    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (savora.db)                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The recipe aggregate repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use savora_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/savora.db")).await?;
//!
//! let id = db.recipes().create(&input).await?;
//! let recipe = db.recipes().get(id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::recipe::RecipeRepository;
