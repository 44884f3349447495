//! # Repository Module
//!
//! Database repository implementations for Savora.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.recipes().get(id)                                          │
//! │       ▼                                                                 │
//! │  RecipeRepository                                                      │
//! │  ├── create(&self, input)                                              │
//! │  ├── get(&self, id)                                                    │
//! │  ├── list(&self)                                                       │
//! │  ├── update(&self, id, input)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL statements (transactional on the write paths)             │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Handlers receive domain results or typed errors and never see SQL.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod recipe;
