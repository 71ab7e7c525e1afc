//! Category Aggregate
//!
//! Plain CRUD records, no association logic.

pub mod api;
pub mod entity;
pub mod repository;

// Re-export main types
pub use api::{categories_router, CategoriesState};
pub use entity::{Category, CategoryPatch};
pub use repository::{CategoryRepository, CategoryStore};
