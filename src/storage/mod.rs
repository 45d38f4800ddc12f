//! Database access layer
//!
//! `GameStore` owns the Sea-ORM connection and exposes the domain
//! operations used by the HTTP layer. Schema migrations run automatically
//! when the store is created.

mod models;
mod store;

pub use models::{GamePatch, GameQuery, NewGame, NewReview, ReviewPatch};
pub use store::GameStore;
