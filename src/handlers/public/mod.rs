// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Liveness endpoints and token acquisition.

pub mod health;
pub mod users;

pub use health::{health, root};
