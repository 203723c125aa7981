// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Route Prefix: none (/, /health)

pub mod health;

pub use health::{health, root};
