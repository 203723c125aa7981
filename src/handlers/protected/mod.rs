// handlers/protected/mod.rs - JWT-protected API handlers
//
// Security Level: JWT when security.enable_auth is set
// Route Prefix: /api/v1

pub mod ad_group;
pub mod campaign;
pub mod fetch;
