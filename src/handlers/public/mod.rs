// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and liveness. Every input here is untrusted and goes
// through the validation layer before reaching a service.

pub mod auth;
pub mod health;

pub use health::health_get;
