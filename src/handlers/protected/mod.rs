// handlers/protected/mod.rs - Protected handlers (Bearer access token required)
//
// Routes here are wrapped in `jwt_auth_middleware`; a request that reaches a
// handler carries an `AuthUser` extension.

pub mod employees;
