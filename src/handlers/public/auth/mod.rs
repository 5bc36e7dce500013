// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and session lifecycle. None of these require a token;
// login hands one out.

pub mod login;    // POST /api/v1/auth/login - verify credentials, issue tokens
pub mod logout;   // POST /api/v1/auth/logout - drop the stored refresh token
pub mod refresh;  // POST /api/v1/auth/refresh - new access token from a refresh token
pub mod register; // POST /api/v1/auth/register - create an account

pub use login::login_post;
pub use logout::logout_post;
pub use refresh::refresh_post;
pub use register::register_post;
