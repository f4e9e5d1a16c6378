//! # Account Service
//!
//! Registration and the token lifecycle.
//!
//! ## Registered Routes:
//!
//! *   **`POST /register/`**: creates a user from `{username, email, password}`.
//!     `201` on success, `400` when a field is missing or the username is taken.
//!
//! *   **`POST /login/`**: checks `{username, password}` and answers
//!     `{message, token}`. A user keeps the same token across logins until
//!     they log out or it expires.
//!
//! *   **`POST /api-token-auth/`**: same check as login, answers `{token}` only.
//!
//! *   **`POST /logout/`**: deletes the token sent in the `Authorization`
//!     header; `400` when there is no live token to delete.

mod login;
mod logout;
mod register;

pub use login::authenticate;
pub use register::register_user;

use actix_web::web::{post, ServiceConfig};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/register/", post().to(register::process))
        .route("/login/", post().to(login::process))
        .route("/api-token-auth/", post().to(login::obtain_token))
        .route("/logout/", post().to(logout::process));
}
