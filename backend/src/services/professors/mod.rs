//! # Professor Ratings
//!
//! Read-only views over the submitted ratings. No authentication.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/professor-ratings/`**: every professor with at least one
//!     rating, ordered by id, with their average across all modules to one
//!     decimal place.
//!
//! *   **`GET /api/professors/{professor_id}/modules/{module_code}/rating/`**:
//!     the professor's average within one module across all of its offerings,
//!     as a whole number, or `"No ratings yet"`. Answers `404` when the
//!     professor or module is unknown or the professor never taught it.

mod pair_average;
mod ratings;

pub use pair_average::module_average;
pub use ratings::professor_ratings;

use actix_web::web::{get, ServiceConfig};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/professor-ratings/", get().to(ratings::process))
        .route(
            "/professors/{professor_id}/modules/{module_code}/rating/",
            get().to(pair_average::process),
        );
}
