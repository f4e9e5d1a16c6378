//! # Rating Submission
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/ratings/`**: records the caller's rating of a professor
//!     for one module instance. Requires `Authorization: Token <key>`.
//!
//!     The module instance is given either by id or by offering:
//!     ```json
//!     {"professor_id": "JE1", "module_instance": 3, "rating": 5}
//!     {"professor_id": "JE1",
//!      "module_instance": {"module_code": "CD1", "year": 2017, "semester": 1},
//!      "rating": 5}
//!     ```
//!     A second submission for the same professor and instance replaces the
//!     value and keeps the rating id. Answers `201` with
//!     `{message, rating_id, rating}`.

mod submit;

pub use submit::submit_rating;

use actix_web::web::{post, ServiceConfig};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/ratings/", post().to(submit::process));
}
