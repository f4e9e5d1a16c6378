//! # Module Catalogue
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/modules/`**: every module instance with its module's code
//!     and name, the year and semester, and the names of the professors who
//!     teach it. No authentication.

mod list;

pub use list::list_modules;

use actix_web::web::{get, ServiceConfig};

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.route("/modules/", get().to(list::process));
}
