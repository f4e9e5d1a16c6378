//! Server side of the professor ratings service: a SQLite store, the rating
//! aggregator, token authentication and the actix-web endpoints on top.

pub mod aggregate;
pub mod auth;
pub mod config;
pub mod error;
pub mod services;
pub mod store;
