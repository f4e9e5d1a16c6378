//! Interactive command-line client for the professor ratings server.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
