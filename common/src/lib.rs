//! Types shared by the ratings server and the command-line client.
//!
//! Everything in here crosses the wire as JSON, so field names follow the
//! HTTP contract rather than Rust naming where the two differ.

pub mod model;
pub mod requests;
pub mod responses;
