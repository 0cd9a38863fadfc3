//! Clients for talking to services outside the process.

pub mod client;

pub use client::build_http_client;
