//! JSON API for the club dashboard
//!
//! Exposes the record store to the browser UI over HTTP with the same
//! `{ data, error }` envelope the hosted backend client returns.

mod api;
mod extract;
mod server;

pub use server::{start_web_server, WebServerConfig};
