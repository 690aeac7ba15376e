//! HTTP API: configuration, authentication gate, routing, and handlers for
//! the owner (dueño) registry.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
