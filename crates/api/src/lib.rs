//! HTTP layer: axum handlers, routes, auth, and supporting services.

pub mod ai;
pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
