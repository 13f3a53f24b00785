//! HTTP server for the football tournament API.
//!
//! - [`api`]: router, resource handlers and middleware
//! - [`config`]: environment configuration
//! - [`logging`]: tracing subscriber setup

pub mod api;
pub mod config;
pub mod logging;
