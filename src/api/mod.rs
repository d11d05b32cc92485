//! Demo HTTP service: subscription management routes, the webhook receiver
//! and health checks.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
