//! HTTP API: server, routing, and request/response mapping.
//!
//! Layout:
//! - `app.rs`: router + state wiring (public entrypoint used by `main.rs`)
//! - `middleware.rs`: tenant resolution, bearer auth, role gating layers
//! - `context.rs`: per-request extensions (resolved tenant, current user)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the single auth-error → status-code translation

pub mod app;
pub mod context;
pub mod dto;
pub mod errors;
pub mod middleware;
pub mod routes;
