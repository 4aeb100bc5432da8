//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: Bearer token extraction and JWT verification
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (fixed CORS header set, panic catching)
//! - **[`errors`]**: `{ok: false, error}` JSON error bodies and fallback handlers
//! - **[`audit`]**: Audit logging for security-relevant actions
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let router = create_router(Router::new());
//!     create_app(router, &ServerConfig::default()).await
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod errors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{JwtAuth, JwtClaims, JwtConfig, bearer_token};

// Re-export server types
pub use server::{HealthResponse, create_app, create_router, health_router, shutdown_signal};

// Re-export HTTP middleware
pub use http::{catch_panic_layer, cors_headers, preflight};

// Re-export error types
pub use errors::{ErrorResponse, json_error};

// Re-export audit types
pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
