//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - A fixed CORS header set and preflight responses
//! - Converting handler panics into JSON 500 responses
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{catch_panic_layer, cors_headers};
//!
//! let app = Router::new()
//!     .layer(catch_panic_layer())
//!     .layer(axum::middleware::from_fn(cors_headers));
//! ```

pub mod cors;
pub mod panic;

pub use cors::{cors_headers, preflight};
pub use panic::catch_panic_layer;
