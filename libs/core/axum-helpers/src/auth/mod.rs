//! Authentication module.
//!
//! This module provides:
//! - Bearer token extraction from the `Authorization` header
//! - Stateless HS256 JWT verification
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, bearer_token};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//! if let Some(token) = bearer_token(&headers) {
//!     let claims = auth.verify_token(token)?;
//! }
//! ```

pub mod bearer;
pub mod config;
pub mod jwt;

pub use bearer::bearer_token;
pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
