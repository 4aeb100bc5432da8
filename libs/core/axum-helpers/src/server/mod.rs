//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with tracing, panic catching and a JSON 404 fallback
//! - The `/health` liveness endpoint
//! - Graceful shutdown with a bounded drain period
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{server::ServerConfig, app_info};
//!
//! let app = create_router(api_routes).merge(health_router(app_info!()));
//! create_app(app, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
