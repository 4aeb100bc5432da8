//! Dispatch Domain
//!
//! Accepts transactional send requests over HTTP and forwards them to an
//! email delivery API (SendGrid v3).
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  ← CORS, method check, body limit, audit
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │     Auth     │  ← bearer credential → caller identity (optional)
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Validator   │  ← untrusted JSON → SendRequest
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Service    │  ← readiness, payload build, bounded provider call
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Providers   │  ← EmailProvider trait + SendGrid client
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_dispatch::{AuthMode, DispatchConfig, DispatchService, SendGridProvider, handlers};
//!
//! let config = DispatchConfig::default();
//! let provider = SendGridProvider::new(config.api_url.clone(), config.provider_timeout).unwrap();
//! let service = DispatchService::new(config, AuthMode::Disabled, Arc::new(provider));
//!
//! let router = handlers::router(service);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod providers;
pub mod service;
pub mod validator;

// Re-export commonly used types
pub use auth::{AuthMode, Authenticator};
pub use config::{DispatchConfig, ProviderSettings, ReadyProvider};
pub use error::{
    AuthError, ConfigurationError, DispatchError, DispatchResult, ProviderError, ValidationError,
};
pub use models::{Attachment, CallerIdentity, SendRequest, SendResponse};
pub use payload::ProviderPayload;
pub use providers::{EmailProvider, ProviderCredentials, SendGridProvider};
pub use service::DispatchService;
