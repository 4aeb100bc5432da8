use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_dispatch::DispatchConfig;

pub use core_config::Environment;

/// Application-specific configuration.
/// Composes shared config components from the `config` library.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub dispatch: DispatchConfig,
    /// Present only when `AUTH_REQUIRED` is on.
    pub jwt: Option<JwtConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let dispatch = DispatchConfig::from_env()?;

        // Auth on without a usable secret is a startup failure, not a silent downgrade.
        let jwt = if dispatch.auth_required {
            Some(JwtConfig::from_env()?)
        } else {
            None
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            dispatch,
            jwt,
        })
    }
}
