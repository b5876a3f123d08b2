//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use browserhands_config::Config;

use crate::error::ServerError;
use crate::http::routes::create_router;
use crate::state::AppState;

/// Listen address.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl From<&Config> for ApiConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.server.host.clone(), config.server.port)
    }
}

/// The API server.
pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Bind the listener.
    ///
    /// The host must be an IP literal.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let addr: SocketAddr = self
            .addr()
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.addr()))?;
        Ok(TcpListener::bind(addr).await?)
    }

    /// Serve until `shutdown` resolves, then close every tracked session.
    pub async fn run_until_shutdown<F>(&self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state.clone());
        info!("API server listening on {}", listener.local_addr()?);

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        self.state.manager.shutdown().await;
        info!(
            uptime_secs = self.state.uptime().as_secs(),
            "API server stopped"
        );

        served.map_err(ServerError::from)
    }
}
