//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use crate::core::{ProductModel, ProductStorage};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the products HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_storage(InMemoryProductStorage::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    model: Option<ProductModel>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            model: None,
            custom_routes: Vec::new(),
        }
    }

    /// Back the products routes with a storage (required, unless
    /// `with_model` is used)
    pub fn with_storage(mut self, storage: impl ProductStorage + 'static) -> Self {
        self.model = Some(ProductModel::new(storage));
        self
    }

    /// Same as `with_storage` for an already shared storage
    pub fn with_shared_storage(mut self, storage: Arc<dyn ProductStorage>) -> Self {
        self.model = Some(ProductModel::from_arc(storage));
        self
    }

    /// Use an existing model
    pub fn with_model(mut self, model: ProductModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let extra = Router::new().route("/version", get(|| async { "0.1.0" }));
    ///
    /// ServerBuilder::new()
    ///     .with_storage(storage)
    ///     .with_custom_routes(extra)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router, wrapped in the HTTP trace layer
    pub fn build(self) -> Result<Router> {
        let model = self
            .model
            .ok_or_else(|| anyhow::anyhow!("ProductStorage is required. Call .with_storage()"))?;

        let app = RestExposure::build_router(model, self.custom_routes)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_storage(storage)
    ///     .serve("127.0.0.1:3000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve on Ctrl+C or SIGTERM
///
/// A signal handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
