pub mod jsonrpc;
mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::tools::ToolRegistry;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

pub struct Server {
    tools: Arc<ToolRegistry>,
}

impl Server {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }

    pub fn build_router(self) -> Router {
        Router::new()
            .route("/health", get(routes::health))
            .route("/metrics", get(routes::metrics))
            .route("/mcp", post(routes::mcp))
            .layer(TraceLayer::new_for_http())
            .with_state(self.tools)
    }

    pub async fn start(self, addr: SocketAddr) -> crate::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }
}
