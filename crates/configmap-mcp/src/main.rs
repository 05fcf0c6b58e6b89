use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use configmap_mcp::{
    config::Config,
    kubernetes::KubeClusterManager,
    operator::ConfigMapOperatorFactory,
    server::Server,
    tools::ToolRegistry,
};

/// Serve Kubernetes ConfigMap tools to AI agents.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on (overrides SERVER_ADDR)
    #[arg(long)]
    addr: Option<String>,

    /// Default namespace (overrides KUBE_NAMESPACE and kubeconfig)
    #[arg(long)]
    namespace: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    if let Some(namespace) = args.namespace {
        config.kube.namespace = Some(namespace);
    }

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!("Loaded configuration: {:?}", config);

    let addr = config.socket_addr()?;

    // Initialize cluster access
    let cluster = Arc::new(KubeClusterManager::new(config.kube.namespace.clone()).await?);
    let tools = ToolRegistry::new(cluster, Arc::new(ConfigMapOperatorFactory));

    // Start server
    info!("Starting server on {}", addr);
    Server::new(tools).start(addr).await?;

    Ok(())
}
