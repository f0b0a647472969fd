use std::path::PathBuf;

use clap::Parser;
use ior_server::MaterialCollection;
use tracing::{error, info};

/// In-memory materials collection serving the catalog REST API.
#[derive(Parser)]
#[command(name = "ior-server")]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value = "3001", env = "IOR_PORT")]
    port: u16,

    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1", env = "IOR_BIND")]
    bind: String,

    /// JSON array of materials to start with, e.g. `fixtures/materials.json`.
    /// Changes are not written back.
    #[arg(long, env = "IOR_SEED_PATH")]
    seed: Option<PathBuf>,
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    let collection = match &args.seed {
        Some(path) => MaterialCollection::load_seed(path).unwrap_or_else(|e| {
            error!("failed to load seed {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => MaterialCollection::default(),
    };
    info!("starting with {} materials", collection.len());

    let addr = format!("{}:{}", args.bind, args.port);

    info!("binding to {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!("failed to bind to {addr}: {e}");
            std::process::exit(1);
        });

    info!("ior-server listening on http://{addr}");
    if let Err(e) = ior_server::serve(listener, collection).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
