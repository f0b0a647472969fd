//! Reference implementation of the `/materials` REST resource, kept in memory.

mod collection;
mod routes;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use collection::MaterialCollection;
pub use routes::{create_router, SharedCollection};

/// Serve `collection` on an already-bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, collection: MaterialCollection) -> std::io::Result<()> {
    let app = create_router(Arc::new(RwLock::new(collection)));
    axum::serve(listener, app).await
}
