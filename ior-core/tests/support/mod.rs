use ior_common::{Material, MaterialDraft};
use ior_server::MaterialCollection;

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Start an in-memory collection on an ephemeral port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_server(materials: Vec<Material>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(ior_server::serve(listener, MaterialCollection::new(materials)));
    format!("http://{addr}")
}

/// Base URL nothing is listening on.
#[allow(dead_code)]
pub async fn dead_server_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[allow(dead_code)]
pub fn sample_materials() -> Vec<Material> {
    vec![
        MaterialDraft::new("Water", "Liquid", 1.333).with_id("1"),
        MaterialDraft::new("Crown glass", "Glass", 1.52).with_id("2"),
        MaterialDraft::new("Sapphire", "Gemstone", 1.77).with_id("3"),
    ]
}
