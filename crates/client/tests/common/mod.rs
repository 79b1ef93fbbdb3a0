#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use roehrenboerse_api::config::ServerConfig;
use roehrenboerse_api::router::build_app_router;
use roehrenboerse_api::state::AppState;
use roehrenboerse_client::api::ListingsApi;
use roehrenboerse_db::memory::MemoryListingStore;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        db_max_connections: 1,
        json_logs: false,
    }
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Start the real API over an in-memory store.
pub async fn spawn_api() -> (ListingsApi, Arc<MemoryListingStore>) {
    let store = Arc::new(MemoryListingStore::new());
    let app = build_app_router(AppState::new(store.clone()), &test_config());
    let url = serve(app).await;
    (ListingsApi::new(url), store)
}
