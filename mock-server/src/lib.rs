use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{any, get, post},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub mod config;

pub use config::{ConfigError, ServerConfig};

pub type Store = Arc<RwLock<HashMap<String, String>>>;

pub fn app() -> Router {
    let store: Store = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(
            "/files/{name}",
            get(get_file).put(put_file).delete(delete_file),
        )
        .route("/echo", post(echo))
        .route("/method", any(echo_method))
        .route("/status/{code}", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_file(
    State(store): State<Store>,
    Path(name): Path<String>,
) -> Result<String, StatusCode> {
    let files = store.read().await;
    files.get(&name).cloned().ok_or(StatusCode::NOT_FOUND)
}

async fn put_file(State(store): State<Store>, Path(name): Path<String>, body: String) -> String {
    tracing::debug!(%name, bytes = body.len(), "storing file");
    store.write().await.insert(name, body.clone());
    body
}

async fn delete_file(
    State(store): State<Store>,
    Path(name): Path<String>,
) -> Result<String, StatusCode> {
    let mut files = store.write().await;
    files
        .remove(&name)
        .map(|_| format!("deleted {name}"))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn echo(body: String) -> String {
    body
}

/// Answer any verb, standard or not, with its name.
async fn echo_method(method: Method) -> String {
    method.to_string()
}

/// Answer with the requested status code and its reason phrase as body.
async fn status(Path(code): Path<u16>) -> (StatusCode, String) {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, status.canonical_reason().unwrap_or_default().to_string()),
        Err(_) => (StatusCode::BAD_REQUEST, format!("invalid status code {code}")),
    }
}
