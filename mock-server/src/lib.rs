use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub use axum::Router;

/// A value received through `POST /saveString`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredString {
    pub id: Uuid,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveString {
    #[serde(rename = "myString")]
    pub my_string: String,
}

pub type Inbox = Arc<RwLock<Vec<StoredString>>>;

pub fn app() -> Router {
    app_with_inbox(Inbox::default())
}

/// Router backed by a caller-owned inbox, so tests can inspect what arrived.
pub fn app_with_inbox(inbox: Inbox) -> Router {
    Router::new()
        .route("/saveString", post(save_string))
        .route("/strings", get(list_strings))
        .with_state(inbox)
}

/// Router that answers every `POST /saveString` with `status`.
pub fn failing_app(status: u16) -> Router {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    Router::new().route("/saveString", post(move || async move { status }))
}

/// Router that accepts every `POST /saveString` and never answers it.
pub fn stalled_app() -> Router {
    Router::new().route("/saveString", post(std::future::pending::<StatusCode>))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_app(listener, app()).await
}

pub async fn run_app(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn save_string(State(inbox): State<Inbox>, Json(input): Json<SaveString>) -> StatusCode {
    if input.my_string.is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    let stored = StoredString {
        id: Uuid::new_v4(),
        value: input.my_string,
    };
    info!(id = %stored.id, len = stored.value.len(), "stored string");
    inbox.write().await.push(stored);
    StatusCode::OK
}

async fn list_strings(State(inbox): State<Inbox>) -> Json<Vec<StoredString>> {
    Json(inbox.read().await.clone())
}
