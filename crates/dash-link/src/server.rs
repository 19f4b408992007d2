use std::future::Future;

use axum::extract::rejection::JsonRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dash_proto::planning::PlanningRequest;
use dash_proto::wire::WsMessage;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::planner::{straight_line, DEFAULT_STEPS};

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(ws_handler))
        .route("/api/planning", post(planning))
}

/// Serves [`router`] on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("server: listening on {}", listener.local_addr()?);
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server: stopped");
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn bad_request(msg: String) -> Response {
    warn!("server: planning rejected: {}", msg);
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
}

async fn planning(body: Result<Json<PlanningRequest>, JsonRejection>) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(e) => return bad_request(e.body_text()),
    };
    match straight_line(&req, DEFAULT_STEPS) {
        Ok(resp) => {
            info!("server: planned {} points", resp.path.len());
            Json(resp).into_response()
        }
        Err(e) => bad_request(e.to_string()),
    }
}

async fn ws_handler(ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(handle_socket)
}

async fn handle_socket(mut socket: WebSocket) {
    info!("server: client connected");
    while let Some(msg) = socket.recv().await {
        let text = match msg {
            Ok(Message::Text(t)) => t,
            Ok(Message::Binary(b)) => String::from_utf8_lossy(&b).into_owned(),
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!("server: receive failed: {}", e);
                break;
            }
        };

        let out = match reply_for(&text).to_json() {
            Ok(s) => s,
            Err(e) => {
                warn!("server: encode reply failed: {}", e);
                continue;
            }
        };
        if socket.send(Message::Text(out)).await.is_err() {
            break;
        }
    }
    info!("server: client disconnected");
}

/// `path.update` objects are acknowledged with their point count; any other
/// payload is echoed back, non-JSON text as a string.
pub fn reply_for(text: &str) -> WsMessage {
    match serde_json::from_str::<Value>(text) {
        Ok(v) if v.get("type").and_then(Value::as_str) == Some("path.update") => {
            let count = v.get("points").and_then(Value::as_array).map_or(0, |p| p.len());
            WsMessage::Ack { event: "path.update".into(), count }
        }
        Ok(v) => WsMessage::Echo { data: v },
        Err(_) => WsMessage::Echo { data: Value::String(text.to_string()) },
    }
}
