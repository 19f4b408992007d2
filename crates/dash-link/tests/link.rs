use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use dash_link::{server, LinkError, LinkStatus, PathLink};
use dash_proto::wire::{PathUpdate, WsMessage};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

async fn spawn_ack_server() -> (SocketAddr, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, async move {
        let _ = rx.await;
    }));
    (addr, tx)
}

#[tokio::test]
async fn test_path_update_round_trip() {
    let (addr, _stop) = spawn_ack_server().await;

    let mut link = PathLink::new(format!("ws://{}/ws", addr)).unwrap();
    link.connect().await.unwrap();
    assert_eq!(link.status(), LinkStatus::Connected);

    link.send_path_update(&PathUpdate::demo()).await.unwrap();
    let shown = tokio::time::timeout(Duration::from_secs(5), link.recv_display())
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    let msg: WsMessage = serde_json::from_str(&shown).unwrap();
    assert_eq!(msg, WsMessage::Ack { event: "path.update".into(), count: 3 });

    link.close().await.unwrap();
    assert_eq!(link.status(), LinkStatus::Closed);
    assert!(matches!(
        link.send_path_update(&PathUpdate::demo()).await,
        Err(LinkError::NotConnected)
    ));
}

#[tokio::test]
async fn test_non_json_reply_is_shown_raw() {
    async fn greet(ws: WebSocketUpgrade) -> impl IntoResponse {
        ws.on_upgrade(|mut socket| async move {
            let _ = socket.send(Message::Text("hello drone".into())).await;
            let _ = socket.send(Message::Close(None)).await;
        })
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, Router::new().route("/ws", get(greet))).await;
    });

    let mut link = PathLink::new(format!("ws://{}/ws", addr)).unwrap();
    link.connect().await.unwrap();

    let shown = link.recv_display().await.unwrap().unwrap();
    assert_eq!(shown, "hello drone");

    assert!(link.recv_display().await.is_none());
    assert_eq!(link.status(), LinkStatus::Closed);
}

#[tokio::test]
async fn test_connect_refused_sets_error() {
    // grab a free port, then release it so nothing listens there
    let addr = {
        let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };

    let mut link = PathLink::new(format!("ws://{}/ws", addr)).unwrap();
    assert!(link.connect().await.is_err());
    assert_eq!(link.status(), LinkStatus::Error);
    assert!(!link.is_connected());
}
