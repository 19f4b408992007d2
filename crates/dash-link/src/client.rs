use std::sync::Arc;

use dash_proto::wire::{PathUpdate, WsMessage};
use futures::{SinkExt, StreamExt};
use rustls::{ClientConfig, RootCertStore};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::render::render_incoming;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("unsupported url (expected ws:// or wss://): {0}")]
    UnsupportedScheme(String),
    #[error("not connected")]
    NotConnected,
    #[error("websocket: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("encode: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Idle,
    Connected,
    Closed,
    Error,
}

impl LinkStatus {
    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::Idle => "idle",
            LinkStatus::Connected => "connected",
            LinkStatus::Closed => "closed",
            LinkStatus::Error => "error",
        }
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One-shot path update link. No reconnection: once closed or failed, call
/// [`PathLink::connect`] again explicitly.
pub struct PathLink {
    url: String,
    /// Present only for `wss://` urls.
    tls: Option<Arc<ClientConfig>>,
    socket: Option<Socket>,
    status: LinkStatus,
}

impl PathLink {
    pub fn new(url: impl Into<String>) -> Result<Self, LinkError> {
        let url = url.into();
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(LinkError::UnsupportedScheme(url));
        }

        let tls = url.starts_with("wss://").then(|| {
            let mut roots = RootCertStore::empty();
            roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
            Arc::new(ClientConfig::builder().with_root_certificates(roots).with_no_client_auth())
        });

        Ok(Self { url, tls, socket: None, status: LinkStatus::Idle })
    }

    pub fn uses_tls(&self) -> bool {
        self.tls.is_some()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> LinkStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == LinkStatus::Connected && self.socket.is_some()
    }

    pub async fn connect(&mut self) -> Result<(), LinkError> {
        let connector = match &self.tls {
            Some(tls) => Connector::Rustls(tls.clone()),
            None => Connector::Plain,
        };
        match connect_async_tls_with_config(self.url.as_str(), None, false, Some(connector)).await {
            Ok((socket, resp)) => {
                info!("link: connected to {} (HTTP {})", self.url, resp.status());
                self.socket = Some(socket);
                self.status = LinkStatus::Connected;
                Ok(())
            }
            Err(e) => {
                warn!("link: connect to {} failed: {}", self.url, e);
                self.socket = None;
                self.status = LinkStatus::Error;
                Err(e.into())
            }
        }
    }

    pub async fn send_path_update(&mut self, update: &PathUpdate) -> Result<(), LinkError> {
        if !self.is_connected() {
            return Err(LinkError::NotConnected);
        }
        let text = WsMessage::PathUpdate(update.clone()).to_json()?;
        let socket = self.socket.as_mut().ok_or(LinkError::NotConnected)?;

        if let Err(e) = socket.send(Message::Text(text)).await {
            warn!("link: send failed: {}", e);
            self.socket = None;
            self.status = LinkStatus::Error;
            return Err(e.into());
        }
        info!("link: sent path.update ({} points)", update.points.len());
        Ok(())
    }

    /// Next incoming message as display text; `None` once the peer closed.
    pub async fn recv_display(&mut self) -> Option<Result<String, LinkError>> {
        loop {
            let next = self.socket.as_mut()?.next().await;
            match next {
                Some(Ok(Message::Text(t))) => {
                    debug!("link: <- {}", t);
                    return Some(Ok(render_incoming(&t)));
                }
                Some(Ok(Message::Binary(b))) => {
                    return Some(Ok(render_incoming(&String::from_utf8_lossy(&b))));
                }
                Some(Ok(Message::Close(_))) | None => {
                    info!("link: closed by peer");
                    self.socket = None;
                    self.status = LinkStatus::Closed;
                    return None;
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    warn!("link: receive failed: {}", e);
                    self.socket = None;
                    self.status = LinkStatus::Error;
                    return Some(Err(e.into()));
                }
            }
        }
    }

    pub async fn close(&mut self) -> Result<(), LinkError> {
        if let Some(mut socket) = self.socket.take() {
            socket.close(None).await?;
            info!("link: closed");
        }
        self.status = LinkStatus::Closed;
        Ok(())
    }
}
