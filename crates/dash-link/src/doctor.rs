use anyhow::{Context, Result};
use std::net::SocketAddr;

pub fn check_url(url: &str) -> Result<()> {
    anyhow::ensure!(
        url.starts_with("ws://") || url.starts_with("wss://"),
        "link.url must start with ws:// or wss://: {}",
        url
    );
    let host = url.split("://").nth(1).unwrap_or_default();
    anyhow::ensure!(!host.is_empty() && !host.starts_with('/'), "link.url has no host: {}", url);
    Ok(())
}

pub fn check_bind(bind: &str) -> Result<SocketAddr> {
    bind.parse::<SocketAddr>()
        .with_context(|| format!("link.bind is not host:port: {}", bind))
}
