//! Loopback listener for the external gesture detector.
//!
//! One command per connection: the peer connects, writes a token, disconnects.
//! Everything read up to EOF becomes a single trimmed token. Nothing is ever
//! written back.

use anyhow::{Context, Result};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Pause after a failed accept so a persistent error can't spin the task
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq)]
pub enum GestureMessage {
    Listening(SocketAddr),
    Command(String),
}

pub struct GestureListener;

impl GestureListener {
    /// Bind the loopback interface. Port 0 picks an ephemeral port (tests).
    pub async fn bind(port: u16) -> Result<TcpListener> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind gesture listener on {}", addr))
    }

    /// Accept connections one at a time until the receiver goes away.
    pub async fn run(
        listener: TcpListener,
        gesture_tx: mpsc::UnboundedSender<GestureMessage>,
        read_timeout: Duration,
    ) {
        if let Ok(addr) = listener.local_addr() {
            info!("Gesture listener ready on {}", addr);
            let _ = gesture_tx.send(GestureMessage::Listening(addr));
        }

        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("Gesture accept error: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };
            debug!("Gesture connection from {}", peer);

            let token = Self::read_token(stream, read_timeout).await;
            info!("Received gesture command: {:?}", token);

            if gesture_tx.send(GestureMessage::Command(token)).is_err() {
                info!("Gesture receiver closed, stopping listener");
                break;
            }
        }
    }

    /// Read until EOF (or timeout), decode lossily and trim. The stream is
    /// dropped on return, which closes the connection.
    pub async fn read_token(mut stream: TcpStream, read_timeout: Duration) -> String {
        let mut payload = Vec::new();

        match tokio::time::timeout(read_timeout, stream.read_to_end(&mut payload)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!("Gesture read error after {} bytes: {}", payload.len(), e),
            Err(_) => warn!(
                "Gesture peer did not close within {:?}, using {} bytes",
                read_timeout,
                payload.len()
            ),
        }

        String::from_utf8_lossy(&payload).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    async fn start() -> (SocketAddr, mpsc::UnboundedReceiver<GestureMessage>) {
        let listener = GestureListener::bind(0).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(GestureListener::run(listener, tx, Duration::from_secs(2)));

        let addr = match rx.recv().await {
            Some(GestureMessage::Listening(addr)) => addr,
            other => panic!("expected Listening, got {:?}", other),
        };
        (addr, rx)
    }

    async fn send(addr: SocketAddr, chunks: &[&[u8]]) {
        let mut client = TcpStream::connect(addr).await.unwrap();
        for chunk in chunks {
            client.write_all(chunk).await.unwrap();
        }
        client.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_binds_loopback_only() {
        let (addr, _rx) = start().await;
        assert!(addr.ip().is_loopback());
    }

    #[tokio::test]
    async fn test_token_is_trimmed() {
        let (addr, mut rx) = start().await;
        send(addr, &[b"  next\n"]).await;
        assert_eq!(rx.recv().await, Some(GestureMessage::Command("next".into())));
    }

    #[tokio::test]
    async fn test_multiple_writes_form_one_token() {
        let (addr, mut rx) = start().await;
        send(addr, &[b"zoom", b"_in"]).await;
        assert_eq!(
            rx.recv().await,
            Some(GestureMessage::Command("zoom_in".into()))
        );
    }

    #[tokio::test]
    async fn test_empty_connection_emits_empty_token() {
        let (addr, mut rx) = start().await;
        send(addr, &[]).await;
        assert_eq!(rx.recv().await, Some(GestureMessage::Command(String::new())));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_lossy() {
        let (addr, mut rx) = start().await;
        send(addr, &[b"prev\xff"]).await;
        assert_eq!(
            rx.recv().await,
            Some(GestureMessage::Command("prev\u{fffd}".into()))
        );

        // The listener keeps serving after a garbled payload
        send(addr, &[b"go_menu"]).await;
        assert_eq!(
            rx.recv().await,
            Some(GestureMessage::Command("go_menu".into()))
        );
    }

    #[tokio::test]
    async fn test_connections_are_serial() {
        let (addr, mut rx) = start().await;
        for token in ["volume_up", "volume_down", "rewind"] {
            send(addr, &[token.as_bytes()]).await;
        }
        for token in ["volume_up", "volume_down", "rewind"] {
            assert_eq!(rx.recv().await, Some(GestureMessage::Command(token.into())));
        }
    }

    #[tokio::test]
    async fn test_bind_conflict_is_an_error() {
        let first = GestureListener::bind(0).await.unwrap();
        let port = first.local_addr().unwrap().port();
        assert!(GestureListener::bind(port).await.is_err());
    }
}
