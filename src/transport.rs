use crate::error::{HubError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Wait before the first bytes of a response arrive
pub const INITIAL_TIMEOUT: Duration = Duration::from_millis(250);
/// Shortened wait once a response has started; a quiet period this long
/// means the response is complete
pub const FOLLOWUP_TIMEOUT: Duration = Duration::from_millis(80);

/// Byte-level access to a hub.
///
/// The protocol has no message framing, so receiving is a drain: read until
/// the line goes quiet. Implemented by [`HubConnection`] for real sockets;
/// tests substitute a scripted transport so fetch and apply logic never
/// needs a device.
#[async_trait]
pub trait Transport: Send {
    /// Send raw command bytes
    async fn send(&mut self, bytes: &[u8]) -> Result<()>;

    /// Drain whatever the hub sends back.
    ///
    /// Waits up to `initial` for the first bytes, then keeps reading with
    /// the shorter `followup` wait until a quiet period ends the response.
    /// An empty result means no data arrived in time; that is not an error,
    /// callers decide what absence means.
    async fn receive_until_quiet(&mut self, initial: Duration, followup: Duration)
        -> Result<Vec<u8>>;
}

/// TCP connection to a Videohub.
///
/// One connection serves one fetch or apply operation; the socket closes on
/// drop, on every exit path.
pub struct HubConnection {
    stream: TcpStream,
    peer: String,
}

impl HubConnection {
    /// Open a TCP connection to the hub
    pub async fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        tracing::info!("Connecting to {}", addr);

        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| HubError::Connect {
                addr: addr.clone(),
                source,
            })?;

        Ok(Self { stream, peer: addr })
    }

    /// Address of the connected hub
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

#[async_trait]
impl Transport for HubConnection {
    async fn send(&mut self, bytes: &[u8]) -> Result<()> {
        tracing::debug!("Sending {} bytes to {}", bytes.len(), self.peer);
        self.stream.write_all(bytes).await?;
        Ok(())
    }

    async fn receive_until_quiet(
        &mut self,
        initial: Duration,
        followup: Duration,
    ) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut buf = [0u8; 8192];
        let mut wait = initial;

        loop {
            match timeout(wait, self.stream.read(&mut buf)).await {
                // peer closed; whatever accumulated is the response
                Ok(Ok(0)) => break,
                Ok(Ok(n)) => {
                    out.extend_from_slice(&buf[..n]);
                    wait = followup;
                }
                Ok(Err(e)) => {
                    if out.is_empty() {
                        return Err(e.into());
                    }
                    break;
                }
                // quiet period elapsed, response complete
                Err(_) => break,
            }
        }

        tracing::debug!("Received {} bytes from {}", out.len(), self.peer);
        Ok(out)
    }
}

/// Scripted in-memory transport for fetch/apply tests.
#[cfg(test)]
pub(crate) struct ScriptedTransport {
    /// Every byte sequence passed to `send`, in order
    pub sent: Vec<Vec<u8>>,
    /// Responses handed out by `receive_until_quiet`, front first;
    /// exhausted responses yield empty
    pub responses: std::collections::VecDeque<Vec<u8>>,
    /// 0-based send indices that should fail with a broken-pipe error
    pub fail_sends: Vec<usize>,
}

#[cfg(test)]
impl ScriptedTransport {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            sent: Vec::new(),
            responses: responses.into_iter().map(|r| r.as_bytes().to_vec()).collect(),
            fail_sends: Vec::new(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, bytes: &[u8]) -> Result<()> {
        let index = self.sent.len();
        self.sent.push(bytes.to_vec());
        if self.fail_sends.contains(&index) {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "scripted failure").into());
        }
        Ok(())
    }

    async fn receive_until_quiet(&mut self, _: Duration, _: Duration) -> Result<Vec<u8>> {
        Ok(self.responses.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn connect_pair() -> (HubConnection, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = HubConnection::connect("127.0.0.1", addr.port());
        let (conn, accepted) = tokio::join!(client, listener.accept());
        let (server, _) = accepted.unwrap();
        (conn.unwrap(), server)
    }

    #[tokio::test]
    async fn receive_returns_bytes_before_quiet() {
        let (mut conn, mut server) = connect_pair().await;
        server.write_all(b"INPUT LABELS:\n0 A\n").await.unwrap();

        let bytes = conn
            .receive_until_quiet(INITIAL_TIMEOUT, FOLLOWUP_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(bytes, b"INPUT LABELS:\n0 A\n");
    }

    #[tokio::test]
    async fn receive_collects_across_split_writes() {
        let (mut conn, mut server) = connect_pair().await;
        tokio::spawn(async move {
            server.write_all(b"VIDEO OUTPUT ").await.unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            server.write_all(b"ROUTING:\n0 1\n").await.unwrap();
            // hold the socket open so close does not end the read early
            tokio::time::sleep(Duration::from_millis(300)).await;
        });

        let bytes = conn
            .receive_until_quiet(INITIAL_TIMEOUT, FOLLOWUP_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(bytes, b"VIDEO OUTPUT ROUTING:\n0 1\n");
    }

    #[tokio::test]
    async fn receive_on_silent_peer_is_empty_not_error() {
        let (mut conn, _server) = connect_pair().await;
        let bytes = conn
            .receive_until_quiet(Duration::from_millis(50), FOLLOWUP_TIMEOUT)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn send_writes_through_to_peer() {
        let (mut conn, mut server) = connect_pair().await;
        conn.send(&[0x01]).await.unwrap();

        let mut buf = [0u8; 1];
        server.read_exact(&mut buf).await.unwrap();
        assert_eq!(buf, [0x01]);
    }
}
