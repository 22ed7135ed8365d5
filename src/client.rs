use crate::error::Result;
use crate::fetch::fetch_hub_state;
use crate::reconcile::{apply_routing, ApplyOutcome};
use crate::state::HubState;
use crate::transport::HubConnection;

/// Client for a single Videohub.
///
/// Holds only the address; each operation opens its own TCP connection,
/// runs one request/drain sequence, and closes it. The hub protocol keeps
/// no session state, so there is nothing to share between operations.
pub struct HubClient {
    host: String,
    port: u16,
}

impl HubClient {
    /// Create a client for the hub at the given address.
    ///
    /// The default Videohub port is [`crate::DEFAULT_PORT`] (9990).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use videohub_preset::HubClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = HubClient::new("192.168.1.248", 9990);
    ///     let (state, _preamble) = client.read_state().await?;
    ///     println!("{} routes", state.routing.len());
    ///     Ok(())
    /// }
    /// ```
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Hub host name or address
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Hub TCP port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Fetch the hub's current configuration and the raw preamble text
    pub async fn read_state(&self) -> Result<(HubState, String)> {
        let mut conn = HubConnection::connect(&self.host, self.port).await?;
        let (mut state, preamble) = fetch_hub_state(&mut conn).await?;
        state.source = Some(conn.peer().to_string());
        Ok((state, preamble))
    }

    /// Push a preset's routing table onto the hub.
    ///
    /// Writes are independent per crosspoint; see
    /// [`apply_routing`](crate::apply_routing) for the outcome semantics.
    pub async fn apply_preset(&self, preset: &HubState) -> Result<Vec<ApplyOutcome>> {
        let mut conn = HubConnection::connect(&self.host, self.port).await?;
        apply_routing(&mut conn, preset).await
    }
}
