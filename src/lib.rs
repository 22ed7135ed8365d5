//! Rust library for managing routing presets on Blackmagic Videohub routers
//!
//! This library speaks the Videohub line-oriented ASCII protocol over a TCP
//! connection (default port 9990). It supports:
//!
//! - Reading the current hub configuration (input labels, output labels,
//!   video output routing) from any hub size (12x12, 40x40, ...)
//! - Saving and loading routing presets as JSON files
//! - Comparing a loaded preset against the live hub routing
//! - Applying a preset's routing back to the hub, one crosspoint at a time,
//!   with per-crosspoint outcome reporting
//!
//! # Quick Start
//!
//! ```no_run
//! use videohub_preset::{HubClient, PresetStore, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HubClient::new("192.168.1.248", 9990);
//!     let store = PresetStore::new("presets");
//!     let mut session = Session::new(client, store);
//!
//!     // Read the live hub configuration
//!     let state = session.read_hub().await?;
//!     println!("hub has {} outputs routed", state.routing.len());
//!
//!     // Capture it as a preset
//!     session.save_preset("studio-a", "Monday studio layout")?;
//!
//!     // Later: load it back and see what drifted
//!     session.load_preset("studio-a")?;
//!     for row in session.compare()? {
//!         if row.differs {
//!             println!("output {} differs", row.output);
//!         }
//!     }
//!
//!     // Push the preset routing back onto the hub
//!     for outcome in session.apply_preset().await? {
//!         if !outcome.sent {
//!             eprintln!("output {} failed: {:?}", outcome.output, outcome.error);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Direct Connection
//!
//! The lower-level [`HubClient`] can be used without a session when no
//! preset bookkeeping is needed:
//!
//! ```no_run
//! use videohub_preset::HubClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HubClient::new("192.168.1.248", 9990);
//!     let (state, preamble) = client.read_state().await?;
//!     println!("{}", preamble);
//!     for (output, input) in &state.routing {
//!         println!("{} <- {}", state.output_label(*output), state.input_label(*input));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized into several layers:
//!
//! - **Session**: owns the live state, the loaded preset, and the preset store
//! - **Client**: one-connection-per-operation access to a hub
//! - **Fetch / Reconcile**: state fetching, routing diff, and apply logic
//! - **Transport**: low-level TCP send and quiescence-timeout receive
//! - **Protocol / Parse**: wire constants and the permissive section parser
//! - **State**: the `HubState` model shared by all of the above

mod client;
mod error;
mod fetch;
mod parse;
mod preset;
mod protocol;
mod reconcile;
mod session;
mod state;
mod transport;

// Public exports
pub use client::HubClient;
pub use error::{HubError, Result};
pub use fetch::fetch_hub_state;
pub use parse::{decode_labels, decode_routing, extract_section, split_tokens};
pub use preset::{PresetInfo, PresetStore};
pub use protocol::{route_command, DEFAULT_PORT};
pub use reconcile::{apply_routing, compare, ApplyOutcome, RouteDiff};
pub use session::Session;
pub use state::{HubState, NO_INPUT_LABEL, UNKNOWN_LABEL, UNNAMED_LABEL};
pub use transport::{HubConnection, Transport};
