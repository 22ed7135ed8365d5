//! Fetching a complete [`HubState`] from a live hub.

use crate::error::Result;
use crate::parse::{decode_labels, decode_routing, extract_section, split_tokens};
use crate::protocol::{
    CMD_INPUT_LABELS, CMD_OUTPUT_LABELS, CMD_PREAMBLE, CMD_ROUTING, INPUT_LABELS_MARKER,
    OUTPUT_LABELS_MARKER, ROUTING_MARKER, SECTION_MARKERS,
};
use crate::state::HubState;
use crate::transport::{Transport, FOLLOWUP_TIMEOUT};
use std::time::Duration;

/// Initial wait for each query response during a fetch
const FETCH_TIMEOUT: Duration = Duration::from_millis(500);

/// Query the hub for its full configuration and decode it.
///
/// Sends the four query commands in order (preamble, input labels, output
/// labels, routing), draining each response until quiet. Some firmware
/// answers a query with the full prelude instead of the single section, and
/// some answers nothing at all for sections already covered by the preamble,
/// so each section falls back to extraction from the combined dump when its
/// dedicated response is empty.
///
/// Returns the decoded state and the raw preamble text. Only a transport
/// failure is an error: a hub that returns partial or malformed text still
/// yields a best-effort (possibly empty) state.
pub async fn fetch_hub_state<T: Transport + ?Sized>(conn: &mut T) -> Result<(HubState, String)> {
    let preamble = query(conn, CMD_PREAMBLE).await?;
    let inputs = query(conn, CMD_INPUT_LABELS).await?;
    let outputs = query(conn, CMD_OUTPUT_LABELS).await?;
    let routing = query(conn, CMD_ROUTING).await?;

    // combined dump, used as fallback source for empty per-command responses
    let all = [
        preamble.as_str(),
        inputs.as_str(),
        outputs.as_str(),
        routing.as_str(),
    ]
    .join("\n");

    let inputs_section = prefer(&inputs, &all, INPUT_LABELS_MARKER);
    let outputs_section = prefer(&outputs, &all, OUTPUT_LABELS_MARKER);
    let routing_section = prefer(&routing, &all, ROUTING_MARKER);

    let state = HubState {
        input_labels: decode_labels(split_tokens(inputs_section)),
        output_labels: decode_labels(split_tokens(outputs_section)),
        routing: decode_routing(split_tokens(routing_section)),
        description: String::new(),
        source: None,
    };

    tracing::info!(
        "Fetched hub state: {} inputs, {} outputs, {} routes",
        state.input_labels.len(),
        state.output_labels.len(),
        state.routing.len()
    );

    Ok((state, preamble))
}

async fn query<T: Transport + ?Sized>(conn: &mut T, command: &[u8]) -> Result<String> {
    conn.send(command).await?;
    let bytes = conn.receive_until_quiet(FETCH_TIMEOUT, FOLLOWUP_TIMEOUT).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn prefer<'a>(dedicated: &'a str, combined: &'a str, marker: &str) -> &'a str {
    if dedicated.is_empty() {
        extract_section(combined, marker, &SECTION_MARKERS)
    } else {
        dedicated
    }
}
