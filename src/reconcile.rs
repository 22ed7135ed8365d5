//! Diffing two hub states and pushing a preset's routing onto a hub.

use crate::error::{HubError, Result};
use crate::protocol::route_command;
use crate::state::{HubState, NO_INPUT_LABEL, UNKNOWN_LABEL};
use crate::transport::{Transport, FOLLOWUP_TIMEOUT, INITIAL_TIMEOUT};
use serde::Serialize;
use std::collections::BTreeSet;

/// One row of a preset-vs-live comparison.
///
/// Plain data with no rendering decisions; the caller chooses how to
/// present matches and differences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDiff {
    /// Output index this row describes
    pub output: u32,
    /// Output label, taken from whichever side knows it
    pub output_label: String,
    /// Input the preset routes this output to, if any
    pub preset_input: Option<u32>,
    /// Label of the preset input, `"(none)"` when absent
    pub preset_input_label: String,
    /// Input the live hub routes this output to, if any
    pub live_input: Option<u32>,
    /// Label of the live input, `"(none)"` when absent
    pub live_input_label: String,
    /// Whether the two sides disagree; absence counts as unequal to any value
    pub differs: bool,
}

/// Outcome of one crosspoint write during [`apply_routing`]
#[derive(Debug, Clone)]
pub struct ApplyOutcome {
    /// Output index the write addressed
    pub output: u32,
    /// Input index it was routed to
    pub input: u32,
    /// Whether the command went out on the wire
    pub sent: bool,
    /// Send error for this crosspoint, if any
    pub error: Option<String>,
}

/// Compare a preset's routing against a live hub state.
///
/// Rows cover the union of output indices present in either routing table,
/// ascending. An empty preset routing is a usage error: there is nothing to
/// compare against.
pub fn compare(preset: &HubState, live: &HubState) -> Result<Vec<RouteDiff>> {
    if !preset.has_routing() {
        return Err(HubError::NoPresetLoaded);
    }

    let outputs: BTreeSet<u32> = preset
        .routing
        .keys()
        .chain(live.routing.keys())
        .copied()
        .collect();

    let rows = outputs
        .into_iter()
        .map(|output| {
            let preset_input = preset.routing.get(&output).copied();
            let live_input = live.routing.get(&output).copied();

            let output_label = preset
                .output_labels
                .get(&output)
                .or_else(|| live.output_labels.get(&output))
                .map(String::as_str)
                .unwrap_or(UNKNOWN_LABEL)
                .to_string();

            RouteDiff {
                output,
                output_label,
                preset_input_label: input_label(preset, preset_input),
                live_input_label: input_label(live, live_input),
                differs: preset_input != live_input,
                preset_input,
                live_input,
            }
        })
        .collect();

    Ok(rows)
}

fn input_label(state: &HubState, input: Option<u32>) -> String {
    match input {
        Some(index) => state.input_label(index).to_string(),
        None => NO_INPUT_LABEL.to_string(),
    }
}

/// Push a preset's routing table onto the hub, one crosspoint at a time.
///
/// Only routing is written; labels never are. Each entry is its own write
/// command followed by an optional acknowledgement drain, and a failure on
/// one crosspoint is recorded in its outcome without aborting the rest —
/// the protocol offers no transaction semantics to lean on.
pub async fn apply_routing<T: Transport + ?Sized>(
    conn: &mut T,
    preset: &HubState,
) -> Result<Vec<ApplyOutcome>> {
    if !preset.has_routing() {
        return Err(HubError::NoPresetLoaded);
    }

    // drain the banner the hub sends on connect before the first write
    let _ = conn.receive_until_quiet(INITIAL_TIMEOUT, FOLLOWUP_TIMEOUT).await?;

    let mut outcomes = Vec::with_capacity(preset.routing.len());
    for (&output, &input) in &preset.routing {
        let command = route_command(output, input);
        match conn.send(command.as_bytes()).await {
            Ok(()) => {
                tracing::debug!(
                    "Routed output {} ({}) <- input {} ({})",
                    output,
                    preset.output_label(output),
                    input,
                    preset.input_label(input)
                );
                // acknowledgement is not guaranteed; drain whatever comes
                let _ = conn.receive_until_quiet(INITIAL_TIMEOUT, FOLLOWUP_TIMEOUT).await;
                outcomes.push(ApplyOutcome {
                    output,
                    input,
                    sent: true,
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!("Failed sending output {}: {}", output, e);
                outcomes.push(ApplyOutcome {
                    output,
                    input,
                    sent: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    Ok(outcomes)
}
