use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label stored when the hub reports an index with no name
pub const UNNAMED_LABEL: &str = "(unnamed)";

/// Label returned when a lookup misses the label map
pub const UNKNOWN_LABEL: &str = "(unknown)";

/// Label used in diffs for an output with no routing entry on one side
pub const NO_INPUT_LABEL: &str = "(none)";

/// Snapshot of a Videohub configuration.
///
/// Indices are 0-based and unbounded; whatever the hub reports is preserved,
/// so the same model covers a 12x12 and a 40x40 without special cases. The
/// routing table is independent of label completeness: an output may route to
/// an input that has no label entry, and label lookups fall back to
/// [`UNKNOWN_LABEL`] rather than fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubState {
    /// Input index -> display name
    #[serde(default, rename = "inputs")]
    pub input_labels: BTreeMap<u32, String>,

    /// Output index -> display name
    #[serde(default, rename = "outputs")]
    pub output_labels: BTreeMap<u32, String>,

    /// Output index -> input index currently feeding it
    #[serde(default)]
    pub routing: BTreeMap<u32, u32>,

    /// Free-text annotation entered when the preset was captured
    #[serde(default)]
    pub description: String,

    /// File or device this state was last populated from; traceability only
    #[serde(skip)]
    pub source: Option<String>,
}

impl HubState {
    /// Look up an input label, falling back to [`UNKNOWN_LABEL`]
    pub fn input_label(&self, index: u32) -> &str {
        self.input_labels
            .get(&index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Look up an output label, falling back to [`UNKNOWN_LABEL`]
    pub fn output_label(&self, index: u32) -> &str {
        self.output_labels
            .get(&index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Whether this state carries any routing entries
    pub fn has_routing(&self) -> bool {
        !self.routing.is_empty()
    }
}
