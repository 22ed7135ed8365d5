//! Wire constants for the Videohub ASCII protocol.
//!
//! The hub accepts single-byte query commands and replies with ASCII text
//! blocks introduced by marker lines. There is no length prefix and no
//! terminator; response completeness is inferred by the transport's
//! quiescence timeout.

/// Default TCP port of a Videohub
pub const DEFAULT_PORT: u16 = 9990;

/// Query command: device preamble (model, firmware, prelude text)
pub const CMD_PREAMBLE: &[u8] = &[0x00];
/// Query command: input labels
pub const CMD_INPUT_LABELS: &[u8] = &[0x01];
/// Query command: output labels
pub const CMD_OUTPUT_LABELS: &[u8] = &[0x02];
/// Query command: video output routing table
pub const CMD_ROUTING: &[u8] = &[0x03];

pub const INPUT_LABELS_MARKER: &str = "INPUT LABELS:";
pub const OUTPUT_LABELS_MARKER: &str = "OUTPUT LABELS:";
pub const ROUTING_MARKER: &str = "VIDEO OUTPUT ROUTING:";
pub const OUTPUT_LOCKS_MARKER: &str = "VIDEO OUTPUT LOCKS:";
pub const END_PRELUDE_MARKER: &str = "END PRELUDE:";

/// All known section markers. Used as the end-marker set when extracting a
/// section from a combined dump; the set must stay complete or a section
/// would swallow its neighbor.
pub const SECTION_MARKERS: [&str; 5] = [
    OUTPUT_LABELS_MARKER,
    ROUTING_MARKER,
    OUTPUT_LOCKS_MARKER,
    END_PRELUDE_MARKER,
    INPUT_LABELS_MARKER,
];

/// Render the write command for a single crosspoint.
///
/// Indices are 0-based on the wire; the blank line terminates the block.
pub fn route_command(output: u32, input: u32) -> String {
    format!("{}\n{} {}\n\n", ROUTING_MARKER, output, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_command_format() {
        assert_eq!(route_command(0, 2), "VIDEO OUTPUT ROUTING:\n0 2\n\n");
        assert_eq!(route_command(39, 11), "VIDEO OUTPUT ROUTING:\n39 11\n\n");
    }
}
