//! Permissive parsing of hub response text.
//!
//! All functions here are pure: they operate on a fully drained text buffer
//! and never see the socket. Malformed records are dropped, never fatal —
//! the hub's output has no framing guarantee and a partial read must not
//! poison the records that did arrive intact.

use crate::state::UNNAMED_LABEL;
use std::collections::BTreeMap;

/// Extract the content of one labeled section from a combined dump.
///
/// The section starts immediately after the first occurrence of
/// `start_marker` and runs to the earliest following occurrence of any
/// marker in `end_markers`, or to the end of the text. A missing start
/// marker yields an empty result; sections may legitimately be absent from
/// a partial fetch.
pub fn extract_section<'a>(text: &'a str, start_marker: &str, end_markers: &[&str]) -> &'a str {
    let Some(p) = text.find(start_marker) else {
        return "";
    };
    let start = p + start_marker.len();
    let rest = &text[start..];

    let end = end_markers
        .iter()
        .filter_map(|em| rest.find(em))
        .min()
        .unwrap_or(rest.len());

    &rest[..end]
}

/// Split section text into record tokens on line feeds, carriage returns
/// and periods, dropping empty tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split(['\n', '\r', '.'])
        .filter(|tok| !tok.is_empty())
        .collect()
}

/// Decode label tokens of the form `"<index> <label text>"` into an
/// index -> label map.
///
/// A token without a leading decimal integer is dropped and decoding
/// continues with the next token. An empty label becomes `"(unnamed)"`;
/// the map never holds empty strings.
pub fn decode_labels<'a, I>(tokens: I) -> BTreeMap<u32, String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut labels = BTreeMap::new();
    for tok in tokens {
        let tok = tok.trim_start();
        let digits = tok.find(|c: char| !c.is_ascii_digit()).unwrap_or(tok.len());
        let Ok(index) = tok[..digits].parse::<u32>() else {
            tracing::debug!("dropping malformed label token: {:?}", tok);
            continue;
        };
        let label = tok[digits..].trim();
        let label = if label.is_empty() { UNNAMED_LABEL } else { label };
        labels.insert(index, label.to_string());
    }
    labels
}

/// Decode routing tokens of the form `"<output> <input>"` into an
/// output -> input map.
///
/// A token that does not yield two integers is dropped without affecting
/// its neighbors.
pub fn decode_routing<'a, I>(tokens: I) -> BTreeMap<u32, u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut routing = BTreeMap::new();
    for tok in tokens {
        let mut fields = tok.split_whitespace();
        let output = fields.next().and_then(|f| f.parse::<u32>().ok());
        let input = fields.next().and_then(|f| f.parse::<u32>().ok());
        match (output, input) {
            (Some(output), Some(input)) => {
                routing.insert(output, input);
            }
            _ => tracing::debug!("dropping malformed routing token: {:?}", tok),
        }
    }
    routing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ROUTING_MARKER, SECTION_MARKERS};

    #[test]
    fn split_tokens_on_newlines_and_periods() {
        assert_eq!(
            split_tokens("INPUT1\r\nINPUT2.INPUT3\n"),
            vec!["INPUT1", "INPUT2", "INPUT3"]
        );
    }

    #[test]
    fn split_tokens_drops_delimiter_runs() {
        assert_eq!(split_tokens("..\n\r\n."), Vec::<&str>::new());
        assert_eq!(split_tokens("a..b"), vec!["a", "b"]);
    }

    #[test]
    fn decode_labels_well_formed() {
        let labels = decode_labels(["0 Camera 1", "1 Camera 2", "11 VTR"]);
        assert_eq!(labels[&0], "Camera 1");
        assert_eq!(labels[&1], "Camera 2");
        assert_eq!(labels[&11], "VTR");
    }

    #[test]
    fn decode_labels_empty_label_becomes_sentinel() {
        let labels = decode_labels(["3", "4   "]);
        assert_eq!(labels[&3], "(unnamed)");
        assert_eq!(labels[&4], "(unnamed)");
    }

    #[test]
    fn decode_labels_drops_malformed_without_aborting() {
        let labels = decode_labels(["0 Cam A", "garbage", "2 Cam C"]);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[&0], "Cam A");
        assert_eq!(labels[&2], "Cam C");
    }

    #[test]
    fn decode_routing_pairs() {
        let routing = decode_routing(["0 1", "1 0", "39 12"]);
        assert_eq!(routing[&0], 1);
        assert_eq!(routing[&1], 0);
        assert_eq!(routing[&39], 12);
    }

    #[test]
    fn decode_routing_drops_short_tokens() {
        let routing = decode_routing(["0 1", "7", "not numbers", "2 5"]);
        assert_eq!(routing.len(), 2);
        assert_eq!(routing[&0], 1);
        assert_eq!(routing[&2], 5);
    }

    #[test]
    fn extract_section_basic() {
        let text = "INPUT LABELS:\n0 A\n1 B\nOUTPUT LABELS:\n0 X\n";
        let section = extract_section(text, "INPUT LABELS:", &SECTION_MARKERS);
        assert_eq!(section, "\n0 A\n1 B\n");
    }

    #[test]
    fn extract_section_missing_marker_is_empty() {
        let text = "no markers here";
        assert_eq!(extract_section(text, "INPUT LABELS:", &SECTION_MARKERS), "");
    }

    #[test]
    fn extract_section_runs_to_end_without_end_marker() {
        let text = "VIDEO OUTPUT ROUTING:\n0 1\n";
        let section = extract_section(text, "VIDEO OUTPUT ROUTING:", &["INPUT LABELS:"]);
        assert_eq!(section, "\n0 1\n");
    }

    #[test]
    fn extract_section_stops_at_earliest_end_marker() {
        let text = "INPUT LABELS:\n0 A\nVIDEO OUTPUT LOCKS:\nU\nOUTPUT LABELS:\n0 X\n";
        let section = extract_section(text, "INPUT LABELS:", &SECTION_MARKERS);
        assert_eq!(section, "\n0 A\n");
    }

    #[test]
    fn extract_section_is_idempotent() {
        let text = "END PRELUDE:\nINPUT LABELS:\n0 A\nOUTPUT LABELS:\n";
        let first = extract_section(text, "INPUT LABELS:", &SECTION_MARKERS);
        let second = extract_section(text, "INPUT LABELS:", &SECTION_MARKERS);
        assert_eq!(first, second);
    }

    #[test]
    fn routing_round_trip_from_synthetic_dump() {
        let dump = "VIDEO OUTPUT ROUTING:\n0 1.\n1 0.\nOUTPUT LABELS:";
        let section = extract_section(dump, ROUTING_MARKER, &SECTION_MARKERS);
        let routing = decode_routing(split_tokens(section));
        assert_eq!(routing[&0], 1);
        assert_eq!(routing[&1], 0);
        assert_eq!(routing.len(), 2);
    }
}
