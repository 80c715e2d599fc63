//! Stream-protocol response decoding
//!
//! Provider endpoints answer either with a plain JSON envelope or with an
//! event-stream body: newline-delimited, prefix-tagged lines of which only
//! `data:` lines carry a payload. Servers interleave heartbeats, comments
//! and partial frames with data lines, so the scan is tolerant: a malformed
//! line never aborts the decode, it is skipped.

use serde_json::Value;

/// Prefix tagging payload-carrying lines in an event stream.
pub const DATA_PREFIX: &str = "data:";

/// Stream terminator sentinel; carries no payload.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Extract the text payload from a remote-call envelope.
///
/// The envelope shape is `{"result": {"content": [{"type": "text", "text":
/// ...}]}}`; anything else yields `None`.
pub fn envelope_text(envelope: &Value) -> Option<String> {
    let text = envelope
        .get("result")?
        .get("content")?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()?;

    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Scan an event-stream body top-to-bottom and return the first payload.
///
/// Non-data lines are ignored. Data lines with an empty payload, the
/// terminator sentinel, malformed JSON, or an envelope without a usable text
/// field are skipped; the scan stops at the first line that decodes to a
/// non-empty payload. No such line yields `None`.
pub fn decode_event_stream(raw: &str) -> Option<String> {
    for line in raw.lines() {
        let Some(data) = line.trim().strip_prefix(DATA_PREFIX) else {
            continue;
        };

        let data = data.trim();
        if data.is_empty() || data == DONE_SENTINEL {
            continue;
        }

        let Ok(envelope) = serde_json::from_str::<Value>(data) else {
            continue;
        };

        if let Some(text) = envelope_text(&envelope) {
            return Some(text);
        }
    }

    None
}

/// Decode a response body according to its content type.
///
/// Event-stream bodies go through the line scan; anything else is treated as
/// a single JSON envelope.
pub fn decode_body(content_type: Option<&str>, body: &str) -> Option<String> {
    let is_event_stream = content_type
        .map(|ct| ct.contains("text/event-stream"))
        .unwrap_or(false);

    if is_event_stream {
        decode_event_stream(body)
    } else {
        let envelope = serde_json::from_str::<Value>(body).ok()?;
        envelope_text(&envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data_line(text: &str) -> String {
        format!(
            "data: {}",
            json!({"result": {"content": [{"type": "text", "text": text}]}})
        )
    }

    #[test]
    fn returns_payload_from_single_data_line() {
        let body = data_line("hello world");
        assert_eq!(decode_event_stream(&body).as_deref(), Some("hello world"));
    }

    #[test]
    fn ignores_interleaved_non_data_lines() {
        let body = format!(
            ": heartbeat\nevent: message\n\nretry: 3000\n{}\n: another comment\n",
            data_line("payload")
        );
        assert_eq!(decode_event_stream(&body).as_deref(), Some("payload"));
    }

    #[test]
    fn no_data_lines_is_absent() {
        let body = ": heartbeat\nevent: message\n\n";
        assert_eq!(decode_event_stream(body), None);
    }

    #[test]
    fn skips_done_sentinel_and_empty_payloads() {
        let body = format!("data:\ndata: [DONE]\n{}", data_line("late payload"));
        assert_eq!(decode_event_stream(&body).as_deref(), Some("late payload"));
    }

    #[test]
    fn malformed_line_does_not_abort_the_scan() {
        let body = format!("data: {{not json\ndata: [1, 2\n{}", data_line("ok"));
        assert_eq!(decode_event_stream(&body).as_deref(), Some("ok"));
    }

    #[test]
    fn first_usable_payload_wins() {
        let body = format!("{}\n{}", data_line("first"), data_line("second"));
        assert_eq!(decode_event_stream(&body).as_deref(), Some("first"));
    }

    #[test]
    fn envelope_without_text_is_skipped() {
        let body = format!(
            "data: {}\n{}",
            json!({"result": {"content": []}}),
            data_line("real")
        );
        assert_eq!(decode_event_stream(&body).as_deref(), Some("real"));
    }

    #[test]
    fn whitespace_only_text_is_not_a_payload() {
        let body = data_line("   \n  ");
        assert_eq!(decode_event_stream(&body), None);
    }

    #[test]
    fn plain_json_body_decodes_through_envelope_walk() {
        let body = json!({"result": {"content": [{"type": "text", "text": "direct"}]}});
        assert_eq!(
            decode_body(Some("application/json"), &body.to_string()).as_deref(),
            Some("direct")
        );
    }

    #[test]
    fn event_stream_content_type_selects_line_scan() {
        let body = format!(": ping\n{}", data_line("streamed"));
        assert_eq!(
            decode_body(Some("text/event-stream"), &body).as_deref(),
            Some("streamed")
        );
    }

    #[test]
    fn unparseable_json_body_is_absent() {
        assert_eq!(decode_body(Some("application/json"), "<html>"), None);
    }
}
