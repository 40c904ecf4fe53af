// src/agents/decode.rs — Strict structured decoding of model replies
//
// A reply must be a single JSON object of the expected shape, optionally
// wrapped in one markdown code fence. Anything else is a failure; the
// steps never guess intent from prose.

use serde::de::DeserializeOwned;

use crate::util::preview;

const ERROR_PREVIEW_CHARS: usize = 120;

/// Decode a model reply into `T`, tolerating a surrounding code fence.
pub fn decode_reply<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let payload = strip_code_fence(raw);
    serde_json::from_str(payload).map_err(|e| {
        format!(
            "expected a JSON reply ({e}); got: {}",
            preview(raw.trim(), ERROR_PREVIEW_CHARS)
        )
    })
}

/// Remove one wrapping markdown fence (``` or ```json) if present.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string up to the first newline, then the closing fence.
    let Some(newline) = rest.find('\n') else {
        return trimmed;
    };
    let body = rest[newline + 1..].trim_end();
    body.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::steps::ProducerOutput;

    #[test]
    fn test_decode_plain_json() {
        let out: ProducerOutput =
            decode_reply(r#"{"notes": ["a"], "needs_more": true}"#).unwrap();
        assert_eq!(out.notes, ["a"]);
        assert!(out.needs_more);
    }

    #[test]
    fn test_decode_fenced_json() {
        let raw = "```json\n{\"notes\": [\"a\", \"b\"], \"needs_more\": false}\n```";
        let out: ProducerOutput = decode_reply(raw).unwrap();
        assert_eq!(out.notes.len(), 2);
        assert!(!out.needs_more);
    }

    #[test]
    fn test_decode_bare_fence() {
        let raw = "```\n{\"notes\": []}\n```";
        let out: ProducerOutput = decode_reply(raw).unwrap();
        assert!(out.notes.is_empty());
    }

    #[test]
    fn test_decode_surrounding_whitespace() {
        let out: ProducerOutput = decode_reply("  \n{\"notes\": [\"x\"]}\n ").unwrap();
        assert_eq!(out.notes, ["x"]);
    }

    #[test]
    fn test_decode_prose_fails() {
        let raw = "Here are my findings:\n- something interesting\nNEEDS_MORE: true";
        let err = decode_reply::<ProducerOutput>(raw).unwrap_err();
        assert!(err.contains("expected a JSON reply"));
    }

    #[test]
    fn test_decode_wrong_shape_fails() {
        assert!(decode_reply::<ProducerOutput>(r#"{"answer": 42}"#).is_err());
    }

    #[test]
    fn test_decode_error_includes_reply_preview() {
        let err = decode_reply::<ProducerOutput>("not json at all").unwrap_err();
        assert!(err.contains("not json at all"));
    }

    #[test]
    fn test_unterminated_fence_fails() {
        // Fence never closes: keep the raw text so the error shows it.
        assert!(decode_reply::<ProducerOutput>("```json\n{\"notes\": []}").is_err());
    }
}
