//! Response validators — cheap heuristics over raw completion text.

use serde_json::Value;

use crate::llm_client::LlmError;

/// Raw bodies shorter than this are treated as failures.
const MIN_BODY_CHARS: usize = 5;
/// Marker of an upstream error page served in place of a completion.
const HTML_MARKER: &str = "<html";

/// Accepts a raw body as a completion, returning it trimmed.
///
/// Rejects blank bodies, raw bodies under `MIN_BODY_CHARS`, and anything that looks
/// like an HTML document. Padding counts toward the length; only the returned text
/// is trimmed. The HTML check is a placeholder for "upstream served an error
/// page"; a stricter content-type check belongs in the transport if the service changes.
pub fn validate_body(body: &str) -> Result<&str, LlmError> {
    let text = body.trim();

    if text.is_empty() {
        return Err(LlmError::InvalidResponse("empty body".to_string()));
    }
    let chars = body.chars().count();
    if chars < MIN_BODY_CHARS {
        return Err(LlmError::InvalidResponse(format!("body too short ({chars} chars)")));
    }
    if text.to_ascii_lowercase().contains(HTML_MARKER) {
        return Err(LlmError::InvalidResponse(
            "body looks like an HTML error page".to_string(),
        ));
    }

    Ok(text)
}

/// Returns the span from the first `[` through the last `]`, or `"[]"` if there is none.
///
/// Tolerates prose or code fences wrapped around a JSON array.
pub fn extract_json_array(text: &str) -> &str {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => "[]",
    }
}

/// Extracts a JSON array from `text` and checks that it parses and is non-empty.
/// Returns the extracted substring unchanged.
pub fn parse_json_array(text: &str) -> Result<&str, LlmError> {
    let json = extract_json_array(text);

    let items: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| LlmError::MalformedStructuredOutput(format!("not a JSON array: {e}")))?;

    if items.is_empty() {
        return Err(LlmError::MalformedStructuredOutput(
            "empty JSON array".to_string(),
        ));
    }

    Ok(json)
}
