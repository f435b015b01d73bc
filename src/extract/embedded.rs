//! Pulls a JSON object literal out of server-rendered HTML.
//!
//! Pages from the stats sites carry their state as a script assignment such
//! as `window.__SSR_DATA__ = {...}`. We locate the marker, jump to the next
//! `{` and scan for the matching `}` while tracking string literals, so
//! braces and quotes inside champion names or tooltips do not end the object
//! early.

use crate::error::AppError;
use serde_json::Value;

/// Extract and parse the first balanced JSON object following `marker`.
pub fn extract(document: &str, marker: &str) -> Result<Value, AppError> {
    let span = balanced_span(document, marker)?;

    serde_json::from_str(span).map_err(|e| AppError::MalformedInput {
        reason: format!("JSON after {} does not parse", marker),
        source: Some(e),
    })
}

/// Raw text of the object literal after `marker`, braces included.
pub fn balanced_span<'a>(document: &'a str, marker: &str) -> Result<&'a str, AppError> {
    let marker_at = document
        .find(marker)
        .ok_or_else(|| AppError::NotFound(format!("{} not found in page", marker)))?;

    let start = document[marker_at..]
        .find('{')
        .map(|offset| marker_at + offset)
        .ok_or_else(|| AppError::malformed(format!("No opening brace after {}", marker)))?;

    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    // Every structural character is ASCII, so scanning bytes never lands
    // inside a multi-byte sequence at a position we slice on.
    for (i, &b) in document.as_bytes()[start..].iter().enumerate() {
        let was_escaped = escaped;
        escaped = false;

        match b {
            b'\\' if !was_escaped => escaped = true,
            b'"' if !was_escaped => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&document[start..=start + i]);
                }
            }
            _ => {}
        }
    }

    Err(AppError::malformed(format!("No closing brace found for {}", marker)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MARKER: &str = "window.__SSR_DATA__";

    #[test]
    fn test_extracts_assignment_with_trailing_script() {
        let html = r#"<html><script>window.__SSR_DATA__ = {"a": {"b": [1, 2]}};
            window.other = {"x": 1};</script></html>"#;
        let value = extract(html, MARKER).unwrap();
        assert_eq!(value, json!({"a": {"b": [1, 2]}}));
    }

    #[test]
    fn test_braces_and_quotes_inside_strings_are_ignored() {
        let body = r#"{"name": "Kha'Zix {evolved}", "tip": "say \"}\" twice", "nested": {"x": "{{"}}"#;
        let html = format!("<script>{} = {}</script>", MARKER, body);

        let extracted = extract(&html, MARKER).unwrap();
        let direct: Value = serde_json::from_str(body).unwrap();
        assert_eq!(extracted, direct);
        assert_eq!(extracted["tip"], "say \"}\" twice");
    }

    #[test]
    fn test_escaped_backslash_before_quote_closes_string() {
        let body = r#"{"path": "C:\\", "next": {"ok": true}}"#;
        let html = format!("{}={};", MARKER, body);
        let extracted = extract(&html, MARKER).unwrap();
        assert_eq!(extracted["next"]["ok"], true);
    }

    #[test]
    fn test_multibyte_text_survives() {
        let body = r#"{"name": "Nunu & Willump ☃", "n": 1}"#;
        let html = format!("é {} {}", MARKER, body);
        let extracted = extract(&html, MARKER).unwrap();
        assert_eq!(extracted["name"], "Nunu & Willump ☃");
    }

    #[test]
    fn test_missing_marker_is_not_found() {
        let err = extract("<html>{}</html>", MARKER).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_no_brace_after_marker_is_malformed() {
        let err = extract("{} window.__SSR_DATA__ = null;", MARKER).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { .. }));
    }

    #[test]
    fn test_unterminated_object_is_malformed() {
        let html = r#"window.__SSR_DATA__ = {"a": {"b": "}"}"#;
        let err = extract(html, MARKER).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { source: None, .. }));
    }

    #[test]
    fn test_invalid_json_wraps_parse_error() {
        let html = "window.__SSR_DATA__ = {a: 1}";
        let err = extract(html, MARKER).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput { source: Some(_), .. }));
    }
}
