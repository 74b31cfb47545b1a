// JSONP unwrapping.
//
// The widgets endpoint wraps its JSON payload in a caller-supplied callback:
// `cb({...});`. The original consumer stripped a fixed-width prefix/suffix;
// this parser locates the outer parentheses instead, so it keeps working if
// the callback name changes length.

/// Strip a JSONP callback wrapper, returning the inner JSON text.
///
/// Returns `None` when the body does not look like `identifier(...)` --
/// including bodies that are plain JSON with parentheses inside strings.
pub fn unwrap(body: &str) -> Option<&str> {
    let body = body.trim();
    let open = body.find('(')?;
    let close = body.rfind(')')?;
    if close <= open {
        return None;
    }

    // Everything before the opening paren must be a callback identifier,
    // otherwise we'd mangle plain JSON that happens to contain parens.
    let callback = body.get(..open)?.trim();
    if callback.is_empty() || !callback.chars().all(is_callback_char) {
        return None;
    }

    Some(body.get(open + 1..close)?.trim())
}

fn is_callback_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.')
}

#[cfg(test)]
mod tests {
    use super::unwrap;

    #[test]
    fn unwraps_short_callback() {
        assert_eq!(unwrap(r#"cb({"data":1});"#), Some(r#"{"data":1}"#));
    }

    #[test]
    fn unwraps_long_callback() {
        assert_eq!(
            unwrap(r#"jQuery36209_1712({"data":{"x":[1,2]}})"#),
            Some(r#"{"data":{"x":[1,2]}}"#)
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(unwrap("  cb( {\"a\":true} );\n"), Some(r#"{"a":true}"#));
    }

    #[test]
    fn keeps_nested_parens_inside_payload() {
        assert_eq!(
            unwrap(r#"cb({"name":"Entry (north)"});"#),
            Some(r#"{"name":"Entry (north)"}"#)
        );
    }

    #[test]
    fn rejects_bare_json() {
        assert_eq!(unwrap(r#"{"name":"Entry (north)"}"#), None);
    }

    #[test]
    fn rejects_missing_parens() {
        assert_eq!(unwrap("cb"), None);
        assert_eq!(unwrap(""), None);
        assert_eq!(unwrap("cb)("), None);
    }
}
