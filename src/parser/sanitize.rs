//! Strip markdown fences and surrounding prose from a model response

/// Best-effort extraction of the JSON object embedded in `raw`.
///
/// Removes a leading fence (bare or language-tagged) and a trailing fence,
/// then, unless the remainder already looks like a single object, slices
/// from the first `{` to the last `}`. Returns `raw` untouched when there is
/// neither a fence nor a brace pair. Never fails; a bad result surfaces when
/// the caller parses it.
pub fn sanitize_response(raw: &str) -> String {
    let unfenced = strip_fences(raw);

    if unfenced.starts_with('{') && unfenced.ends_with('}') {
        return unfenced.to_string();
    }

    if let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) {
        if start < end {
            return unfenced[start..=end].to_string();
        }
    }

    if unfenced.len() == raw.trim().len() {
        raw.to_string()
    } else {
        unfenced.to_string()
    }
}

fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();

    // Opening fence plus optional language tag on the same line
    let re = regex::Regex::new(r"^```[A-Za-z0-9_+-]*[ \t]*\r?\n?").ok();
    if let Some(m) = re.as_ref().and_then(|re| re.find(s)) {
        s = &s[m.end()..];
    }

    if let Some(stripped) = s.strip_suffix("```") {
        s = stripped;
    }

    s.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_fence_removed() {
        assert_eq!(sanitize_response("```json\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn test_bare_fence_removed() {
        assert_eq!(sanitize_response("```\n{\"a\":1}\n```"), r#"{"a":1}"#);
    }

    #[test]
    fn test_surrounding_prose_removed() {
        assert_eq!(
            sanitize_response(r#"Here you go: {"a":1} thanks"#),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_nested_braces_keep_outer_object() {
        let raw = "Sure!\n```json\n{\"roadmap\": [{\"month\": 1}]}\n```\nGood luck.";
        assert_eq!(sanitize_response(raw), r#"{"roadmap": [{"month": 1}]}"#);
    }

    #[test]
    fn test_clean_json_passes_through() {
        let raw = r#"{"goal": "x", "roadmap": []}"#;
        assert_eq!(sanitize_response(raw), raw);
    }

    #[test]
    fn test_no_braces_returns_input_unchanged() {
        let raw = "  I could not produce a roadmap.  ";
        assert_eq!(sanitize_response(raw), raw);
    }

    #[test]
    fn test_reversed_braces_not_sliced() {
        assert_eq!(sanitize_response("} nothing {"), "} nothing {");
    }
}
