//! Best-effort field extraction from JSON-ish text.
//!
//! Health endpoints answer with loosely shaped JSON; some of them are
//! truncated, some carry trailing garbage. Rather than reject those bodies, the
//! scanner here finds the first `"<key>":` occurrence and reads one value after
//! it. It never fails: anything it cannot resolve comes back as `None` (or as
//! the partial span that was available).

#![allow(missing_docs)]

use memchr::memmem;

/// Classification of a health `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Ok,
    Fail,
    Unknown,
}

impl HealthStatus {
    /// Classify an already-extracted status value.
    ///
    /// `ok`/`up` (any case) are OK, any other non-empty value is FAIL, and an
    /// empty value is UNKNOWN.
    #[must_use]
    pub fn classify(status: &str) -> Self {
        let status = status.trim();
        if status.eq_ignore_ascii_case("ok") || status.eq_ignore_ascii_case("up") {
            Self::Ok
        } else if status.is_empty() {
            Self::Unknown
        } else {
            Self::Fail
        }
    }

    /// Classify a raw response body: extracted `status` field first, then the
    /// literal `"status":"ok"` style patterns anywhere in the body.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let status = extract(body, "status").unwrap_or_default();
        let lower = body.to_ascii_lowercase();
        let has = |value: &str| lower.contains(&format!("\"status\":\"{value}\""));

        if Self::classify(status) == Self::Ok || has("ok") || has("up") {
            Self::Ok
        } else if has("fail") || has("down") || !status.is_empty() {
            Self::Fail
        } else {
            Self::Unknown
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Fail => "FAIL",
            Self::Unknown => "unknown",
        }
    }
}

/// Extract the raw text of the first `"<key>":` value in `text`.
///
/// Strings come back without their quotes and with escapes left as written.
/// Arrays and objects come back as the full balanced span, delimiters
/// included. Scalars (numbers, booleans, `null`) are read up to the next
/// comma, `}` or line break.
#[must_use]
pub fn extract<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("\"{key}\":");
    let found = memmem::find(text.as_bytes(), pattern.as_bytes())?;
    let bytes = text.as_bytes();

    let mut i = found + pattern.len();
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t' | b'\n' | b'\r') {
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }

    match bytes[i] {
        b'"' => Some(string_value(text, i + 1)),
        open @ (b'[' | b'{') => Some(composite_value(text, i, open)),
        _ => Some(scalar_value(text, i)),
    }
}

/// Index of the closing quote of a string whose body starts at `start`, or
/// `None` when the input ends first. A backslash always swallows the next byte.
fn closing_quote(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn string_value(text: &str, start: usize) -> &str {
    match closing_quote(text.as_bytes(), start) {
        Some(end) => &text[start..end],
        None => &text[start..],
    }
}

fn composite_value(text: &str, start: usize, open: u8) -> &str {
    let close = if open == b'{' { b'}' } else { b']' };
    let bytes = text.as_bytes();
    let mut depth = 0_usize;
    let mut i = start;

    while i < bytes.len() {
        let c = bytes[i];
        if c == b'"' {
            match closing_quote(bytes, i + 1) {
                Some(end) => i = end,
                None => break,
            }
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return text[start..=i].trim();
            }
        }
        i += 1;
    }

    // Truncated input: hand back whatever followed the opening delimiter.
    text[start..].trim()
}

fn scalar_value(text: &str, start: usize) -> &str {
    let rest = &text[start..];
    let end = rest
        .find([',', '}', '\n', '\r'])
        .unwrap_or(rest.len());
    rest[..end].trim()
}

/// Split an extracted `groups` array into its element names.
///
/// Elements are trimmed of whitespace, surrounding quotes and stray `]`/`}`
/// characters; empty elements are dropped.
#[must_use]
pub fn group_names(groups: &str) -> Vec<String> {
    let raw = groups.trim();
    let raw = raw.strip_prefix('[').unwrap_or(raw);
    let raw = raw.strip_suffix(']').unwrap_or(raw);

    raw.split(',')
        .map(|part| {
            part.trim()
                .trim_matches(|c| matches!(c, '"' | ']' | '}'))
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn extracts_string_value() {
        let body = r#"{"status":"ok","version":"1.2.3"}"#;
        assert_eq!(extract(body, "status"), Some("ok"));
        assert_eq!(extract(body, "version"), Some("1.2.3"));
    }

    #[test]
    fn skips_whitespace_after_colon() {
        let body = "{\"status\":  \n\t\"up\"}";
        assert_eq!(extract(body, "status"), Some("up"));
    }

    #[test]
    fn string_escapes_are_kept_verbatim() {
        let body = r#"{"message":"said \"hi\" then left","x":1}"#;
        assert_eq!(extract(body, "message"), Some(r#"said \"hi\" then left"#));
    }

    #[test]
    fn unterminated_string_returns_rest() {
        assert_eq!(extract(r#"{"status":"degr"#, "status"), Some("degr"));
    }

    #[test]
    fn extracts_numbers_booleans_and_null() {
        let body = "{\"count\": 42 ,\"live\":true,\"owner\":null\n}";
        assert_eq!(extract(body, "count"), Some("42"));
        assert_eq!(extract(body, "live"), Some("true"));
        assert_eq!(extract(body, "owner"), Some("null"));
    }

    #[test]
    fn scalar_at_end_of_input() {
        assert_eq!(extract(r#""uptime": 3600"#, "uptime"), Some("3600"));
    }

    #[test]
    fn extracts_nested_array_and_object() {
        let body = r#"{"groups": ["db", "cache"], "details": {"db": {"status": "UP"}}, "x": 1}"#;
        assert_eq!(extract(body, "groups"), Some(r#"["db", "cache"]"#));
        assert_eq!(
            extract(body, "details"),
            Some(r#"{"db": {"status": "UP"}}"#)
        );
    }

    #[test]
    fn brackets_inside_strings_do_not_change_depth() {
        let body = r#"{"groups":["a]b","c[d"],"next":true}"#;
        assert_eq!(extract(body, "groups"), Some(r#"["a]b","c[d"]"#));
    }

    #[test]
    fn truncated_composite_returns_rest_of_input() {
        let body = r#"{"groups":["db","cache""#;
        assert_eq!(extract(body, "groups"), Some(r#"["db","cache""#));
    }

    #[test]
    fn missing_key_is_absent() {
        assert_eq!(extract(r#"{"state":"ok"}"#, "status"), None);
        assert_eq!(extract("", "status"), None);
        assert_eq!(extract("not json at all", "status"), None);
    }

    #[test]
    fn key_match_is_case_sensitive() {
        assert_eq!(extract(r#"{"Status":"ok"}"#, "status"), None);
    }

    #[test]
    fn key_at_end_of_input_is_absent() {
        assert_eq!(extract(r#"{"status":   "#, "status"), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let body = r#"{"status":"DOWN","components":{"db":{"status":"UP"}}}"#;
        assert_eq!(extract(body, "status"), Some("DOWN"));
    }

    #[test]
    fn classify_matches_contract() {
        assert_eq!(HealthStatus::classify("OK"), HealthStatus::Ok);
        assert_eq!(HealthStatus::classify("Up"), HealthStatus::Ok);
        assert_eq!(HealthStatus::classify("down"), HealthStatus::Fail);
        assert_eq!(HealthStatus::classify("degraded"), HealthStatus::Fail);
        assert_eq!(HealthStatus::classify(""), HealthStatus::Unknown);
    }

    #[test]
    fn from_body_uses_literal_patterns() {
        assert_eq!(HealthStatus::from_body(r#"{"status":"UP"}"#), HealthStatus::Ok);
        assert_eq!(
            HealthStatus::from_body(r#"{"status":"DOWN"}"#),
            HealthStatus::Fail
        );
        assert_eq!(
            HealthStatus::from_body(r#"{"healthy":true}"#),
            HealthStatus::Unknown
        );
        assert_eq!(HealthStatus::from_body("<html>502</html>"), HealthStatus::Unknown);
        assert_eq!(
            HealthStatus::from_body(r#"{"status":"maintenance"}"#),
            HealthStatus::Fail
        );
    }

    #[test]
    fn group_names_strip_quotes_and_brackets() {
        assert_eq!(
            group_names(r#"["liveness", "readiness" ,"db"]"#),
            vec!["liveness", "readiness", "db"]
        );
        assert_eq!(group_names("[]"), Vec::<String>::new());
        assert_eq!(group_names(r#"["a",,"b"}]"#), vec!["a", "b"]);
    }

    #[test]
    fn string_starting_with_bracket_is_not_a_composite() {
        let doc = r#"{"target": "[", "after": "x"}"#;
        assert_eq!(extract(doc, "target"), Some("["));
        assert_eq!(extract(r#"{"target": "{a"}"#, "target"), Some("{a"));
    }

    #[test]
    fn group_names_strip_interleaved_quotes_and_braces() {
        assert_eq!(group_names(r#"["db"}, "cache"]}"#), vec!["db", "cache"]);
        assert_eq!(group_names(r#"[}"x"]"#), vec!["x"]);
    }

    fn count_outside_strings(span: &str, open: char, close: char) -> (usize, usize) {
        let mut in_string = false;
        let mut escaped = false;
        let (mut opens, mut closes) = (0, 0);
        for c in span.chars() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                c if c == open => opens += 1,
                c if c == close => closes += 1,
                _ => {}
            }
        }
        (opens, closes)
    }

    fn arb_string_body() -> impl Strategy<Value = String> {
        // Raw JSON string bodies: plain text, brackets, and escaped quotes.
        prop::collection::vec(
            prop_oneof![
                "[a-zA-Z0-9 _.:/-]{1,6}",
                Just("\\\"".to_string()),
                Just("\\\\".to_string()),
                Just("[".to_string()),
                Just("}".to_string()),
            ],
            0..8,
        )
        .prop_map(|parts| parts.concat())
    }

    fn arb_json_value() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            arb_string_body().prop_map(|s| format!("\"{s}\"")),
            any::<i64>().prop_map(|n| n.to_string()),
            any::<bool>().prop_map(|b| b.to_string()),
            Just("null".to_string()),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4)
                    .prop_map(|items| format!("[{}]", items.join(", "))),
                prop::collection::vec(("[a-z]{1,5}", inner), 0..4).prop_map(|fields| {
                    let body: Vec<String> = fields
                        .into_iter()
                        .map(|(k, v)| format!("\"{k}\": {v}"))
                        .collect();
                    format!("{{{}}}", body.join(", "))
                }),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn string_round_trip(body in arb_string_body()) {
            let doc = format!(r#"{{"other": 1, "target": "{body}", "tail": false}}"#);
            prop_assert_eq!(extract(&doc, "target"), Some(body.as_str()));
        }

        #[test]
        fn number_and_bool_round_trip(n in any::<i64>(), b in any::<bool>()) {
            let doc = format!(r#"{{"n": {n}, "b": {b}}}"#);
            let n_text = n.to_string();
            let b_text = b.to_string();
            prop_assert_eq!(extract(&doc, "n"), Some(n_text.as_str()));
            prop_assert_eq!(extract(&doc, "b"), Some(b_text.as_str()));
        }

        #[test]
        fn composite_round_trip_is_balanced(value in arb_json_value()) {
            let doc = format!(r#"{{"target": {value}, "after": "x"}}"#);
            let got = extract(&doc, "target");
            if value.starts_with('"') {
                prop_assert_eq!(got, Some(&value[1..value.len() - 1]));
            } else {
                prop_assert_eq!(got, Some(value.as_str()));
            }
            if let Some(span) = got.filter(|_| !value.starts_with('"')) {
                let (o, c) = count_outside_strings(span, '[', ']');
                prop_assert_eq!(o, c);
                let (o, c) = count_outside_strings(span, '{', '}');
                prop_assert_eq!(o, c);
            }
        }

        #[test]
        fn absent_key_is_none(text in "[^\"]{0,64}") {
            prop_assert_eq!(extract(&text, "status"), None);
        }

        #[test]
        fn never_panics_on_arbitrary_input(text in ".{0,128}", key in "[a-z]{1,6}") {
            let _ = extract(&text, &key);
        }
    }
}
