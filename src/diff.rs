use colored::Colorize;
use serde_json::Value;

/// Bodies above this size are not diffed; the report only carries sizes.
/// Keeps the quadratic token diff bounded.
const MAX_DIFF_BYTES: usize = 5000;

/// One difference between two parsed JSON values, addressed by a
/// `$`-rooted path.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonChange {
    Added { path: String, value: Value },
    Removed { path: String, value: Value },
    Changed { path: String, from: Value, to: Value },
}

/// One span of a token-level textual diff. `Removed` text appears only in
/// the expected body, `Added` text only in the actual one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSpan {
    Equal(String),
    Added(String),
    Removed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    TooLarge { expected: usize, actual: usize },
    Structural(Vec<JsonChange>),
    Textual(Vec<DiffSpan>),
}

/// Compares two bodies. When both parse as JSON the diff is structural;
/// when the structural diff is empty despite the string mismatch (for
/// example a formatting-only difference), or when either body is not JSON,
/// the diff falls back to token-level text.
pub fn diff_report(expected: &str, actual: &str) -> Report {
    if expected.len() > MAX_DIFF_BYTES || actual.len() > MAX_DIFF_BYTES {
        return Report::TooLarge {
            expected: expected.len(),
            actual: actual.len(),
        };
    }

    if let (Ok(expected_json), Ok(actual_json)) = (
        serde_json::from_str::<Value>(expected),
        serde_json::from_str::<Value>(actual),
    ) {
        let changes = json_diff(&expected_json, &actual_json);
        if !changes.is_empty() {
            return Report::Structural(changes);
        }
    }

    Report::Textual(text_diff(expected, actual))
}

/// Structural diff of two JSON values: added, removed and changed fields
/// with their paths. Objects recurse by key, arrays by position.
pub fn json_diff(expected: &Value, actual: &Value) -> Vec<JsonChange> {
    let mut changes = Vec::new();
    walk("$", expected, actual, &mut changes);
    changes
}

fn walk(path: &str, expected: &Value, actual: &Value, out: &mut Vec<JsonChange>) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, expected_value) in expected {
                let child = format!("{}.{}", path, key);
                match actual.get(key) {
                    Some(actual_value) => walk(&child, expected_value, actual_value, out),
                    None => out.push(JsonChange::Removed {
                        path: child,
                        value: expected_value.clone(),
                    }),
                }
            }
            for (key, actual_value) in actual {
                if !expected.contains_key(key) {
                    out.push(JsonChange::Added {
                        path: format!("{}.{}", path, key),
                        value: actual_value.clone(),
                    });
                }
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            for (i, (expected_value, actual_value)) in
                expected.iter().zip(actual.iter()).enumerate()
            {
                walk(
                    &format!("{}[{}]", path, i),
                    expected_value,
                    actual_value,
                    out,
                );
            }
            for (i, expected_value) in expected.iter().enumerate().skip(actual.len()) {
                out.push(JsonChange::Removed {
                    path: format!("{}[{}]", path, i),
                    value: expected_value.clone(),
                });
            }
            for (i, actual_value) in actual.iter().enumerate().skip(expected.len()) {
                out.push(JsonChange::Added {
                    path: format!("{}[{}]", path, i),
                    value: actual_value.clone(),
                });
            }
        }
        _ => {
            if expected != actual {
                out.push(JsonChange::Changed {
                    path: String::from(path),
                    from: expected.clone(),
                    to: actual.clone(),
                });
            }
        }
    }
}

/// Word-granularity diff over a longest common subsequence of tokens.
/// Whitespace runs are tokens of their own so spacing survives rendering.
pub fn text_diff(expected: &str, actual: &str) -> Vec<DiffSpan> {
    let old = tokenize(expected);
    let new = tokenize(actual);

    let mut lcs = vec![vec![0usize; new.len() + 1]; old.len() + 1];
    for i in (0..old.len()).rev() {
        for j in (0..new.len()).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut spans = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < new.len() {
        if old[i] == new[j] {
            append(&mut spans, DiffSpan::Equal(String::from(old[i])));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            append(&mut spans, DiffSpan::Removed(String::from(old[i])));
            i += 1;
        } else {
            append(&mut spans, DiffSpan::Added(String::from(new[j])));
            j += 1;
        }
    }
    while i < old.len() {
        append(&mut spans, DiffSpan::Removed(String::from(old[i])));
        i += 1;
    }
    while j < new.len() {
        append(&mut spans, DiffSpan::Added(String::from(new[j])));
        j += 1;
    }

    spans
}

fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (i, c) in text.char_indices() {
        let whitespace = c.is_whitespace();
        match in_whitespace {
            None => in_whitespace = Some(whitespace),
            Some(previous) if previous != whitespace => {
                tokens.push(&text[start..i]);
                start = i;
                in_whitespace = Some(whitespace);
            }
            _ => {}
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

fn append(spans: &mut Vec<DiffSpan>, next: DiffSpan) {
    if let Some(last) = spans.last_mut() {
        match (last, &next) {
            (DiffSpan::Equal(acc), DiffSpan::Equal(text))
            | (DiffSpan::Added(acc), DiffSpan::Added(text))
            | (DiffSpan::Removed(acc), DiffSpan::Removed(text)) => {
                acc.push_str(text);
                return;
            }
            _ => {}
        }
    }
    spans.push(next);
}

/// Renders a comparison to stderr. Added spans are black on bright green,
/// removed spans bright white on bright red.
pub fn print_diff(expected: &str, actual: &str) {
    match diff_report(expected, actual) {
        Report::TooLarge { expected, actual } => {
            eprintln!(
                "Bodies too large to diff (expected {} bytes, actual {} bytes)",
                expected, actual
            );
        }
        Report::Structural(changes) => {
            for change in &changes {
                match change {
                    JsonChange::Added { path, value } => eprintln!(
                        "{}",
                        format!("+ {}: {}", path, value).black().on_bright_green()
                    ),
                    JsonChange::Removed { path, value } => eprintln!(
                        "{}",
                        format!("- {}: {}", path, value)
                            .bright_white()
                            .on_bright_red()
                    ),
                    JsonChange::Changed { path, from, to } => eprintln!(
                        "~ {}: {} {}",
                        path,
                        from.to_string().bright_white().on_bright_red(),
                        to.to_string().black().on_bright_green()
                    ),
                }
            }
        }
        Report::Textual(spans) => {
            for span in &spans {
                match span {
                    DiffSpan::Equal(text) => eprint!("{}", text),
                    DiffSpan::Added(text) => {
                        eprint!("{}", text.black().on_bright_green())
                    }
                    DiffSpan::Removed(text) => {
                        eprint!("{}", text.bright_white().on_bright_red())
                    }
                }
            }
            eprintln!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn changed_field_is_reported_with_both_values() {
        let changes = json_diff(&json!({"a": 1}), &json!({"a": 2}));
        assert_eq!(
            changes,
            vec![JsonChange::Changed {
                path: String::from("$.a"),
                from: json!(1),
                to: json!(2),
            }]
        );
    }

    #[test]
    fn added_and_removed_fields_are_reported() {
        let changes = json_diff(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 3}));
        assert!(changes.contains(&JsonChange::Removed {
            path: String::from("$.b"),
            value: json!(2),
        }));
        assert!(changes.contains(&JsonChange::Added {
            path: String::from("$.c"),
            value: json!(3),
        }));
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn nested_changes_carry_full_paths() {
        let changes = json_diff(
            &json!({"outer": {"items": [1, 2]}}),
            &json!({"outer": {"items": [1, 5, 9]}}),
        );
        assert_eq!(
            changes,
            vec![
                JsonChange::Changed {
                    path: String::from("$.outer.items[1]"),
                    from: json!(2),
                    to: json!(5),
                },
                JsonChange::Added {
                    path: String::from("$.outer.items[2]"),
                    value: json!(9),
                },
            ]
        );
    }

    #[test]
    fn json_bodies_get_a_structural_report() {
        let report = diff_report("{\"a\":1}", "{\"a\":2}");
        assert!(matches!(report, Report::Structural(_)));
    }

    #[test]
    fn formatting_only_json_mismatch_falls_back_to_text() {
        let report = diff_report("{\"a\": 1}", "{\"a\":1}");
        assert!(matches!(report, Report::Textual(_)));
    }

    #[test]
    fn non_json_bodies_get_a_textual_report() {
        let report = diff_report("some plain text", "some other text");
        match report {
            Report::Textual(spans) => {
                assert!(spans.contains(&DiffSpan::Removed(String::from("plain"))));
                assert!(spans.contains(&DiffSpan::Added(String::from("other"))));
            }
            other => panic!("expected a textual report, got {:?}", other),
        }
    }

    #[test]
    fn oversized_bodies_report_sizes_only() {
        let big = "x".repeat(6000);
        assert_eq!(
            diff_report(&big, "small"),
            Report::TooLarge {
                expected: 6000,
                actual: 5,
            }
        );
    }

    #[test]
    fn equal_texts_yield_a_single_equal_span() {
        let spans = text_diff("same text", "same text");
        assert_eq!(spans, vec![DiffSpan::Equal(String::from("same text"))]);
    }

    #[test]
    fn adjacent_tokens_are_coalesced() {
        let spans = text_diff("a b", "a b c d");
        assert_eq!(
            spans,
            vec![
                DiffSpan::Equal(String::from("a b")),
                DiffSpan::Added(String::from(" c d")),
            ]
        );
    }
}
