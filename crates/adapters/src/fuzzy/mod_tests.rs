// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_output_empty_stdout_is_cancelled() {
    let result = parse_output("", &["ctrl-d".to_string()]);
    assert_eq!(
        result,
        FuzzyResult {
            key: String::new(),
            selection: None,
        }
    );
    assert!(result.is_cancelled());
}

#[test]
fn parse_output_plain_enter_has_empty_key() {
    let result = parse_output("picked-line\n", &["ctrl-d".to_string()]);
    assert_eq!(result.key, "");
    assert_eq!(result.selection.as_deref(), Some("picked-line"));
    assert!(!result.is_cancelled());
}

#[test]
fn parse_output_expected_key_splits_key_and_selection() {
    let result = parse_output("ctrl-d\npicked-line\n", &["ctrl-d".to_string()]);
    assert_eq!(result.key, "ctrl-d");
    assert_eq!(result.selection.as_deref(), Some("picked-line"));
}

#[test]
fn parse_output_expected_key_with_no_selection_line() {
    let result = parse_output("ctrl-d\n", &["ctrl-d".to_string()]);
    assert_eq!(result.key, "ctrl-d");
    assert_eq!(result.selection, None);
}

#[test]
fn parse_output_unexpected_first_line_treated_as_selection() {
    // A line that happens to equal neither an expected key nor be empty is
    // the selection itself (plain Enter with no --expect match).
    let result = parse_output("some-selection\n", &[]);
    assert_eq!(result.key, "");
    assert_eq!(result.selection.as_deref(), Some("some-selection"));
}
