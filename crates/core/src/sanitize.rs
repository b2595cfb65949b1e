// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Name sanitization shared by session naming and mirror-name derivation.

/// Lowercase `s`, collapse every run of non-`[a-z0-9_-]` characters into a
/// single `-`, trim leading/trailing `-`, and truncate to 50 characters.
///
/// Idempotent: `sanitize_name(sanitize_name(x)) == sanitize_name(x)`.
pub fn sanitize_name(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut last_was_dash = false;
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
            last_was_dash = c == '-';
        } else if !last_was_dash {
            out.push('-');
            last_was_dash = true;
        }
    }
    let trimmed = out.trim_matches('-');
    let truncated: String = trimmed.chars().take(50).collect();
    truncated.trim_matches('-').to_string()
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
