// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Output sanitization: strips formatting artifacts and rejects unsafe or
//! malformed generated text.
//!
//! The sanitizer is the one hard gate in the pipeline: a non-clean verdict
//! is terminal for a generation attempt. Every check runs independently so
//! a caller sees all violations, not just the first.

use std::sync::LazyLock;

use regex::Regex;

/// Verdict of a sanitization check.
#[derive(Debug, Clone)]
pub struct SanitizeVerdict {
    /// True iff no violations were found.
    pub is_clean: bool,
    /// One human-readable entry per finding, in scan order.
    pub violations: Vec<String>,
}

/// Markers that must never appear in deliverable output: terminal control
/// artifacts, null bytes, conversational filler, stray explanation sections.
static FORBIDDEN_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\^R", "terminal control sequence ^R"),
        (r"\^M", "terminal control sequence ^M"),
        (r"\x00", "null byte"),
        (r"(?m)^Here is", "conversational prefix 'Here is'"),
        (r"(?m)^Sure[,!]", "conversational prefix 'Sure'"),
        (r"Explanation:", "stray 'Explanation:' section"),
    ]
    .iter()
    .map(|(p, label)| (Regex::new(p).expect("static pattern"), *label))
    .collect()
});

/// Leading fence line: ``` optionally tagged with a language name.
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[a-zA-Z]*[ \t]*\r?\n?").expect("static pattern"));

/// Trailing closing fence on its own line.
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```[ \t]*$").expect("static pattern"));

/// Strips markdown fences and validates generated output.
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputSanitizer;

impl OutputSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Remove leading fence delimiters (with optional language tags),
    /// matching trailing delimiters, and surrounding whitespace.
    ///
    /// Strips to a fixed point so nested wrapping fences unwrap fully;
    /// idempotent by construction. Interior fences are content and stay.
    pub fn strip_formatting(&self, text: &str) -> String {
        let mut current = text.trim().to_string();
        loop {
            let without_open = OPENING_FENCE.replace(&current, "");
            let without_close = CLOSING_FENCE.replace(&without_open, "");
            let next = without_close.trim();
            if next == current {
                return current;
            }
            current = next.to_string();
        }
    }

    /// Scan for forbidden markers, control characters, and emptiness.
    ///
    /// All checks are evaluated independently (no short-circuit) and run in
    /// time linear in the text length.
    pub fn check(&self, text: &str) -> SanitizeVerdict {
        let mut violations = Vec::new();

        for (pattern, label) in FORBIDDEN_PATTERNS.iter() {
            if pattern.is_match(text) {
                violations.push(format!("Forbidden pattern detected: {label}"));
            }
        }

        if text
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
        {
            violations.push("Control characters detected".to_string());
        }

        if text.trim().is_empty() {
            violations.push("Empty output".to_string());
        }

        SanitizeVerdict {
            is_clean: violations.is_empty(),
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> OutputSanitizer {
        OutputSanitizer::new()
    }

    #[test]
    fn strips_tagged_fences() {
        let s = sanitizer();
        assert_eq!(s.strip_formatting("```ts\n// hi\n```"), "// hi");
        assert_eq!(s.strip_formatting("```python\nprint(1)\n```"), "print(1)");
    }

    #[test]
    fn strips_untagged_fences() {
        let s = sanitizer();
        assert_eq!(s.strip_formatting("```\nlet x = 1\n```"), "let x = 1");
    }

    #[test]
    fn strips_nested_fences_fully() {
        let s = sanitizer();
        assert_eq!(s.strip_formatting("```\n```ts\ncode\n```\n```"), "code");
    }

    #[test]
    fn strip_is_idempotent() {
        let s = sanitizer();
        for input in [
            "```ts\n// hi\n```",
            "plain text",
            "  surrounded by space  ",
            "```\n```",
            "```\n```ts\ncode\n```\n```",
            "",
        ] {
            let once = s.strip_formatting(input);
            let twice = s.strip_formatting(&once);
            assert_eq!(once, twice, "strip must be idempotent for {input:?}");
        }
    }

    #[test]
    fn strip_leaves_interior_fences_alone() {
        let s = sanitizer();
        let input = "```md\nusage:\n```\nfoo()\n```\nmore text\n```";
        let stripped = s.strip_formatting(input);
        assert!(stripped.contains("```"), "interior fences belong to the content");
        assert!(!stripped.starts_with("```md"));
    }

    #[test]
    fn null_byte_is_a_violation() {
        let verdict = sanitizer().check("let x = 1\0");
        assert!(!verdict.is_clean);
        assert!(verdict.violations.iter().any(|v| v.contains("null byte")));
    }

    #[test]
    fn caret_r_is_a_violation() {
        let verdict = sanitizer().check("history^Rsearch");
        assert!(!verdict.is_clean);
        assert!(!verdict.violations.is_empty());
    }

    #[test]
    fn conversational_prefixes_are_violations() {
        let s = sanitizer();
        assert!(!s.check("Here is the function you asked for").is_clean);
        assert!(!s.check("Sure, let me write that").is_clean);
        assert!(!s.check("code()\n\nExplanation: this works by").is_clean);
    }

    #[test]
    fn here_is_mid_line_is_fine() {
        // Only line-leading conversational prefixes are flagged.
        let verdict = sanitizer().check("// see docs: Here is relevant context");
        assert!(verdict.is_clean, "{:?}", verdict.violations);
    }

    #[test]
    fn control_characters_are_violations() {
        let verdict = sanitizer().check("bell\x07sound");
        assert!(!verdict.is_clean);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("Control characters")));
    }

    #[test]
    fn tab_newline_carriage_return_are_allowed() {
        let verdict = sanitizer().check("line one\n\tindented\r\nline two");
        assert!(verdict.is_clean);
    }

    #[test]
    fn empty_and_whitespace_only_fail() {
        let s = sanitizer();
        assert!(!s.check("").is_clean);
        assert!(!s.check("   \n\t  ").is_clean);
    }

    #[test]
    fn all_violations_are_reported_not_just_first() {
        let verdict = sanitizer().check("Here is code\0with^Rartifacts");
        assert!(verdict.violations.len() >= 3, "{:?}", verdict.violations);
    }

    #[test]
    fn clean_code_passes() {
        let verdict = sanitizer().check("export function add(a: number, b: number) {\n  return a + b\n}");
        assert!(verdict.is_clean);
        assert!(verdict.violations.is_empty());
    }
}
