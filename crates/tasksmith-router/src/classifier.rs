// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic task classification.
//!
//! Classifies coding task descriptions by type, scope, and complexity using
//! zero-cost keyword and pattern tables. No LLM pre-call, no network, no
//! latency; identical input always yields an identical classification.

use std::sync::LazyLock;

use regex::Regex;
use strum::Display;

/// The kind of coding task a description asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TaskType {
    Implement,
    Refactor,
    Fix,
    Test,
    Document,
}

/// Overall task complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

/// Keyword groups for task type detection, tested in order; first match wins.
///
/// The broad implement verbs (add/create/write) come last so that more
/// specific phrasings like "add a comment" classify as their specific type.
const TYPE_KEYWORDS: &[(TaskType, &[&str])] = &[
    (TaskType::Refactor, &["refactor", "restructure", "reorganize"]),
    (TaskType::Fix, &["fix", "bug", "error", "issue", "debug"]),
    (TaskType::Test, &["test", "spec", "coverage"]),
    (TaskType::Document, &["document", "comment", "readme", "jsdoc"]),
    (
        TaskType::Implement,
        &["implement", "create", "add", "build", "write"],
    ),
];

/// Patterns that force high complexity regardless of estimated scope.
///
/// The raw pattern text is kept alongside the compiled regex so routing
/// reasons can cite exactly which pattern matched.
static HIGH_RISK_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        r"refactor.*multiple.*files",
        r"architecture.*change",
        r"migrate.*to",
        r"security.*critical",
        r"auth.*system",
        r"payment.*integration",
        r"database.*migration",
    ]
    .iter()
    .map(|p| (Regex::new(p).expect("static pattern"), *p))
    .collect()
});

/// Patterns that indicate cosmetic, low-risk edits.
static LOW_RISK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"add.*comment",
        r"fix.*typo",
        r"rename.*variable",
        r"format.*code",
        r"add.*import",
        r"simple.*crud",
        r"boilerplate",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// File-extension mentions counted when no explicit file-count phrase appears.
static FILE_EXTENSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"\.tsx?", r"\.jsx?", r"\.py", r"\.prisma", r"\.md"]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern"))
        .collect()
});

/// Heuristic task classifier.
///
/// All methods expect the task text already lower-cased by the caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskClassifier;

impl TaskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Detect the task type from ordered keyword groups; defaults to Implement.
    pub fn detect_task_type(&self, task: &str) -> TaskType {
        for (task_type, keywords) in TYPE_KEYWORDS {
            if keywords.iter().any(|w| task.contains(w)) {
                return *task_type;
            }
        }
        TaskType::Implement
    }

    /// Estimate the lines of code the task will touch.
    ///
    /// Explicit scale words win in priority order; cosmetic edits fall back
    /// to a small estimate so trivial tasks stay eligible for the small tier.
    pub fn estimate_lines(&self, task: &str) -> u32 {
        if task.contains("single function") || task.contains("small") {
            30
        } else if task.contains("endpoint") || task.contains("api") {
            80
        } else if task.contains("component") {
            100
        } else if task.contains("feature") {
            200
        } else if task.contains("refactor") {
            300
        } else if task.contains("system") || task.contains("module") {
            500
        } else if LOW_RISK_PATTERNS.iter().any(|p| p.is_match(task)) {
            30
        } else {
            100
        }
    }

    /// Estimate the number of files the task will touch (floor of 1).
    pub fn estimate_files(&self, task: &str) -> u32 {
        if task.contains("single file") {
            return 1;
        }
        if task.contains("multiple files") || task.contains("refactor") {
            return 5;
        }
        if task.contains("system") {
            return 10;
        }

        let count = FILE_EXTENSION_PATTERNS
            .iter()
            .filter(|p| p.is_match(task))
            .count() as u32;
        count.max(1)
    }

    /// Return the first high-risk pattern the task matches, if any.
    pub fn high_risk_match(&self, task: &str) -> Option<&'static str> {
        HIGH_RISK_PATTERNS
            .iter()
            .find(|(regex, _)| regex.is_match(task))
            .map(|(_, raw)| *raw)
    }

    /// Assess complexity: high-risk patterns force High, cosmetic patterns
    /// force Low, otherwise scope thresholds decide.
    pub fn assess_complexity(&self, task: &str, lines: u32, files: u32) -> Complexity {
        if self.high_risk_match(task).is_some() {
            return Complexity::High;
        }
        if LOW_RISK_PATTERNS.iter().any(|p| p.is_match(task)) {
            return Complexity::Low;
        }

        if lines > 300 || files > 3 {
            Complexity::High
        } else if lines > 100 || files > 1 {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TaskClassifier {
        TaskClassifier::new()
    }

    #[test]
    fn detect_implement_type() {
        let c = classifier();
        assert_eq!(c.detect_task_type("implement a login flow"), TaskType::Implement);
        assert_eq!(c.detect_task_type("create the user service"), TaskType::Implement);
        assert_eq!(c.detect_task_type("build payment integration"), TaskType::Implement);
    }

    #[test]
    fn detect_refactor_type() {
        let c = classifier();
        assert_eq!(c.detect_task_type("refactor the parser"), TaskType::Refactor);
        assert_eq!(c.detect_task_type("restructure src layout"), TaskType::Refactor);
    }

    #[test]
    fn detect_fix_type() {
        let c = classifier();
        assert_eq!(c.detect_task_type("fix typo in variable name"), TaskType::Fix);
        assert_eq!(c.detect_task_type("debug the flaky handler"), TaskType::Fix);
    }

    #[test]
    fn detect_test_type() {
        let c = classifier();
        assert_eq!(c.detect_task_type("improve coverage of parser"), TaskType::Test);
    }

    #[test]
    fn detect_document_type_wins_over_add() {
        // "add" is an implement verb, but "comment" is more specific.
        let c = classifier();
        assert_eq!(
            c.detect_task_type("add a comment to the function"),
            TaskType::Document
        );
        assert_eq!(c.detect_task_type("update the readme"), TaskType::Document);
    }

    #[test]
    fn detect_type_defaults_to_implement() {
        let c = classifier();
        assert_eq!(c.detect_task_type("something unusual"), TaskType::Implement);
    }

    #[test]
    fn estimate_lines_scale_words() {
        let c = classifier();
        assert_eq!(c.estimate_lines("a single function please"), 30);
        assert_eq!(c.estimate_lines("new endpoint for users"), 80);
        assert_eq!(c.estimate_lines("a dashboard component"), 100);
        assert_eq!(c.estimate_lines("ship the export feature"), 200);
        assert_eq!(c.estimate_lines("refactor the store"), 300);
        assert_eq!(c.estimate_lines("a billing module"), 500);
        assert_eq!(c.estimate_lines("do the thing"), 100);
    }

    #[test]
    fn estimate_lines_cosmetic_tasks_are_small() {
        let c = classifier();
        assert_eq!(c.estimate_lines("fix typo in variable name"), 30);
        assert_eq!(c.estimate_lines("add a comment to the function"), 30);
    }

    #[test]
    fn estimate_files_explicit_phrases() {
        let c = classifier();
        assert_eq!(c.estimate_files("edit a single file"), 1);
        assert_eq!(c.estimate_files("update multiple files"), 5);
        assert_eq!(c.estimate_files("overhaul the system"), 10);
    }

    #[test]
    fn estimate_files_counts_extension_mentions() {
        let c = classifier();
        assert_eq!(c.estimate_files("update app.tsx and util.py"), 2);
        assert_eq!(c.estimate_files("no files named here"), 1);
    }

    #[test]
    fn high_risk_forces_high_complexity() {
        let c = classifier();
        assert_eq!(
            c.assess_complexity("migrate the database to postgres", 30, 1),
            Complexity::High
        );
        assert!(c.high_risk_match("implement auth system with jwt").is_some());
    }

    #[test]
    fn low_risk_forces_low_complexity() {
        let c = classifier();
        // Scope alone would say Medium (500 lines), cosmetic pattern wins Low.
        assert_eq!(
            c.assess_complexity("fix typo in the docs", 500, 1),
            Complexity::Low
        );
    }

    #[test]
    fn scope_thresholds_decide_otherwise() {
        let c = classifier();
        assert_eq!(c.assess_complexity("plain task", 301, 1), Complexity::High);
        assert_eq!(c.assess_complexity("plain task", 100, 4), Complexity::High);
        assert_eq!(c.assess_complexity("plain task", 101, 1), Complexity::Medium);
        assert_eq!(c.assess_complexity("plain task", 50, 2), Complexity::Medium);
        assert_eq!(c.assess_complexity("plain task", 50, 1), Complexity::Low);
    }

    #[test]
    fn type_display_is_snake_case() {
        assert_eq!(TaskType::Implement.to_string(), "implement");
        assert_eq!(Complexity::High.to_string(), "high");
    }
}
