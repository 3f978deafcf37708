// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language detection and syntax validation for generated code.
//!
//! JSON is validated in-process; Python and TypeScript delegate to external
//! toolchains when present. A missing toolchain degrades to a pass with a
//! note rather than failing the generation, so validation quality scales
//! with what the host machine provides.

use std::io::Write as _;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use strum::Display;
use tokio::process::Command;
use tracing::{debug, warn};

/// Language detected from generated code content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Json,
    Unknown,
}

/// Verdict of a syntax check.
#[derive(Debug, Clone)]
pub struct SyntaxVerdict {
    pub passed: bool,
    /// Short description of a hard failure.
    pub error: Option<String>,
    /// Advisory notes and toolchain output; present on passes too.
    pub details: Option<String>,
}

impl SyntaxVerdict {
    fn pass() -> Self {
        Self {
            passed: true,
            error: None,
            details: None,
        }
    }

    fn pass_with(details: impl Into<String>) -> Self {
        Self {
            passed: true,
            error: None,
            details: Some(details.into()),
        }
    }

    fn fail(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            passed: false,
            error: Some(error.into()),
            details,
        }
    }
}

/// Validates syntax of generated code, per detected or declared language.
#[derive(Debug, Clone)]
pub struct SyntaxChecker {
    /// When false, only in-process and regex checks run; no subprocesses.
    toolchain_check: bool,
    toolchain_timeout: Duration,
}

impl Default for SyntaxChecker {
    fn default() -> Self {
        Self {
            toolchain_check: true,
            toolchain_timeout: Duration::from_secs(30),
        }
    }
}

impl SyntaxChecker {
    pub fn new(toolchain_check: bool, toolchain_timeout: Duration) -> Self {
        Self {
            toolchain_check,
            toolchain_timeout,
        }
    }

    /// Detect the language from content markers. TypeScript requires a type
    /// annotation or interface on top of the JS indicators.
    pub fn detect_language(&self, code: &str) -> Language {
        let js_markers = ["import {", "export ", "const ", ": string", ": number"];
        if js_markers.iter().any(|m| code.contains(m)) {
            if code.contains(": string") || code.contains(": number") || code.contains("interface ")
            {
                return Language::TypeScript;
            }
            return Language::JavaScript;
        }

        let py_markers = ["def ", "import ", "from ", "class ", "async def"];
        if py_markers.iter().any(|m| code.contains(m)) {
            return Language::Python;
        }

        let trimmed = code.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Language::Json;
        }

        Language::Unknown
    }

    /// Validate code, auto-detecting the language when none is given.
    ///
    /// Unknown languages pass with a note; there is nothing to check.
    pub async fn check(&self, code: &str, language: Option<Language>) -> SyntaxVerdict {
        let language = language.unwrap_or_else(|| self.detect_language(code));
        debug!(%language, "syntax check");

        match language {
            Language::Json => self.check_json(code),
            Language::Python => self.check_python(code).await,
            Language::TypeScript | Language::JavaScript => self.check_typescript(code).await,
            Language::Unknown => SyntaxVerdict::pass_with("No validator for language: unknown"),
        }
    }

    fn check_json(&self, code: &str) -> SyntaxVerdict {
        match serde_json::from_str::<serde_json::Value>(code) {
            Ok(_) => SyntaxVerdict::pass(),
            Err(e) => SyntaxVerdict::fail(
                format!("JSON error at line {}", e.line()),
                Some(e.to_string()),
            ),
        }
    }

    /// Parse-check Python by delegating to a local interpreter.
    async fn check_python(&self, code: &str) -> SyntaxVerdict {
        if !self.toolchain_check {
            return SyntaxVerdict::pass_with("Toolchain checks disabled");
        }

        let file = match write_temp(code, ".py") {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "could not stage code for python check");
                return SyntaxVerdict::pass_with("Python check skipped: temp file unavailable");
            }
        };

        let mut command = Command::new("python3");
        command
            .args(["-m", "py_compile"])
            .arg(file.path())
            .kill_on_drop(true);

        match tokio::time::timeout(self.toolchain_timeout, command.output()).await {
            Ok(Ok(output)) if output.status.success() => SyntaxVerdict::pass(),
            Ok(Ok(output)) => {
                python_failure(String::from_utf8_lossy(&output.stderr).into_owned())
            }
            // No interpreter on the host is a normal branch.
            Ok(Err(e)) => {
                debug!(error = %e, "python3 unavailable, skipping parse check");
                SyntaxVerdict::pass_with("Python check skipped: python3 not found")
            }
            Err(_) => SyntaxVerdict::fail("Python check timed out", None),
        }
    }

    /// Regex-level advisory checks plus an optional strict tsc compile.
    async fn check_typescript(&self, code: &str) -> SyntaxVerdict {
        let mut issues = Vec::new();
        if code.contains(": any") {
            issues.push("Contains 'any' type - prefer explicit types");
        }
        if code.contains("// TODO") {
            issues.push("Contains TODO comments");
        }
        if code.contains("console.log") {
            issues.push("Contains console.log - remove before production");
        }

        if self.toolchain_check {
            if let Some(verdict) = self.compile_typescript(code).await {
                return verdict;
            }
        }

        if issues.is_empty() {
            SyntaxVerdict::pass()
        } else {
            SyntaxVerdict::pass_with(format!("Warnings: {}", issues.join("; ")))
        }
    }

    /// Run `tsc --noEmit --strict` against the code. Returns `None` when the
    /// compile could not be attempted or found nothing wrong, so advisory
    /// findings still surface.
    async fn compile_typescript(&self, code: &str) -> Option<SyntaxVerdict> {
        let file = match write_temp(code, ".ts") {
            Ok(file) => file,
            Err(e) => {
                warn!(error = %e, "could not stage code for tsc check");
                return None;
            }
        };

        let mut command = Command::new("npx");
        command
            .args(["tsc", "--noEmit", "--strict"])
            .arg(file.path())
            .kill_on_drop(true);

        match tokio::time::timeout(self.toolchain_timeout, command.output()).await {
            Ok(Ok(output)) if output.status.success() => None,
            Ok(Ok(output)) => {
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let details = if stderr.is_empty() { stdout } else { stderr };
                Some(SyntaxVerdict::fail(
                    "TypeScript compilation failed",
                    Some(details),
                ))
            }
            Ok(Err(e)) => {
                debug!(error = %e, "tsc unavailable, skipping compile check");
                None
            }
            Err(_) => Some(SyntaxVerdict::fail("TypeScript compilation timed out", None)),
        }
    }
}

/// Line reference in interpreter tracebacks, e.g. `File "x.py", line 2`.
static PY_ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"line (\d+)").expect("static pattern"));

/// Shape a failed parse into a verdict whose error names the failing line
/// when the interpreter output carries one.
fn python_failure(stderr: String) -> SyntaxVerdict {
    let error = match PY_ERROR_LINE.captures(&stderr) {
        Some(capture) => format!("Python syntax error at line {}", &capture[1]),
        None => "Python syntax error".to_string(),
    };
    SyntaxVerdict::fail(error, Some(stderr))
}

fn write_temp(code: &str, suffix: &str) -> std::io::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile()?;
    file.write_all(code.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checker with subprocess toolchains disabled, so tests are hermetic.
    fn checker() -> SyntaxChecker {
        SyntaxChecker::new(false, Duration::from_secs(30))
    }

    #[test]
    fn detects_typescript() {
        let c = checker();
        assert_eq!(
            c.detect_language("export function f(x: string) {}"),
            Language::TypeScript
        );
        assert_eq!(
            c.detect_language("interface User {}\nexport const x = 1"),
            Language::TypeScript
        );
    }

    #[test]
    fn detects_javascript() {
        let c = checker();
        assert_eq!(c.detect_language("const x = require('y')"), Language::JavaScript);
    }

    #[test]
    fn detects_python() {
        let c = checker();
        assert_eq!(c.detect_language("def hello():\n    pass"), Language::Python);
        assert_eq!(c.detect_language("async def main(): ..."), Language::Python);
    }

    #[test]
    fn detects_json() {
        let c = checker();
        assert_eq!(c.detect_language("{\"a\": 1}"), Language::Json);
        assert_eq!(c.detect_language("  [1, 2, 3]"), Language::Json);
    }

    #[test]
    fn detects_unknown() {
        let c = checker();
        assert_eq!(c.detect_language("SELECT * FROM users"), Language::Unknown);
    }

    #[tokio::test]
    async fn valid_json_passes() {
        let verdict = checker().check("{\"name\": \"test\", \"value\": 123}", None).await;
        assert!(verdict.passed);
        assert!(verdict.error.is_none());
    }

    #[tokio::test]
    async fn json_trailing_comma_fails_with_line() {
        let verdict = checker().check("{\"a\": 1,}", None).await;
        assert!(!verdict.passed);
        assert!(verdict.error.unwrap().contains("line"));

        let verdict = checker().check("{\"a\": 1}", None).await;
        assert!(verdict.passed);
    }

    #[tokio::test]
    async fn invalid_json_fails_with_line() {
        let verdict = checker().check("{\"name\": \n\"oops\"", None).await;
        assert!(!verdict.passed);
        let error = verdict.error.unwrap();
        assert!(error.contains("JSON error at line"), "{error}");
    }

    #[tokio::test]
    async fn unknown_language_passes_with_note() {
        let verdict = checker().check("SELECT 1", None).await;
        assert!(verdict.passed);
        assert!(verdict.details.unwrap().contains("No validator"));
    }

    #[tokio::test]
    async fn typescript_advisory_findings_do_not_fail() {
        let code = "export function f(x: any) {\n  console.log(x) // TODO fix\n}";
        let verdict = checker().check(code, None).await;
        assert!(verdict.passed);
        let details = verdict.details.unwrap();
        assert!(details.contains("'any' type"));
        assert!(details.contains("TODO"));
        assert!(details.contains("console.log"));
    }

    #[tokio::test]
    async fn clean_typescript_passes_without_notes() {
        let code = "export function add(a: number, b: number): number {\n  return a + b\n}";
        let verdict = checker().check(code, None).await;
        assert!(verdict.passed);
        assert!(verdict.details.is_none());
    }

    #[test]
    fn python_failure_names_the_line_from_interpreter_output() {
        let stderr = concat!(
            "  File \"/tmp/snippet.py\", line 2\n",
            "    print(\n",
            "         ^\n",
            "SyntaxError: '(' was never closed\n",
        );
        let verdict = python_failure(stderr.to_string());
        assert!(!verdict.passed);
        assert_eq!(verdict.error.as_deref(), Some("Python syntax error at line 2"));
        assert!(verdict.details.unwrap().contains("SyntaxError"));
    }

    #[test]
    fn python_failure_without_line_reference_still_fails() {
        let verdict = python_failure("Sorry: something went wrong".to_string());
        assert!(!verdict.passed);
        assert_eq!(verdict.error.as_deref(), Some("Python syntax error"));
    }

    #[tokio::test]
    async fn python_passes_with_note_when_toolchain_disabled() {
        let verdict = checker().check("def hello():\n    pass", None).await;
        assert!(verdict.passed);
        assert!(verdict.details.unwrap().contains("disabled"));
    }

    #[tokio::test]
    async fn explicit_language_overrides_detection() {
        // Looks like JSON, but caller says Python with toolchains off.
        let verdict = checker()
            .check("{\"x\": 1}", Some(Language::Python))
            .await;
        assert!(verdict.passed);
    }
}
