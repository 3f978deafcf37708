// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project-contract compliance checking for generated code.
//!
//! A [`ComplianceChecker`] is built once from a policy document (domain
//! model entities, API contract routes) and validates generated text against
//! a small set of rules. Policy parsing is best-effort: a missing or
//! unreadable document degrades to an empty policy, never a construction
//! failure. Compliance is decided by violations alone; warnings are
//! advisory and never block.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Verdict of a compliance check.
#[derive(Debug, Clone)]
pub struct ComplianceVerdict {
    /// True iff `violations` is empty. Warnings never affect this.
    pub is_compliant: bool,
    pub violations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Rules extracted from a policy document. Immutable after construction;
/// rebuilding requires constructing a new checker.
#[derive(Debug, Clone, Default)]
pub struct CompliancePolicy {
    /// Known domain entity names (capitalized identifiers from the
    /// "Domain Model" section).
    pub entities: BTreeSet<String>,
    /// (HTTP method, path) pairs from the "API Contract" section.
    pub api_routes: Vec<(String, String)>,
}

/// Default denylist: phrases from an unrelated product domain that must
/// never leak into generated code for this project.
const DEFAULT_FORBIDDEN_DOMAINS: &[&str] = &[
    r"\bsolar\s+panel",
    r"\bsolar\s+energy",
    r"\benergy\s+tracking",
    r"\bweather\s+data",
];

static DATA_ACCESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"prisma\.(\w+)\.").expect("static pattern"));

static TENANT_FROM_REQUEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"body\.tenantId|request\.\S*tenantId").expect("static pattern"));

static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"password\s*=\s*["'][^"']+["']"#,
        r#"secret\s*=\s*["'][^"']+["']"#,
        r#"api[_-]?key\s*=\s*["'][^"']+["']"#,
    ]
    .iter()
    .map(|p| case_insensitive(p))
    .collect()
});

static API_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(GET|POST|PUT|DELETE|PATCH)\s+\|?\s*(/[^\s|]+)").expect("static pattern")
});

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z]\w*)\b").expect("static pattern"));

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("static pattern")
}

/// Validates generated code against project-contract rules.
pub struct ComplianceChecker {
    policy: CompliancePolicy,
    forbidden_domains: Vec<(Regex, String)>,
}

impl ComplianceChecker {
    /// A checker with an empty policy and the default domain denylist.
    pub fn new() -> Self {
        Self {
            policy: CompliancePolicy::default(),
            forbidden_domains: default_forbidden_domains(),
        }
    }

    /// Build a checker from policy document text. Never fails: sections
    /// that cannot be located simply contribute nothing to the policy.
    pub fn from_policy_document(content: &str) -> Self {
        Self {
            policy: parse_policy(content),
            forbidden_domains: default_forbidden_domains(),
        }
    }

    /// Build a checker from a policy document path.
    ///
    /// A read failure degrades to an empty policy with a warning; the
    /// checker still runs, it just finds nothing to flag.
    pub fn from_policy_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_policy_document(&content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read policy document, using empty policy");
                Self::new()
            }
        }
    }

    /// Replace the domain denylist with a configured phrase list.
    ///
    /// Phrases that fail to compile as patterns are skipped with a warning.
    /// An empty list keeps the built-in defaults.
    pub fn with_forbidden_domains(mut self, phrases: Vec<String>) -> Self {
        if phrases.is_empty() {
            return self;
        }
        self.forbidden_domains = phrases
            .into_iter()
            .filter_map(|phrase| {
                match RegexBuilder::new(&phrase).case_insensitive(true).build() {
                    Ok(regex) => Some((regex, phrase)),
                    Err(e) => {
                        warn!(%phrase, error = %e, "invalid forbidden-domain pattern, skipping");
                        None
                    }
                }
            })
            .collect();
        self
    }

    /// The extracted policy (entities and API routes).
    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Validate generated code against all rules. Every rule is evaluated
    /// independently; findings accumulate rather than short-circuit.
    pub fn check(&self, code: &str) -> ComplianceVerdict {
        let mut violations = Vec::new();
        let mut warnings = Vec::new();

        // Rule 1: no invented domain entities in data-access calls.
        if !self.policy.entities.is_empty() {
            let known: BTreeSet<String> = self
                .policy
                .entities
                .iter()
                .map(|e| e.to_lowercase())
                .collect();
            for capture in DATA_ACCESS.captures_iter(code) {
                let name = &capture[1];
                if !known.contains(&name.to_lowercase()) {
                    violations.push(format!("Unknown model reference: prisma.{name}"));
                }
            }
        }

        // Rule 2: multi-tenant field must come from session context, not
        // client-controlled input.
        if code.contains("tenantId") && TENANT_FROM_REQUEST.is_match(code) {
            violations.push(
                "SECURITY: tenantId must come from session, not client request".to_string(),
            );
        }

        // Rule 3: no terminology from unrelated product domains.
        for (pattern, phrase) in &self.forbidden_domains {
            if pattern.is_match(code) {
                violations.push(format!(
                    "Invalid domain reference: matches '{phrase}'"
                ));
            }
        }

        // Rule 4: async code without error handling is advisory only.
        if code.contains("async")
            && code.contains("await")
            && !code.contains("try")
            && !code.contains("catch")
        {
            warnings.push(
                "Async code without try/catch - consider adding error handling".to_string(),
            );
        }

        // Rule 5: no hardcoded secrets.
        for pattern in SECRET_PATTERNS.iter() {
            if pattern.is_match(code) {
                violations.push(
                    "SECURITY: Hardcoded secret detected - use environment variables".to_string(),
                );
            }
        }

        // Rule 6: NextResponse needs its canonical import.
        if code.contains("NextResponse")
            && code.contains("import")
            && !code.contains("from 'next/server'")
            && !code.contains("from \"next/server\"")
        {
            warnings.push("NextResponse should be imported from 'next/server'".to_string());
        }

        ComplianceVerdict {
            is_compliant: violations.is_empty(),
            violations,
            warnings,
        }
    }
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn default_forbidden_domains() -> Vec<(Regex, String)> {
    DEFAULT_FORBIDDEN_DOMAINS
        .iter()
        .map(|p| (case_insensitive(p), p.to_string()))
        .collect()
}

/// Extract policy rules from a policy document. Each extraction step is
/// optional; a section that is absent or unparseable is a normal branch.
fn parse_policy(content: &str) -> CompliancePolicy {
    let mut policy = CompliancePolicy::default();

    if let Some(section) = find_section(content, "domain model") {
        for capture in CAPITALIZED_WORD.captures_iter(&section) {
            policy.entities.insert(capture[1].to_string());
        }
    }

    if let Some(section) = find_section(content, "api contract") {
        for capture in API_ROUTE.captures_iter(&section) {
            policy
                .api_routes
                .push((capture[1].to_string(), capture[2].to_string()));
        }
    }

    // "Non-Negotiable" sections are recognized but carry prose rules the
    // checker does not yet interpret.
    let _ = find_section(content, "non-negotiable");

    policy
}

/// Find the body of the first `##` header whose text contains `needle`
/// (case-insensitive), up to the next `##` header or end of document.
fn find_section(content: &str, needle: &str) -> Option<String> {
    let needle_lower = needle.to_lowercase();
    let mut in_section = false;
    let mut body = String::new();

    for line in content.lines() {
        if line.trim_start().starts_with("##") {
            if in_section {
                break;
            }
            if line.to_lowercase().contains(&needle_lower) {
                in_section = true;
            }
            continue;
        }
        if in_section {
            body.push_str(line);
            body.push('\n');
        }
    }

    if in_section { Some(body) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY_DOC: &str = r#"
# GitKeeper

## 1. Domain Model

model Tenant
model Project
model Task
model User

## 2. API Contract

| GET | /api/projects |
| POST | /api/projects |
| DELETE | /api/projects/:id |

## 3. Non-Negotiable Rules

- tenantId always comes from the session.
"#;

    #[test]
    fn parses_entities_and_routes() {
        let checker = ComplianceChecker::from_policy_document(POLICY_DOC);
        let policy = checker.policy();
        assert!(policy.entities.contains("Tenant"));
        assert!(policy.entities.contains("Project"));
        assert!(policy.entities.contains("User"));
        assert!(policy
            .api_routes
            .contains(&("GET".to_string(), "/api/projects".to_string())));
        assert!(policy
            .api_routes
            .contains(&("DELETE".to_string(), "/api/projects/:id".to_string())));
    }

    #[test]
    fn missing_sections_degrade_to_empty_policy() {
        let checker = ComplianceChecker::from_policy_document("# Just a readme\n\nNothing here.");
        assert!(checker.policy().entities.is_empty());
        assert!(checker.policy().api_routes.is_empty());
        // And the checker still runs.
        assert!(checker.check("const x = 1").is_compliant);
    }

    #[test]
    fn unreadable_path_degrades_to_empty_policy() {
        let checker =
            ComplianceChecker::from_policy_path(Path::new("/nonexistent/gitkeeper.md"));
        assert!(checker.policy().entities.is_empty());
    }

    #[test]
    fn unknown_model_reference_is_a_violation() {
        let checker = ComplianceChecker::from_policy_document(POLICY_DOC);
        let verdict = checker.check("const rows = await prisma.invoice.findMany()");
        assert!(!verdict.is_compliant);
        assert!(verdict
            .violations
            .iter()
            .any(|v| v.contains("prisma.invoice")));
    }

    #[test]
    fn known_model_reference_passes() {
        let checker = ComplianceChecker::from_policy_document(POLICY_DOC);
        let verdict = checker.check("const rows = await prisma.project.findMany()");
        assert!(verdict.is_compliant, "{:?}", verdict.violations);
    }

    #[test]
    fn model_rule_is_skipped_without_policy() {
        let checker = ComplianceChecker::new();
        let verdict = checker.check("await prisma.anything.findMany()");
        assert!(verdict.is_compliant);
    }

    #[test]
    fn tenant_id_from_body_is_exactly_one_security_violation() {
        let checker = ComplianceChecker::new();
        let verdict = checker.check("const { tenantId } = body.tenantId");
        let session_violations: Vec<_> = verdict
            .violations
            .iter()
            .filter(|v| v.contains("session"))
            .collect();
        assert_eq!(session_violations.len(), 1);
    }

    #[test]
    fn tenant_id_from_session_passes() {
        let checker = ComplianceChecker::new();
        let verdict =
            checker.check("where: { tenantId: session.user.tenantId }");
        assert!(verdict.is_compliant, "{:?}", verdict.violations);
    }

    #[test]
    fn forbidden_domain_phrases_are_violations() {
        let checker = ComplianceChecker::new();
        let verdict = checker.check("// fetch solar panel output and weather data");
        assert!(!verdict.is_compliant);
        assert_eq!(verdict.violations.len(), 2);
    }

    #[test]
    fn forbidden_domains_are_configurable() {
        let checker = ComplianceChecker::new()
            .with_forbidden_domains(vec![r"\bcrypto\s+wallet".to_string()]);
        assert!(!checker.check("connect the crypto wallet").is_compliant);
        // Default solar phrases no longer apply.
        assert!(checker.check("solar panel telemetry").is_compliant);
    }

    #[test]
    fn async_without_try_catch_is_warning_only() {
        let checker = ComplianceChecker::new();
        let verdict = checker.check("async function f() { await g() }");
        assert!(verdict.is_compliant);
        assert_eq!(verdict.warnings.len(), 1);
    }

    #[test]
    fn async_with_try_catch_has_no_warning() {
        let checker = ComplianceChecker::new();
        let verdict =
            checker.check("async function f() { try { await g() } catch (e) {} }");
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn hardcoded_secrets_are_violations() {
        let checker = ComplianceChecker::new();
        let verdict = checker.check(r#"const password = "admin123""#);
        assert!(!verdict.is_compliant);
        assert!(verdict.violations.iter().any(|v| v.contains("secret")));

        let verdict = checker.check(r#"API_KEY = "sk-1234567890abcdef""#);
        assert!(!verdict.is_compliant);
    }

    #[test]
    fn next_response_without_import_path_is_warning() {
        let checker = ComplianceChecker::new();
        let code = "import { NextResponse } from 'next/sever'\nreturn NextResponse.json({})";
        let verdict = checker.check(code);
        assert!(verdict.is_compliant);
        assert_eq!(verdict.warnings.len(), 1);
    }

    #[test]
    fn next_response_with_proper_import_passes() {
        let checker = ComplianceChecker::new();
        let code = "import { NextResponse } from 'next/server'\nreturn NextResponse.json({})";
        let verdict = checker.check(code);
        assert!(verdict.warnings.is_empty());
    }

    #[test]
    fn violations_accumulate_across_rules() {
        let checker = ComplianceChecker::from_policy_document(POLICY_DOC);
        let code = r#"
const secret = "hunter2"
await prisma.widget.create({ data: { tenantId: body.tenantId } })
// track solar energy here
"#;
        let verdict = checker.check(code);
        assert!(verdict.violations.len() >= 4, "{:?}", verdict.violations);
    }
}
