// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Import auditing: generated code may only import packages the target
//! project actually declares.
//!
//! The allow-list is the union of `dependencies` and `devDependencies`
//! from a package manifest. No manifest means no auditing: the check
//! passes with a note instead of guessing.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Verdict of an import audit.
#[derive(Debug, Clone)]
pub struct ImportVerdict {
    pub passed: bool,
    /// Base package names not present in the manifest.
    pub unknown_packages: Vec<String>,
    pub details: Option<String>,
}

static IMPORT_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"from\s+['"]([^'"]+)['"]|import\s+['"]([^'"]+)['"]"#).expect("static pattern")
});

/// Node built-ins that never appear in a manifest.
const NODE_BUILTINS: &[&str] = &["fs", "path", "crypto", "util", "http", "https", "stream"];

/// Audits import specifiers in generated code against a package manifest.
pub struct ImportAuditor {
    allowed_packages: BTreeSet<String>,
}

impl ImportAuditor {
    /// An auditor with no manifest; every check passes with a note.
    pub fn new() -> Self {
        Self {
            allowed_packages: BTreeSet::new(),
        }
    }

    /// Build the allow-list from package manifest JSON text.
    ///
    /// Malformed JSON degrades to an empty allow-list with a warning.
    pub fn from_manifest_str(content: &str) -> Self {
        let allowed_packages = match serde_json::from_str::<serde_json::Value>(content) {
            Ok(manifest) => ["dependencies", "devDependencies"]
                .iter()
                .filter_map(|section| manifest.get(section)?.as_object())
                .flat_map(|table| table.keys().cloned())
                .collect(),
            Err(e) => {
                warn!(error = %e, "malformed package manifest, import audit disabled");
                BTreeSet::new()
            }
        };
        Self { allowed_packages }
    }

    /// Build the allow-list from a manifest path; a read failure degrades
    /// to an empty allow-list with a warning.
    pub fn from_manifest_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_manifest_str(&content),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read package manifest, import audit disabled");
                Self::new()
            }
        }
    }

    /// Check every import specifier in `code` against the allow-list.
    pub fn check(&self, code: &str) -> ImportVerdict {
        if self.allowed_packages.is_empty() {
            return ImportVerdict {
                passed: true,
                unknown_packages: Vec::new(),
                details: Some("No package manifest loaded".to_string()),
            };
        }

        let mut unknown = Vec::new();
        for capture in IMPORT_SPECIFIER.captures_iter(code) {
            let specifier = capture
                .get(1)
                .or_else(|| capture.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let base = base_package(specifier);

            if base.starts_with('.') || base.starts_with("@/") {
                continue;
            }
            let builtin_name = base.strip_prefix("node:").unwrap_or(&base);
            if NODE_BUILTINS.contains(&builtin_name) {
                continue;
            }

            if !self.allowed_packages.contains(&base) && !unknown.contains(&base) {
                unknown.push(base);
            }
        }

        if unknown.is_empty() {
            ImportVerdict {
                passed: true,
                unknown_packages: Vec::new(),
                details: None,
            }
        } else {
            ImportVerdict {
                passed: false,
                details: Some(format!("Not in package manifest: {}", unknown.join(", "))),
                unknown_packages: unknown,
            }
        }
    }
}

impl Default for ImportAuditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce an import specifier to its base package name. Scoped packages
/// keep their first two segments, everything else keeps the first.
fn base_package(specifier: &str) -> String {
    if specifier.starts_with("@/") {
        return specifier.to_string();
    }
    let mut segments = specifier.split('/');
    match segments.next() {
        Some(scope) if scope.starts_with('@') => match segments.next() {
            Some(name) => format!("{scope}/{name}"),
            None => scope.to_string(),
        },
        Some(first) => first.to_string(),
        None => specifier.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "name": "demo",
        "dependencies": {
            "left-pad": "^1.3.0",
            "@prisma/client": "^5.0.0"
        },
        "devDependencies": {
            "vitest": "^1.0.0"
        }
    }"#;

    fn auditor() -> ImportAuditor {
        ImportAuditor::from_manifest_str(MANIFEST)
    }

    #[test]
    fn declared_packages_pass() {
        let verdict = auditor().check("import { pad } from 'left-pad'");
        assert!(verdict.passed, "{:?}", verdict.details);
    }

    #[test]
    fn dev_dependencies_count_as_declared() {
        assert!(auditor().check("import { describe } from 'vitest'").passed);
    }

    #[test]
    fn scoped_packages_resolve_to_scope_and_name() {
        let verdict = auditor().check("import { PrismaClient } from '@prisma/client'");
        assert!(verdict.passed, "{:?}", verdict.details);
        // Subpath imports resolve to the same base.
        assert!(auditor()
            .check("import type { Tenant } from '@prisma/client/runtime'")
            .passed);
    }

    #[test]
    fn undeclared_package_fails_and_is_named() {
        let verdict = auditor().check("import pad from 'right-pad'");
        assert!(!verdict.passed);
        assert_eq!(verdict.unknown_packages, vec!["right-pad".to_string()]);
        assert!(verdict.details.unwrap().contains("right-pad"));
    }

    #[test]
    fn relative_and_alias_imports_always_pass() {
        let code = "import { a } from './local'\nimport { b } from '../up'\nimport { c } from '@/lib/db'";
        assert!(auditor().check(code).passed);
    }

    #[test]
    fn node_builtins_always_pass() {
        let code = "import fs from 'fs'\nimport { join } from 'node:path'";
        assert!(auditor().check(code).passed);
    }

    #[test]
    fn side_effect_import_form_is_audited_too() {
        let verdict = auditor().check("import 'unstyled-css-reset'");
        assert!(!verdict.passed);
        assert_eq!(verdict.unknown_packages, vec!["unstyled-css-reset".to_string()]);
    }

    #[test]
    fn duplicate_unknowns_are_reported_once() {
        let code = "import a from 'mystery'\nimport b from 'mystery/sub'";
        let verdict = auditor().check(code);
        assert_eq!(verdict.unknown_packages.len(), 1);
    }

    #[test]
    fn no_manifest_passes_with_note() {
        let verdict = ImportAuditor::new().check("import x from 'anything'");
        assert!(verdict.passed);
        assert!(verdict.details.unwrap().contains("No package manifest"));
    }

    #[test]
    fn malformed_manifest_degrades_to_no_audit() {
        let auditor = ImportAuditor::from_manifest_str("{ not json");
        assert!(auditor.check("import x from 'anything'").passed);
    }

    #[test]
    fn unreadable_manifest_path_degrades_to_no_audit() {
        let auditor = ImportAuditor::from_manifest_path(Path::new("/nonexistent/package.json"));
        assert!(auditor.check("import x from 'anything'").passed);
    }
}
