// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly: task context and classification rendered into the
//! sectioned prompt the local models are tuned for.

use tasksmith_core::TaskContext;
use tasksmith_router::TaskAnalysis;

/// Per-file content cap inside the RELEVANT FILES section, in characters.
const FILE_EXCERPT_CHARS: usize = 2000;

/// Assemble the generation prompt from context sections, the task text,
/// and constraint lines derived from the routing analysis.
///
/// Context sections appear only when their material is present; the TASK
/// and CONSTRAINTS sections are always emitted. Files render in name order
/// so the same context always yields the same prompt.
pub fn build_prompt(task: &str, context: Option<&TaskContext>, analysis: &TaskAnalysis) -> String {
    let mut parts = Vec::new();

    if let Some(context) = context {
        if let Some(policy) = &context.policy_doc {
            parts.push(format!("## PROJECT CONTEXT\n{policy}"));
        }

        if !context.files.is_empty() {
            parts.push("## RELEVANT FILES".to_string());
            for (name, content) in &context.files {
                parts.push(format!("\n### {name}\n{}", excerpt(content)));
            }
        }

        if let Some(tree) = &context.tree {
            parts.push(format!("## DIRECTORY STRUCTURE\n{tree}"));
        }
    }

    parts.push(format!("## TASK\n{task}"));
    parts.push("## CONSTRAINTS".to_string());
    parts.push(format!("- Task type: {}", analysis.task_type));
    parts.push(format!("- Expected size: ~{} lines", analysis.estimated_lines));
    parts.push(format!("- Complexity: {}", analysis.complexity));

    parts.join("\n")
}

/// First [`FILE_EXCERPT_CHARS`] characters of a file, on char boundaries.
fn excerpt(content: &str) -> &str {
    match content.char_indices().nth(FILE_EXCERPT_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
