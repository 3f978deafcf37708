// SPDX-FileCopyrightText: 2026 Tasksmith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tasksmith - local-first code generation engine.
//!
//! Binary entry point: loads configuration, initializes logging, and
//! dispatches to the subcommands.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tasksmith_config::TasksmithConfig;
use tasksmith_core::{ModelTier, TaskContext};
use tasksmith_engine::Engine;
use tasksmith_validate::{ComplianceChecker, ImportAuditor, OutputSanitizer, SyntaxChecker};

/// Tasksmith - local-first code generation engine.
#[derive(Parser, Debug)]
#[command(name = "tasksmith", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a task and show the routing decision without generating.
    Analyze {
        /// Task description.
        task: String,
    },
    /// Generate code for a task and print it to stdout.
    Generate {
        /// Task description.
        task: String,
        /// Context file to include in the prompt (repeatable).
        #[arg(long = "file")]
        files: Vec<PathBuf>,
        /// Policy document to include as project context.
        #[arg(long)]
        policy: Option<PathBuf>,
        /// Force a specific tier (local_small, local_large, external).
        #[arg(long, value_parser = parse_tier)]
        tier: Option<ModelTier>,
    },
    /// Validate a code file: syntax, compliance, and import rules.
    Check {
        /// File to validate.
        file: PathBuf,
        /// Package manifest to audit imports against.
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Probe the local model server and report availability.
    Doctor,
}

fn parse_tier(s: &str) -> Result<ModelTier, String> {
    ModelTier::from_str(s)
        .map_err(|_| format!("unknown tier '{s}' (expected local_small, local_large, external)"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match tasksmith_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            tasksmith_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config);

    match cli.command {
        Commands::Analyze { task } => analyze(&config, &task),
        Commands::Generate {
            task,
            files,
            policy,
            tier,
        } => generate(config, &task, &files, policy.as_deref(), tier).await,
        Commands::Check { file, manifest } => check(&config, &file, manifest.as_deref()).await,
        Commands::Doctor => doctor(config).await,
    }
}

/// RUST_LOG wins over the configured level.
fn init_logging(config: &TasksmithConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.engine.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn analyze(config: &TasksmithConfig, task: &str) -> ExitCode {
    let router = tasksmith_router::TaskRouter::new(config.routing.clone());
    let analysis = router.analyze(task, None);

    println!("task type:        {}", analysis.task_type);
    println!("complexity:       {}", analysis.complexity);
    println!("estimated lines:  ~{}", analysis.estimated_lines);
    println!("files affected:   {}", analysis.files_affected);
    println!("recommended tier: {}", analysis.recommended_tier);
    println!("reason:           {}", analysis.reason);
    ExitCode::SUCCESS
}

async fn generate(
    config: TasksmithConfig,
    task: &str,
    files: &[PathBuf],
    policy: Option<&Path>,
    tier: Option<ModelTier>,
) -> ExitCode {
    let context = match build_context(files, policy) {
        Ok(context) => context,
        Err(message) => {
            eprintln!("tasksmith: {message}");
            return ExitCode::FAILURE;
        }
    };

    let engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("tasksmith: {e}");
            return ExitCode::FAILURE;
        }
    };

    let context_ref = if context.is_empty() {
        None
    } else {
        Some(&context)
    };
    let outcome = engine.generate(task, context_ref, tier).await;

    if outcome.succeeded {
        println!("{}", outcome.text);
        eprintln!(
            "tasksmith: generated with {} ({} tokens)",
            outcome.model, outcome.tokens_consumed
        );
        ExitCode::SUCCESS
    } else {
        eprintln!(
            "tasksmith: generation failed: {}",
            outcome.error.unwrap_or_else(|| "unknown error".to_string())
        );
        ExitCode::FAILURE
    }
}

fn build_context(files: &[PathBuf], policy: Option<&Path>) -> Result<TaskContext, String> {
    let mut context = TaskContext::new();

    if let Some(path) = policy {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read policy document {}: {e}", path.display()))?;
        context.policy_doc = Some(content);
    }

    for path in files {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("could not read context file {}: {e}", path.display()))?;
        context.files.insert(path.display().to_string(), content);
    }

    Ok(context)
}

async fn check(config: &TasksmithConfig, file: &Path, manifest: Option<&Path>) -> ExitCode {
    let code = match std::fs::read_to_string(file) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tasksmith: could not read {}: {e}", file.display());
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;

    let verdict = OutputSanitizer::new().check(&code);
    println!(
        "sanitize: {}",
        if verdict.is_clean { "ok" } else { "FAIL" }
    );
    for violation in &verdict.violations {
        println!("  violation: {violation}");
    }
    failed |= !verdict.is_clean;

    let syntax = SyntaxChecker::new(
        config.syntax.toolchain_check,
        Duration::from_secs(config.syntax.toolchain_timeout_secs),
    );
    let language = syntax.detect_language(&code);
    let verdict = syntax.check(&code, Some(language)).await;
    println!("language: {language}");
    println!("syntax:   {}", if verdict.passed { "ok" } else { "FAIL" });
    if let Some(error) = &verdict.error {
        println!("  {error}");
    }
    if let Some(details) = &verdict.details {
        println!("  {details}");
    }
    failed |= !verdict.passed;

    let mut compliance = match &config.compliance.policy_path {
        Some(path) => ComplianceChecker::from_policy_path(Path::new(path)),
        None => ComplianceChecker::new(),
    };
    compliance = compliance.with_forbidden_domains(config.compliance.forbidden_domains.clone());
    let verdict = compliance.check(&code);
    println!(
        "compliance: {}",
        if verdict.is_compliant { "ok" } else { "FAIL" }
    );
    for violation in &verdict.violations {
        println!("  violation: {violation}");
    }
    for warning in &verdict.warnings {
        println!("  warning: {warning}");
    }
    failed |= !verdict.is_compliant;

    if let Some(path) = manifest {
        let auditor = ImportAuditor::from_manifest_path(path);
        let verdict = auditor.check(&code);
        println!("imports:  {}", if verdict.passed { "ok" } else { "FAIL" });
        if let Some(details) = &verdict.details {
            println!("  {details}");
        }
        failed |= !verdict.passed;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn doctor(config: TasksmithConfig) -> ExitCode {
    let engine = match Engine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("tasksmith: {e}");
            return ExitCode::FAILURE;
        }
    };

    let health = engine.health_check().await;
    let config = engine.config();

    let mark = |ok: bool| if ok { "ok" } else { "MISSING" };
    println!("backend:     {} ({})", mark(health.backend_reachable), config.models.endpoint);
    println!("small model: {} ({})", mark(health.small_available), config.models.small_model);
    println!("large model: {} ({})", mark(health.large_available), config.models.large_model);
    println!(
        "external:    {} ({})",
        if health.external_available { "enabled" } else { "disabled" },
        config.routing.external_provider
    );
    if !health.models.is_empty() {
        println!("models served:");
        for model in &health.models {
            println!("  {model}");
        }
    }

    if health.backend_reachable {
        ExitCode::SUCCESS
    } else {
        eprintln!("tasksmith: model server unreachable, start it with: ollama serve");
        ExitCode::FAILURE
    }
}
