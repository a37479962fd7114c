//! Validate command implementation.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use matpack_spec::error::ValidationResult;
use matpack_spec::hash::canonical_plan_hash;
use matpack_spec::validation::{validate_plan, validate_rules};

use super::json_output::{
    print_json, validation_error_to_json, validation_warning_to_json, JsonDiagnostic,
    ValidateOutput,
};
use crate::input::{load_plan, load_rules};

/// Run the validate command.
///
/// # Arguments
/// * `plan_path` - Path to the pack plan JSON file
/// * `rules_path` - Optional conversion rules file to validate alongside
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(plan_path: &str, rules_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(plan_path, rules_path)
    } else {
        run_human(plan_path, rules_path)
    }
}

fn run_human(plan_path: &str, rules_path: Option<&str>) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), plan_path);

    let plan = load_plan(Path::new(plan_path))
        .with_context(|| format!("Failed to load plan file: {}", plan_path))?;

    let plan_hash = canonical_plan_hash(&plan).context("Failed to hash plan")?;
    println!("{} {} ({})", "Plan:".dimmed(), plan.name, &plan_hash[..16]);

    let mut result = validate_plan(&plan);

    if let Some(rules_path) = rules_path {
        println!("{} {}", "Rules:".dimmed(), rules_path);
        let rules = load_rules(Path::new(rules_path))
            .with_context(|| format!("Failed to load rules file: {}", rules_path))?;
        merge(&mut result, validate_rules(&rules));
    }

    print_validation_results(&result);

    if result.is_ok() {
        println!("\n{} Plan is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Plan has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(plan_path: &str, rules_path: Option<&str>) -> Result<ExitCode> {
    let plan = match load_plan(Path::new(plan_path)) {
        Ok(plan) => plan,
        Err(e) => {
            let output = ValidateOutput {
                success: false,
                plan_hash: None,
                errors: vec![JsonDiagnostic::new("INPUT", e.to_string())],
                warnings: vec![],
            };
            print_json(&output);
            return Ok(ExitCode::from(1));
        }
    };

    let plan_hash = canonical_plan_hash(&plan).ok();
    let mut result = validate_plan(&plan);

    if let Some(rules_path) = rules_path {
        match load_rules(Path::new(rules_path)) {
            Ok(rules) => merge(&mut result, validate_rules(&rules)),
            Err(e) => {
                let output = ValidateOutput {
                    success: false,
                    plan_hash,
                    errors: vec![JsonDiagnostic::new("INPUT", e.to_string())],
                    warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
                };
                print_json(&output);
                return Ok(ExitCode::from(1));
            }
        }
    }

    let output = ValidateOutput {
        success: result.is_ok(),
        plan_hash,
        errors: result.errors.iter().map(validation_error_to_json).collect(),
        warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
    };
    print_json(&output);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn merge(into: &mut ValidationResult, other: ValidationResult) {
    for error in other.errors {
        into.add_error(error);
    }
    for warning in other.warnings {
        into.add_warning(warning);
    }
}

/// Print validation results to the console.
pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
