//! Convert command implementation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use matpack_spec::convert::convert_material;
use matpack_spec::validation::validate_rules;

use super::json_output::{
    print_json, validation_error_to_json, validation_warning_to_json, ConvertOutput,
    JsonDiagnostic,
};
use super::validate::print_validation_results;
use crate::input::{load_material, load_rules};

/// Run the convert command.
///
/// # Arguments
/// * `rules_path` - Path to the conversion rules JSON file
/// * `material_path` - Path to the material document to convert
/// * `output_path` - Where to write the converted material (default:
///   `<material stem>.converted.json` next to the input)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 on failure
pub fn run(
    rules_path: &str,
    material_path: &str,
    output_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(rules_path, material_path, output_path)
    } else {
        run_human(rules_path, material_path, output_path)
    }
}

fn run_human(rules_path: &str, material_path: &str, output_path: Option<&str>) -> Result<ExitCode> {
    println!("{} {}", "Converting:".cyan().bold(), material_path);

    let rules = load_rules(Path::new(rules_path))
        .with_context(|| format!("Failed to load rules file: {}", rules_path))?;

    let validation = validate_rules(&rules);
    print_validation_results(&validation);
    if !validation.is_ok() {
        println!(
            "\n{} Rules have {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let material = load_material(Path::new(material_path))
        .with_context(|| format!("Failed to load material file: {}", material_path))?;

    if material.shader != rules.source_shader {
        println!(
            "  {} material '{}' uses shader '{}', rules expect '{}'",
            "!".yellow(),
            material.name,
            material.shader,
            rules.source_shader
        );
    }

    let (converted, stats) = convert_material(&rules, &material);
    let out_path = resolved_output_path(material_path, output_path);
    write_material_json(&converted.to_json_pretty()?, &out_path)?;

    println!(
        "  {} {} ({} -> {})",
        "wrote".green(),
        out_path.display(),
        rules.source_shader,
        rules.dest_shader
    );
    println!(
        "\n{} Copied {} propert{}, skipped {}",
        "SUCCESS".green().bold(),
        stats.copied,
        if stats.copied == 1 { "y" } else { "ies" },
        stats.skipped
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(rules_path: &str, material_path: &str, output_path: Option<&str>) -> Result<ExitCode> {
    let failure = |errors: Vec<JsonDiagnostic>, warnings: Vec<JsonDiagnostic>| {
        let output = ConvertOutput {
            success: false,
            output_path: None,
            copied: 0,
            skipped: 0,
            errors,
            warnings,
        };
        print_json(&output);
        Ok(ExitCode::from(1))
    };

    let rules = match load_rules(Path::new(rules_path)) {
        Ok(rules) => rules,
        Err(e) => return failure(vec![JsonDiagnostic::new("INPUT", e.to_string())], vec![]),
    };

    let validation = validate_rules(&rules);
    let mut warnings: Vec<JsonDiagnostic> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();
    if !validation.is_ok() {
        return failure(
            validation.errors.iter().map(validation_error_to_json).collect(),
            warnings,
        );
    }

    let material = match load_material(Path::new(material_path)) {
        Ok(material) => material,
        Err(e) => return failure(vec![JsonDiagnostic::new("INPUT", e.to_string())], warnings),
    };

    if material.shader != rules.source_shader {
        warnings.push(JsonDiagnostic::new(
            "SHADER_MISMATCH",
            format!(
                "material '{}' uses shader '{}', rules expect '{}'",
                material.name, material.shader, rules.source_shader
            ),
        ));
    }

    let (converted, stats) = convert_material(&rules, &material);
    let out_path = resolved_output_path(material_path, output_path);
    let material_json = match converted.to_json_pretty() {
        Ok(json) => json,
        Err(e) => return failure(vec![JsonDiagnostic::new("WRITE", e.to_string())], warnings),
    };
    if let Err(e) = write_material_json(&material_json, &out_path) {
        return failure(vec![JsonDiagnostic::new("WRITE", e.to_string())], warnings);
    }

    let output = ConvertOutput {
        success: true,
        output_path: Some(out_path.display().to_string()),
        copied: stats.copied,
        skipped: stats.skipped,
        errors: vec![],
        warnings,
    };
    print_json(&output);
    Ok(ExitCode::SUCCESS)
}

fn resolved_output_path(material_path: &str, output_path: Option<&str>) -> PathBuf {
    match output_path {
        Some(path) => PathBuf::from(path),
        None => {
            let input = Path::new(material_path);
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "material".to_string());
            input.with_file_name(format!("{}.converted.json", stem))
        }
    }
}

fn write_material_json(json: &str, path: &Path) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write converted material: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matpack_spec::material::{Material, PropertyValue};

    fn write_rules(dir: &Path) -> PathBuf {
        let path = dir.join("rules.json");
        std::fs::write(
            &path,
            r#"{
                "source_shader": "Legacy/Diffuse",
                "dest_shader": "Lit/Standard",
                "property_map": [
                    { "name": "_BaseColor", "kind": "color" },
                    { "name": "_BaseMap", "kind": "texture" },
                    { "name": "_BumpMap", "kind": "texture" }
                ]
            }"#,
        )
        .unwrap();
        path
    }

    fn write_material(dir: &Path) -> PathBuf {
        let mut material = Material::new("barrel_mat", "Legacy/Diffuse");
        material.set("_BaseColor", PropertyValue::Color([0.5, 0.5, 0.5, 1.0]));
        material.set("_BaseMap", PropertyValue::Texture("barrel.png".into()));

        let path = dir.join("barrel.material.json");
        std::fs::write(&path, material.to_json_pretty().unwrap()).unwrap();
        path
    }

    #[test]
    fn convert_writes_converted_material() {
        let tmp = tempfile::tempdir().unwrap();
        let rules_path = write_rules(tmp.path());
        let material_path = write_material(tmp.path());

        let code = run(
            rules_path.to_str().unwrap(),
            material_path.to_str().unwrap(),
            None,
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let out_path = tmp.path().join("barrel.material.converted.json");
        let converted = Material::from_json(&std::fs::read_to_string(out_path).unwrap()).unwrap();
        assert_eq!(converted.shader, "Lit/Standard");
        assert!(converted.has_property("_BaseColor"));
        assert!(!converted.has_property("_BumpMap"));
    }

    #[test]
    fn convert_respects_explicit_output_path() {
        let tmp = tempfile::tempdir().unwrap();
        let rules_path = write_rules(tmp.path());
        let material_path = write_material(tmp.path());
        let out_path = tmp.path().join("converted/barrel_std.json");
        std::fs::create_dir_all(out_path.parent().unwrap()).unwrap();

        let code = run(
            rules_path.to_str().unwrap(),
            material_path.to_str().unwrap(),
            Some(out_path.to_str().unwrap()),
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(out_path.exists());
    }

    #[test]
    fn convert_invalid_rules_fail() {
        let tmp = tempfile::tempdir().unwrap();
        let rules_path = tmp.path().join("rules.json");
        std::fs::write(
            &rules_path,
            r#"{ "source_shader": "", "dest_shader": "", "property_map": [] }"#,
        )
        .unwrap();
        let material_path = write_material(tmp.path());

        let code = run(
            rules_path.to_str().unwrap(),
            material_path.to_str().unwrap(),
            None,
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn convert_missing_material_errors_in_human_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let rules_path = write_rules(tmp.path());

        assert!(run(
            rules_path.to_str().unwrap(),
            "/nonexistent/material.json",
            None,
            false
        )
        .is_err());
    }
}
