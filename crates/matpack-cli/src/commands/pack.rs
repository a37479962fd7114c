//! Pack command implementation.
//!
//! Plays the host role the packer itself refuses: loads the plan, turns
//! unassigned or unresolvable inputs into missing placeholders, invokes the
//! pure packer, and persists deterministic PNGs.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use matpack_backend_texture::{pack_outputs, write_rgba_to_vec_with_hash, PngConfig, SourceSlot};
use matpack_spec::hash::canonical_plan_hash;
use matpack_spec::material::Material;
use matpack_spec::plan::{PackPlan, PlanKind};
use matpack_spec::validation::validate_plan;

use super::json_output::{
    print_json, validation_error_to_json, validation_warning_to_json, JsonDiagnostic, PackOutput,
    PackedFile,
};
use super::validate::print_validation_results;
use crate::input::{load_material, load_plan, load_source_image};

/// Run the pack command.
///
/// # Arguments
/// * `plan_path` - Path to the pack plan JSON file
/// * `material_path` - Material document (required for `pack.material_v1`)
/// * `out_root` - Output directory (default: current directory)
/// * `base_name` - Base name for output files (default: material name for
///   material-bound plans, plan name otherwise)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 on validation or I/O failure
pub fn run(
    plan_path: &str,
    material_path: Option<&str>,
    out_root: Option<&str>,
    base_name: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(plan_path, material_path, out_root, base_name)
    } else {
        run_human(plan_path, material_path, out_root, base_name)
    }
}

fn run_human(
    plan_path: &str,
    material_path: Option<&str>,
    out_root: Option<&str>,
    base_name: Option<&str>,
) -> Result<ExitCode> {
    println!("{} {}", "Packing:".cyan().bold(), plan_path);

    let plan = load_plan(Path::new(plan_path))
        .with_context(|| format!("Failed to load plan file: {}", plan_path))?;

    let plan_hash = canonical_plan_hash(&plan).context("Failed to hash plan")?;
    println!("{} {} ({})", "Plan:".dimmed(), plan.name, &plan_hash[..16]);

    let validation = validate_plan(&plan);
    print_validation_results(&validation);
    if !validation.is_ok() {
        println!(
            "\n{} Plan has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let material = load_material_if_needed(&plan, material_path)?;
    let resolved = resolve_sources(&plan, plan_path, material.as_ref())?;
    for warning in &resolved.warnings {
        println!("  {} [resolve]: {}", "!".yellow(), warning);
    }

    let base = output_base_name(&plan, material.as_ref(), base_name);
    let out_dir = PathBuf::from(out_root.unwrap_or("."));
    let written = write_outputs(&plan, &resolved.sources, &out_dir, &base)?;

    for file in &written {
        println!(
            "  {} {} ({}x{}) {}",
            "wrote".green(),
            file.path,
            file.width,
            file.height,
            (&file.hash[..16]).dimmed()
        );
    }

    println!(
        "\n{} Packed {} texture(s)",
        "SUCCESS".green().bold(),
        written.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(
    plan_path: &str,
    material_path: Option<&str>,
    out_root: Option<&str>,
    base_name: Option<&str>,
) -> Result<ExitCode> {
    let failure = |errors: Vec<JsonDiagnostic>, warnings: Vec<JsonDiagnostic>| {
        let output = PackOutput {
            success: false,
            plan_hash: None,
            outputs: vec![],
            errors,
            warnings,
        };
        print_json(&output);
        Ok(ExitCode::from(1))
    };

    let plan = match load_plan(Path::new(plan_path)) {
        Ok(plan) => plan,
        Err(e) => return failure(vec![JsonDiagnostic::new("INPUT", e.to_string())], vec![]),
    };

    let plan_hash = canonical_plan_hash(&plan).ok();
    let validation = validate_plan(&plan);
    let mut warnings: Vec<JsonDiagnostic> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    if !validation.is_ok() {
        let output = PackOutput {
            success: false,
            plan_hash,
            outputs: vec![],
            errors: validation.errors.iter().map(validation_error_to_json).collect(),
            warnings,
        };
        print_json(&output);
        return Ok(ExitCode::from(1));
    }

    let material = match load_material_if_needed(&plan, material_path) {
        Ok(material) => material,
        Err(e) => return failure(vec![JsonDiagnostic::new("INPUT", e.to_string())], warnings),
    };

    let resolved = match resolve_sources(&plan, plan_path, material.as_ref()) {
        Ok(resolved) => resolved,
        Err(e) => return failure(vec![JsonDiagnostic::new("INPUT", e.to_string())], warnings),
    };
    warnings.extend(
        resolved
            .warnings
            .iter()
            .map(|w| JsonDiagnostic::new("RESOLVE", w)),
    );

    let base = output_base_name(&plan, material.as_ref(), base_name);
    let out_dir = PathBuf::from(out_root.unwrap_or("."));
    let outputs = match write_outputs(&plan, &resolved.sources, &out_dir, &base) {
        Ok(outputs) => outputs,
        Err(e) => return failure(vec![JsonDiagnostic::new("WRITE", e.to_string())], warnings),
    };

    let output = PackOutput {
        success: true,
        plan_hash,
        outputs,
        errors: vec![],
        warnings,
    };
    print_json(&output);
    Ok(ExitCode::SUCCESS)
}

/// Sources materialized from plan inputs, plus resolution notes.
struct ResolvedSources {
    sources: Vec<SourceSlot>,
    warnings: Vec<String>,
}

fn load_material_if_needed(
    plan: &PackPlan,
    material_path: Option<&str>,
) -> Result<Option<(PathBuf, Material)>> {
    match (plan.kind, material_path) {
        (PlanKind::PackMaterialV1, None) => {
            bail!("plan kind pack.material_v1 requires --material")
        }
        (_, Some(path)) => {
            let material = load_material(Path::new(path))
                .with_context(|| format!("Failed to load material file: {}", path))?;
            Ok(Some((PathBuf::from(path), material)))
        }
        (PlanKind::PackFilesV1, None) => Ok(None),
    }
}

/// Materialize every plan input into a source slot.
///
/// Unassigned slots and unresolvable material properties become the missing
/// placeholder (with a note); files that exist but cannot be read or decoded
/// are hard errors.
fn resolve_sources(
    plan: &PackPlan,
    plan_path: &str,
    material: Option<&(PathBuf, Material)>,
) -> Result<ResolvedSources> {
    let mut sources = Vec::with_capacity(plan.inputs.len());
    let mut warnings = Vec::new();

    match plan.kind {
        PlanKind::PackFilesV1 => {
            let plan_dir = parent_dir(Path::new(plan_path));
            for input in &plan.inputs {
                if input.is_empty() {
                    sources.push(SourceSlot::Missing);
                    continue;
                }
                let path = plan_dir.join(input);
                let buffer = load_source_image(&path)
                    .with_context(|| format!("Failed to load input image: {}", path.display()))?;
                sources.push(SourceSlot::Image(buffer));
            }
        }
        PlanKind::PackMaterialV1 => {
            let (material_path, material) =
                material.expect("material presence checked before resolving");
            let material_dir = parent_dir(material_path);
            for input in &plan.inputs {
                match material.texture_ref(input) {
                    None => {
                        warnings.push(format!(
                            "'{}' is not a texture property on material '{}'; using missing placeholder",
                            input, material.name
                        ));
                        sources.push(SourceSlot::Missing);
                    }
                    Some("") => {
                        warnings.push(format!(
                            "texture property '{}' has no texture assigned; using missing placeholder",
                            input
                        ));
                        sources.push(SourceSlot::Missing);
                    }
                    Some(texture_ref) => {
                        let path = material_dir.join(texture_ref);
                        let buffer = load_source_image(&path).with_context(|| {
                            format!("Failed to load texture for '{}': {}", input, path.display())
                        })?;
                        sources.push(SourceSlot::Image(buffer));
                    }
                }
            }
        }
    }

    Ok(ResolvedSources { sources, warnings })
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn output_base_name(
    plan: &PackPlan,
    material: Option<&(PathBuf, Material)>,
    base_name: Option<&str>,
) -> String {
    if let Some(base) = base_name {
        return base.to_string();
    }
    if let Some((_, material)) = material {
        return material.name.clone();
    }
    plan.name.clone()
}

/// Pack and persist every output; later same-name outputs overwrite earlier
/// files.
fn write_outputs(
    plan: &PackPlan,
    sources: &[SourceSlot],
    out_dir: &Path,
    base: &str,
) -> Result<Vec<PackedFile>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let config = PngConfig::default();
    let packed = pack_outputs(sources, &plan.outputs);

    let mut written = Vec::with_capacity(packed.len());
    for image in &packed {
        let path = out_dir.join(format!("{}{}.png", base, image.name));
        let (bytes, hash) = write_rgba_to_vec_with_hash(&image.pixels, &config)?;
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;

        written.push(PackedFile {
            name: image.name.clone(),
            path: path.display().to_string(),
            width: image.pixels.width,
            height: image.pixels.height,
            hash,
        });
    }

    Ok(written)
}
