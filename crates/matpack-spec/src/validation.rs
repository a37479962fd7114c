//! Caller-facing validation for plans and conversion rules.
//!
//! Validation collects every finding instead of stopping at the first one.
//! Errors mark configurations the packer would silently degrade on (it
//! substitutes zero contributions rather than failing); surfacing them here
//! is what keeps that degradation intentional.

use crate::channel::ChannelSelector;
use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
use crate::convert::ConversionRules;
use crate::plan::{PackPlan, PlanKind, PLAN_VERSION};

/// Validates a pack plan.
pub fn validate_plan(plan: &PackPlan) -> ValidationResult {
    let mut result = ValidationResult::success();

    if plan.plan_version != PLAN_VERSION {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedPlanVersion,
            format!(
                "plan_version {} is not supported (expected {})",
                plan.plan_version, PLAN_VERSION
            ),
            "plan_version",
        ));
    }

    if plan.name.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyPlanName,
            "plan name must not be empty",
            "name",
        ));
    }

    if plan.inputs.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NoInputs,
            "plan has no inputs; every enabled selector will contribute zero",
            "inputs",
        ));
    }

    if plan.kind == PlanKind::PackMaterialV1 {
        for (i, input) in plan.inputs.iter().enumerate() {
            if input.trim().is_empty() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::InvalidPropertyInput,
                    format!("input {} is not a usable property name", i),
                    format!("inputs[{}]", i),
                ));
            }
        }
    }

    if plan.outputs.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NoOutputs,
            "plan has no outputs; packing will produce nothing",
            "outputs",
        ));
    }

    for (i, output) in plan.outputs.iter().enumerate() {
        if output.name.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyOutputName,
                format!("output {} has an empty name", i),
                format!("outputs[{}].name", i),
            ));
        }

        // Same-name collision overwrites the earlier file on write.
        for (j, other) in plan.outputs.iter().enumerate().skip(i + 1) {
            if !output.name.is_empty() && output.name == other.name {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::DuplicateOutputName,
                    format!(
                        "outputs {} and {} share the name '{}'; the later output overwrites the earlier one",
                        i, j, output.name
                    ),
                    format!("outputs[{}].name", j),
                ));
            }
        }

        if output.all_disabled() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::AllChannelsDisabled,
                format!("output {} ('{}') has no enabled channel; the result is all black", i, output.name),
                format!("outputs[{}]", i),
            ));
        }

        for (selector, channel_name) in output
            .selectors()
            .into_iter()
            .zip(["r", "g", "b", "a"])
        {
            check_selector(selector, plan.input_count(), i, channel_name, &mut result);
        }
    }

    result
}

fn check_selector(
    selector: &ChannelSelector,
    input_count: usize,
    output_index: usize,
    channel_name: &str,
    result: &mut ValidationResult,
) {
    if selector.enabled && selector.source >= input_count {
        result.add_error(ValidationError::with_path(
            ErrorCode::SourceIndexOutOfRange,
            format!(
                "output {} ({} channel) references source index {}, but there are only {} inputs",
                output_index, channel_name, selector.source, input_count
            ),
            format!("outputs[{}].{}.source", output_index, channel_name),
        ));
    }
}

/// Validates conversion rules.
pub fn validate_rules(rules: &ConversionRules) -> ValidationResult {
    let mut result = ValidationResult::success();

    if rules.source_shader.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyShaderName,
            "source_shader must not be empty",
            "source_shader",
        ));
    }
    if rules.dest_shader.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyShaderName,
            "dest_shader must not be empty",
            "dest_shader",
        ));
    }

    for (i, mapping) in rules.property_map.iter().enumerate() {
        if mapping.name.trim().is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyMappingName,
                format!("property mapping {} has an empty name", i),
                format!("property_map[{}].name", i),
            ));
        }

        for (j, other) in rules.property_map.iter().enumerate().skip(i + 1) {
            if !mapping.name.is_empty() && mapping.name == other.name {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::DuplicateMappingName,
                    format!(
                        "mappings {} and {} both name '{}'; the later mapping wins",
                        i, j, mapping.name
                    ),
                    format!("property_map[{}].name", j),
                ));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, ChannelSelector, TextureOutput};
    use crate::convert::PropertyMapping;
    use crate::material::PropertyKind;

    fn output(name: &str, r_source: usize) -> TextureOutput {
        let mut output = TextureOutput::new(name);
        output.r = ChannelSelector::source(r_source, Channel::R);
        output
    }

    fn valid_plan() -> PackPlan {
        PackPlan::builder("crate", PlanKind::PackFilesV1)
            .input("albedo.png")
            .input("mask.png")
            .output(output("_Packed", 0))
            .build()
    }

    #[test]
    fn valid_plan_passes() {
        let result = validate_plan(&valid_plan());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut plan = valid_plan();
        plan.plan_version = 99;
        let result = validate_plan(&plan);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnsupportedPlanVersion));
    }

    #[test]
    fn empty_plan_name_is_rejected() {
        let mut plan = valid_plan();
        plan.name = "  ".into();
        let result = validate_plan(&plan);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptyPlanName));
    }

    #[test]
    fn out_of_range_enabled_selector_is_an_error() {
        let mut plan = valid_plan();
        plan.outputs.push(output("_Bad", 7));
        let result = validate_plan(&plan);

        let err = result
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::SourceIndexOutOfRange)
            .expect("expected E004");
        assert_eq!(err.path.as_deref(), Some("outputs[1].r.source"));
        assert!(err.message.contains("source index 7"));
    }

    #[test]
    fn out_of_range_disabled_selector_is_ignored() {
        let mut plan = valid_plan();
        // Disabled selector keeps whatever stale index it had.
        plan.outputs[0].g = ChannelSelector {
            enabled: false,
            source: 99,
            channel: Channel::G,
        };
        let result = validate_plan(&plan);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    #[test]
    fn duplicate_output_names_warn() {
        let mut plan = valid_plan();
        plan.outputs.push(output("_Packed", 1));
        let result = validate_plan(&plan);

        assert!(result.is_ok());
        let warning = result
            .warnings
            .iter()
            .find(|w| w.code == WarningCode::DuplicateOutputName)
            .expect("expected W001");
        assert!(warning.message.contains("overwrites"));
    }

    #[test]
    fn empty_output_name_is_an_error_not_a_duplicate() {
        let mut plan = valid_plan();
        plan.outputs.push(output("", 0));
        plan.outputs.push(output("", 1));
        let result = validate_plan(&plan);

        assert_eq!(
            result
                .errors
                .iter()
                .filter(|e| e.code == ErrorCode::EmptyOutputName)
                .count(),
            2
        );
        assert!(!result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::DuplicateOutputName));
    }

    #[test]
    fn all_disabled_output_warns() {
        let mut plan = valid_plan();
        plan.outputs.push(TextureOutput::new("_Empty"));
        let result = validate_plan(&plan);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::AllChannelsDisabled));
    }

    #[test]
    fn no_inputs_and_no_outputs_warn() {
        let plan = PackPlan::builder("bare", PlanKind::PackFilesV1).build();
        let result = validate_plan(&plan);
        assert!(result.is_ok());
        assert!(result.warnings.iter().any(|w| w.code == WarningCode::NoInputs));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::NoOutputs));
    }

    #[test]
    fn material_plan_rejects_empty_property_inputs() {
        let plan = PackPlan::builder("abstract", PlanKind::PackMaterialV1)
            .input("_MetallicTex")
            .input("")
            .output(output("_MOES", 0))
            .build();
        let result = validate_plan(&plan);
        let err = result
            .errors
            .iter()
            .find(|e| e.code == ErrorCode::InvalidPropertyInput)
            .expect("expected E005");
        assert_eq!(err.path.as_deref(), Some("inputs[1]"));
    }

    #[test]
    fn files_plan_allows_empty_input_slots() {
        let plan = PackPlan::builder("files", PlanKind::PackFilesV1)
            .input("albedo.png")
            .input("")
            .output(output("_Packed", 0))
            .build();
        let result = validate_plan(&plan);
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    fn valid_rules() -> ConversionRules {
        ConversionRules {
            source_shader: "Legacy/Diffuse".into(),
            dest_shader: "Lit/Standard".into(),
            property_map: vec![PropertyMapping::new("_BaseMap", PropertyKind::Texture)],
        }
    }

    #[test]
    fn valid_rules_pass() {
        let result = validate_rules(&valid_rules());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
    }

    #[test]
    fn empty_shader_names_are_rejected() {
        let mut rules = valid_rules();
        rules.source_shader = String::new();
        rules.dest_shader = " ".into();
        let result = validate_rules(&rules);
        assert_eq!(
            result
                .errors
                .iter()
                .filter(|e| e.code == ErrorCode::EmptyShaderName)
                .count(),
            2
        );
    }

    #[test]
    fn duplicate_mapping_names_warn() {
        let mut rules = valid_rules();
        rules
            .property_map
            .push(PropertyMapping::new("_BaseMap", PropertyKind::Color));
        let result = validate_rules(&rules);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::DuplicateMappingName));
    }

    #[test]
    fn empty_mapping_name_is_rejected() {
        let mut rules = valid_rules();
        rules
            .property_map
            .push(PropertyMapping::new("", PropertyKind::Float));
        let result = validate_rules(&rules);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::EmptyMappingName));
    }
}
