//! Pack plan types.
//!
//! A plan is the serialized template for a packing run: a named list of
//! inputs and a list of [`TextureOutput`] recipes over those inputs.

use serde::{Deserialize, Serialize};

use crate::channel::TextureOutput;

/// Current plan version.
pub const PLAN_VERSION: u32 = 1;

/// How a plan's inputs are resolved into source images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    /// `pack.files_v1` - inputs are image file paths. An empty string marks
    /// an intentionally unassigned slot.
    #[serde(rename = "pack.files_v1")]
    PackFilesV1,
    /// `pack.material_v1` - inputs are texture property names, resolved
    /// against a material document at pack time.
    #[serde(rename = "pack.material_v1")]
    PackMaterialV1,
}

impl PlanKind {
    /// Returns the plan kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::PackFilesV1 => "pack.files_v1",
            PlanKind::PackMaterialV1 => "pack.material_v1",
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pack plan: the template for producing packed textures.
///
/// The index of an entry in `inputs` is what a
/// [`ChannelSelector`](crate::channel::ChannelSelector) `source` field
/// refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackPlan {
    /// Schema version; must be 1 for v1 plans.
    pub plan_version: u32,

    /// Plan name, used as the default base name for output files.
    pub name: String,

    /// How `inputs` entries are resolved.
    pub kind: PlanKind,

    /// Input slots: file paths or texture property names, per `kind`.
    pub inputs: Vec<String>,

    /// Output recipes over the inputs.
    pub outputs: Vec<TextureOutput>,
}

impl PackPlan {
    /// Creates a new plan builder.
    pub fn builder(name: impl Into<String>, kind: PlanKind) -> PackPlanBuilder {
        PackPlanBuilder::new(name, kind)
    }

    /// Parses a plan from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the plan to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the plan to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Returns the number of input slots.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }
}

/// Builder for constructing [`PackPlan`] instances.
#[derive(Debug, Clone)]
pub struct PackPlanBuilder {
    name: String,
    kind: PlanKind,
    inputs: Vec<String>,
    outputs: Vec<TextureOutput>,
}

impl PackPlanBuilder {
    /// Creates a new plan builder.
    pub fn new(name: impl Into<String>, kind: PlanKind) -> Self {
        Self {
            name: name.into(),
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Adds an input slot.
    pub fn input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Adds an output recipe.
    pub fn output(mut self, output: TextureOutput) -> Self {
        self.outputs.push(output);
        self
    }

    /// Builds the plan.
    pub fn build(self) -> PackPlan {
        PackPlan {
            plan_version: PLAN_VERSION,
            name: self.name,
            kind: self.kind,
            inputs: self.inputs,
            outputs: self.outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{Channel, ChannelSelector};
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_sets_version_and_fields() {
        let plan = PackPlan::builder("crate_props", PlanKind::PackFilesV1)
            .input("albedo.png")
            .input("mask.png")
            .output(TextureOutput::new("_Packed"))
            .build();

        assert_eq!(plan.plan_version, PLAN_VERSION);
        assert_eq!(plan.name, "crate_props");
        assert_eq!(plan.kind, PlanKind::PackFilesV1);
        assert_eq!(plan.input_count(), 2);
        assert_eq!(plan.outputs.len(), 1);
    }

    #[test]
    fn plan_round_trips_through_json() {
        let mut output = TextureOutput::new("_MOES");
        output.r = ChannelSelector::source(0, Channel::R);
        output.a = ChannelSelector::source(1, Channel::G);

        let plan = PackPlan::builder("barrel", PlanKind::PackMaterialV1)
            .input("_MetallicTex")
            .input("_OcclusionTex")
            .output(output)
            .build();

        let json = plan.to_json_pretty().unwrap();
        let parsed = PackPlan::from_json(&json).unwrap();
        assert_eq!(plan, parsed);
    }

    #[test]
    fn plan_parses_kind_strings() {
        let json = r#"{
            "plan_version": 1,
            "name": "crate",
            "kind": "pack.files_v1",
            "inputs": ["a.png", ""],
            "outputs": []
        }"#;
        let plan = PackPlan::from_json(json).unwrap();
        assert_eq!(plan.kind, PlanKind::PackFilesV1);
        assert_eq!(plan.inputs[1], "");
    }

    #[test]
    fn plan_rejects_unknown_fields() {
        let json = r#"{
            "plan_version": 1,
            "name": "crate",
            "kind": "pack.files_v1",
            "inputs": [],
            "outputs": [],
            "output_path": "Assets/"
        }"#;
        assert!(PackPlan::from_json(json).is_err());
    }

    #[test]
    fn plan_kind_display() {
        assert_eq!(PlanKind::PackFilesV1.to_string(), "pack.files_v1");
        assert_eq!(PlanKind::PackMaterialV1.to_string(), "pack.material_v1");
    }
}
