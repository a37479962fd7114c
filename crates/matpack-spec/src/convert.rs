//! Material conversion between shader layouts.
//!
//! Conversion rules name the properties to carry from a source shader to a
//! destination shader. Properties the source material lacks, or whose value
//! kind disagrees with the mapping, are skipped rather than invented.

use serde::{Deserialize, Serialize};

use crate::material::{Material, PropertyKind};

/// One property to carry across a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMapping {
    /// Property name, shared by source and destination shaders.
    pub name: String,
    /// Expected value kind.
    pub kind: PropertyKind,
}

impl PropertyMapping {
    /// Creates a mapping.
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Rules for converting materials from one shader to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionRules {
    /// Shader that materials are converted from.
    pub source_shader: String,
    /// Shader that materials are converted to.
    pub dest_shader: String,
    /// Properties to copy across.
    pub property_map: Vec<PropertyMapping>,
}

impl ConversionRules {
    /// Parses rules from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the rules to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Outcome counts of a conversion or sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SyncStats {
    /// Properties copied to the destination.
    pub copied: usize,
    /// Mappings skipped (absent on the source or kind mismatch).
    pub skipped: usize,
}

/// Copies mapped properties from `source` onto `dest`.
///
/// A mapping is applied only when the source material has the property and
/// its value kind matches the mapping.
pub fn sync_properties(
    mappings: &[PropertyMapping],
    source: &Material,
    dest: &mut Material,
) -> SyncStats {
    let mut stats = SyncStats::default();
    for mapping in mappings {
        match source.get(&mapping.name) {
            Some(value) if value.kind() == mapping.kind => {
                dest.set(mapping.name.clone(), value.clone());
                stats.copied += 1;
            }
            _ => stats.skipped += 1,
        }
    }
    stats
}

/// Converts a material to the rules' destination shader.
///
/// The result carries only the mapped properties that exist on the source;
/// everything else stays behind.
pub fn convert_material(rules: &ConversionRules, source: &Material) -> (Material, SyncStats) {
    let mut dest = Material::new(source.name.clone(), rules.dest_shader.clone());
    let stats = sync_properties(&rules.property_map, source, &mut dest);
    (dest, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PropertyValue;

    fn source_material() -> Material {
        let mut m = Material::new("barrel_mat", "Legacy/Diffuse");
        m.set("_BaseColor", PropertyValue::Color([0.8, 0.1, 0.1, 1.0]));
        m.set("_BaseMap", PropertyValue::Texture("barrel_albedo.png".into()));
        m.set("_Shininess", PropertyValue::Float(0.7));
        m
    }

    fn rules() -> ConversionRules {
        ConversionRules {
            source_shader: "Legacy/Diffuse".into(),
            dest_shader: "Lit/Standard".into(),
            property_map: vec![
                PropertyMapping::new("_BaseColor", PropertyKind::Color),
                PropertyMapping::new("_BaseMap", PropertyKind::Texture),
                PropertyMapping::new("_BumpMap", PropertyKind::Texture),
            ],
        }
    }

    #[test]
    fn convert_copies_mapped_properties_and_sets_shader() {
        let (converted, stats) = convert_material(&rules(), &source_material());

        assert_eq!(converted.shader, "Lit/Standard");
        assert_eq!(converted.name, "barrel_mat");
        assert_eq!(
            converted.get("_BaseColor"),
            Some(&PropertyValue::Color([0.8, 0.1, 0.1, 1.0]))
        );
        assert_eq!(converted.texture_ref("_BaseMap"), Some("barrel_albedo.png"));
        assert_eq!(stats.copied, 2);
    }

    #[test]
    fn convert_skips_properties_absent_on_source() {
        let (converted, stats) = convert_material(&rules(), &source_material());
        assert!(!converted.has_property("_BumpMap"));
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn convert_drops_unmapped_properties() {
        let (converted, _) = convert_material(&rules(), &source_material());
        assert!(!converted.has_property("_Shininess"));
    }

    #[test]
    fn sync_skips_kind_mismatch() {
        let mut source = source_material();
        // Same name as the mapping but the wrong kind.
        source.set("_BaseColor", PropertyValue::Float(1.0));

        let mut dest = Material::new("dst", "Lit/Standard");
        let stats = sync_properties(&rules().property_map, &source, &mut dest);

        assert!(!dest.has_property("_BaseColor"));
        assert_eq!(stats.copied, 1); // only _BaseMap
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn rules_round_trip_through_json() {
        let r = rules();
        let json = r.to_json_pretty().unwrap();
        let parsed = ConversionRules::from_json(&json).unwrap();
        assert_eq!(r, parsed);
    }
}
