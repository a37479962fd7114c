//! Material documents and manageable properties.
//!
//! A [`Material`] is a named bag of shader properties. Property values are a
//! tagged variant over a fixed set of kinds rather than a class hierarchy;
//! adding a kind means extending the enum and every exhaustive match over it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kind of a shader property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Scalar float (also covers range sliders).
    Float,
    /// LDR color, RGBA 0.0-1.0.
    Color,
    /// HDR color, RGBA with components above 1.0 allowed.
    Hdr,
    /// Four-component vector.
    Vector,
    /// Texture reference (a path; may be empty for an unassigned slot).
    Texture,
    /// Boolean shader keyword toggle.
    Keyword,
}

impl PropertyKind {
    /// Returns the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Float => "float",
            PropertyKind::Color => "color",
            PropertyKind::Hdr => "hdr",
            PropertyKind::Vector => "vector",
            PropertyKind::Texture => "texture",
            PropertyKind::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A shader property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Scalar float.
    Float(f64),
    /// LDR color, RGBA.
    Color([f64; 4]),
    /// HDR color, RGBA.
    Hdr([f64; 4]),
    /// Four-component vector.
    Vector([f64; 4]),
    /// Texture reference.
    Texture(String),
    /// Keyword toggle.
    Keyword(bool),
}

impl PropertyValue {
    /// Returns the kind of this value.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Float(_) => PropertyKind::Float,
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Hdr(_) => PropertyKind::Hdr,
            PropertyValue::Vector(_) => PropertyKind::Vector,
            PropertyValue::Texture(_) => PropertyKind::Texture,
            PropertyValue::Keyword(_) => PropertyKind::Keyword,
        }
    }
}

/// A material: a shader name plus its property values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name.
    pub name: String,
    /// Shader the material targets.
    pub shader: String,
    /// Property values keyed by property name.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Material {
    /// Creates an empty material for a shader.
    pub fn new(name: impl Into<String>, shader: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shader: shader.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Parses a material from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the material to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns true if the material declares a property of this name.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Returns the value of a property, if present.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Sets a property value, declaring the property if absent.
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.properties.insert(name.into(), value);
    }

    /// Returns the texture reference of a texture property.
    ///
    /// `None` if the property is absent or not a texture; `Some("")` is an
    /// unassigned slot.
    pub fn texture_ref(&self, name: &str) -> Option<&str> {
        match self.properties.get(name) {
            Some(PropertyValue::Texture(path)) => Some(path.as_str()),
            _ => None,
        }
    }
}

/// A named property value that can be applied to materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    /// Target property name.
    pub name: String,
    /// Value to apply.
    pub value: PropertyValue,
}

impl MaterialProperty {
    /// Creates a property.
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Applies this property to a material.
    ///
    /// The value is written only when the material already declares a
    /// property of the same name and kind; returns whether it applied.
    pub fn apply_to(&self, material: &mut Material) -> bool {
        match material.properties.get(&self.name) {
            Some(existing) if existing.kind() == self.value.kind() => {
                material
                    .properties
                    .insert(self.name.clone(), self.value.clone());
                true
            }
            _ => false,
        }
    }
}

/// Numeric id for an interned property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

/// An explicit property name -> id cache.
///
/// Ids are interned lazily on first lookup and stay stable until the caller
/// reports a name change via [`PropertyIdCache::invalidate`]. There is no
/// implicit recomputation tied to value lifetimes.
#[derive(Debug, Default)]
pub struct PropertyIdCache {
    ids: BTreeMap<String, PropertyId>,
    next: u32,
}

impl PropertyIdCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for a name, interning it on first use.
    pub fn id(&mut self, name: &str) -> PropertyId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = PropertyId(self.next);
        self.next += 1;
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Returns the cached id without interning.
    pub fn cached(&self, name: &str) -> Option<PropertyId> {
        self.ids.get(name).copied()
    }

    /// Drops the cached id for a name.
    ///
    /// Call this when a property has been renamed; the next lookup interns
    /// a fresh id.
    pub fn invalidate(&mut self, name: &str) {
        self.ids.remove(name);
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no names are interned.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
