//! Channel selectors and texture output recipes.
//!
//! A [`TextureOutput`] describes one packed image: four [`ChannelSelector`]s,
//! each pointing at one channel of one source image, or switched off.

use serde::{Deserialize, Serialize};

/// A color channel of an RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red channel.
    #[default]
    R,
    /// Green channel.
    G,
    /// Blue channel.
    B,
    /// Alpha channel.
    A,
}

impl Channel {
    /// Returns the channel as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::R => "r",
            Channel::G => "g",
            Channel::B => "b",
            Channel::A => "a",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selects one scalar channel of one source image, or nothing.
///
/// A disabled selector always contributes 0.0, regardless of what `source`
/// and `channel` are set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChannelSelector {
    /// Whether this selector contributes at all.
    #[serde(default)]
    pub enabled: bool,
    /// Index into the plan's input list.
    #[serde(default)]
    pub source: usize,
    /// Which channel of the source to sample.
    #[serde(default)]
    pub channel: Channel,
}

impl ChannelSelector {
    /// Creates an enabled selector for a source index and channel.
    pub fn source(source: usize, channel: Channel) -> Self {
        Self {
            enabled: true,
            source,
            channel,
        }
    }

    /// Creates a disabled selector.
    pub fn disabled() -> Self {
        Self::default()
    }
}

/// A named recipe of four channel selectors describing one packed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureOutput {
    /// Output name, used as the filename suffix; must be unique in a plan.
    pub name: String,
    /// Source for the red channel.
    #[serde(default)]
    pub r: ChannelSelector,
    /// Source for the green channel.
    #[serde(default)]
    pub g: ChannelSelector,
    /// Source for the blue channel.
    #[serde(default)]
    pub b: ChannelSelector,
    /// Source for the alpha channel.
    #[serde(default)]
    pub a: ChannelSelector,
}

impl TextureOutput {
    /// Creates an output with all selectors disabled.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r: ChannelSelector::disabled(),
            g: ChannelSelector::disabled(),
            b: ChannelSelector::disabled(),
            a: ChannelSelector::disabled(),
        }
    }

    /// The four selectors in the fixed R, G, B, A scan order.
    ///
    /// Resolution precedence walks this order; it is a deterministic
    /// tie-break, not an implementation detail.
    pub fn selectors(&self) -> [&ChannelSelector; 4] {
        [&self.r, &self.g, &self.b, &self.a]
    }

    /// Returns true if no selector is enabled.
    pub fn all_disabled(&self) -> bool {
        self.selectors().iter().all(|s| !s.enabled)
    }
}
