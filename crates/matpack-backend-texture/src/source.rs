//! Source image slots.

use crate::buffer::TextureBuffer;

/// One input slot of a packing batch.
///
/// An unassigned or unreadable input is a normal occurrence upstream, not an
/// error: the caller materializes such slots as [`SourceSlot::Missing`]
/// before packing. A missing slot contributes 0.0 on every channel
/// (including alpha) and never supplies a resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSlot {
    /// A materialized source image.
    Image(TextureBuffer),
    /// The documented placeholder for an unassigned slot.
    Missing,
}

impl SourceSlot {
    /// Returns true if this slot is the missing placeholder.
    pub fn is_missing(&self) -> bool {
        matches!(self, SourceSlot::Missing)
    }

    /// Returns the image, if present.
    pub fn image(&self) -> Option<&TextureBuffer> {
        match self {
            SourceSlot::Image(buffer) => Some(buffer),
            SourceSlot::Missing => None,
        }
    }
}

impl From<TextureBuffer> for SourceSlot {
    fn from(buffer: TextureBuffer) -> Self {
        SourceSlot::Image(buffer)
    }
}
