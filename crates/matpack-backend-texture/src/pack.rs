//! Channel packing: combining channels of multiple source images into new
//! RGBA textures.
//!
//! [`pack_outputs`] is a pure function over in-memory data: no I/O, no shared
//! state, and identical inputs always produce identical pixel grids.
//! Malformed configuration (disabled selectors, out-of-range source indices,
//! missing sources) degrades to zero contributions instead of failing, so a
//! batch never aborts partway.

use matpack_spec::channel::{Channel, ChannelSelector, TextureOutput};

use crate::buffer::TextureBuffer;
use crate::color::Color;
use crate::source::SourceSlot;

/// Resolution used when no source can supply one.
pub const DEFAULT_RESOLUTION: (u32, u32) = (32, 32);

/// A packed output image, tagged with its recipe name.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedImage {
    /// The output recipe's name.
    pub name: String,
    /// The composed pixel grid.
    pub pixels: TextureBuffer,
}

/// Extract a single channel value from a buffer at given coordinates.
pub fn extract_channel(buffer: &TextureBuffer, x: u32, y: u32, channel: Channel) -> f64 {
    let color = buffer.get(x, y);
    match channel {
        Channel::R => color.r,
        Channel::G => color.g,
        Channel::B => color.b,
        Channel::A => color.a,
    }
}

/// Determine the resolution for one output.
///
/// Selectors are scanned in the fixed R, G, B, A order; the first one that
/// is enabled, in range, and references a non-missing source decides.
/// Otherwise the first non-missing source in the batch decides; otherwise
/// [`DEFAULT_RESOLUTION`]. The scan order is a deterministic tie-break and
/// must not change.
pub fn output_resolution(sources: &[SourceSlot], output: &TextureOutput) -> (u32, u32) {
    for selector in output.selectors() {
        if !selector.enabled {
            continue;
        }
        if let Some(buffer) = sources.get(selector.source).and_then(SourceSlot::image) {
            return (buffer.width, buffer.height);
        }
    }

    for slot in sources {
        if let Some(buffer) = slot.image() {
            return (buffer.width, buffer.height);
        }
    }

    DEFAULT_RESOLUTION
}

/// Pack every output recipe against the given sources.
///
/// Sources are read-only for the duration of the call; each output is
/// composed independently and the results are returned in recipe order.
pub fn pack_outputs(sources: &[SourceSlot], outputs: &[TextureOutput]) -> Vec<PackedImage> {
    outputs
        .iter()
        .map(|output| pack_output(sources, output))
        .collect()
}

/// Pack a single output recipe.
pub fn pack_output(sources: &[SourceSlot], output: &TextureOutput) -> PackedImage {
    let (width, height) = output_resolution(sources, output);

    // Resample each referenced source to the output resolution up front so
    // the per-pixel loop is a plain indexed fetch.
    let prepared = prepare_sources(sources, output, width, height);

    let mut pixels = TextureBuffer::new(width, height, Color::transparent());
    for y in 0..height {
        for x in 0..width {
            let r = channel_value(&output.r, &prepared, x, y);
            let g = channel_value(&output.g, &prepared, x, y);
            let b = channel_value(&output.b, &prepared, x, y);
            let a = channel_value(&output.a, &prepared, x, y);
            pixels.set(x, y, Color::rgba(r, g, b, a));
        }
    }

    PackedImage {
        name: output.name.clone(),
        pixels,
    }
}

/// Resample the sources an output actually references.
///
/// Unreferenced, missing, and out-of-range slots stay `None`; their
/// selectors contribute zero without touching pixel data.
fn prepare_sources(
    sources: &[SourceSlot],
    output: &TextureOutput,
    width: u32,
    height: u32,
) -> Vec<Option<TextureBuffer>> {
    let mut prepared: Vec<Option<TextureBuffer>> = vec![None; sources.len()];

    for selector in output.selectors() {
        if !selector.enabled || selector.source >= sources.len() {
            continue;
        }
        if prepared[selector.source].is_some() {
            continue;
        }
        if let Some(buffer) = sources[selector.source].image() {
            prepared[selector.source] = Some(buffer.resample_nearest(width, height));
        }
    }

    prepared
}

/// Resolve one selector at one pixel.
fn channel_value(
    selector: &ChannelSelector,
    prepared: &[Option<TextureBuffer>],
    x: u32,
    y: u32,
) -> f64 {
    if !selector.enabled {
        return 0.0;
    }
    match prepared.get(selector.source) {
        Some(Some(buffer)) => extract_channel(buffer, x, y, selector.channel),
        // Out of range or missing: no contribution.
        _ => 0.0,
    }
}
