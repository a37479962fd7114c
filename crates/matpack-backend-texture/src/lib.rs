//! matpack Channel Texture Packer
//!
//! This crate composes new RGBA textures from the channels of existing
//! source images: each output channel independently samples one channel of
//! one source (or stays zero), sources of the wrong size are point-resampled
//! so hard mask boundaries survive, and the result encodes to deterministic
//! PNG bytes.
//!
//! The packer itself is a pure function over in-memory pixel data. It does
//! no I/O and holds no state; reading source files, deciding file names, and
//! persisting outputs are the caller's job (see `matpack-cli`).
//!
//! # Example
//!
//! ```
//! use matpack_spec::channel::{Channel, ChannelSelector, TextureOutput};
//! use matpack_backend_texture::{pack_outputs, Color, SourceSlot, TextureBuffer};
//!
//! let metallic = TextureBuffer::new(4, 4, Color::gray(0.8));
//! let occlusion = TextureBuffer::new(4, 4, Color::gray(0.3));
//!
//! let mut output = TextureOutput::new("_MOES");
//! output.r = ChannelSelector::source(0, Channel::R);
//! output.g = ChannelSelector::source(1, Channel::R);
//!
//! let sources = vec![SourceSlot::from(metallic), SourceSlot::from(occlusion)];
//! let packed = pack_outputs(&sources, &[output]);
//!
//! assert_eq!(packed[0].pixels.width, 4);
//! ```

pub mod buffer;
pub mod color;
pub mod pack;
pub mod png;
pub mod source;

// Re-export main types for convenience
pub use buffer::TextureBuffer;
pub use color::Color;
pub use pack::{
    extract_channel, output_resolution, pack_output, pack_outputs, PackedImage,
    DEFAULT_RESOLUTION,
};
pub use png::{hash_png, write_rgba, write_rgba_to_vec_with_hash, write_rgba_to_writer, PngConfig, PngError};
pub use source::SourceSlot;
