//! File loading for the CLI.
//!
//! Every command goes through these loaders so path handling and error
//! wording stay consistent.

use std::path::Path;

use thiserror::Error;

use matpack_backend_texture::{Color, TextureBuffer};
use matpack_spec::convert::ConversionRules;
use matpack_spec::material::Material;
use matpack_spec::plan::PackPlan;

/// Errors from loading input files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

fn read_to_string(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Load a pack plan from a JSON file.
pub fn load_plan(path: &Path) -> Result<PackPlan, InputError> {
    let json = read_to_string(path)?;
    PackPlan::from_json(&json).map_err(|source| InputError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load conversion rules from a JSON file.
pub fn load_rules(path: &Path) -> Result<ConversionRules, InputError> {
    let json = read_to_string(path)?;
    ConversionRules::from_json(&json).map_err(|source| InputError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load a material document from a JSON file.
pub fn load_material(path: &Path) -> Result<Material, InputError> {
    let json = read_to_string(path)?;
    Material::from_json(&json).map_err(|source| InputError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load a source image into a pixel grid.
///
/// Pixels are converted to normalized f64 RGBA, which is what the packer
/// samples from.
pub fn load_source_image(path: &Path) -> Result<TextureBuffer, InputError> {
    let decoded = image::open(path).map_err(|source| InputError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut buffer = TextureBuffer::new(width, height, Color::transparent());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        buffer.set(
            x,
            y,
            Color::rgba(
                r as f64 / 255.0,
                g as f64 / 255.0,
                b as f64 / 255.0,
                a as f64 / 255.0,
            ),
        );
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matpack_backend_texture::{write_rgba, PngConfig};

    #[test]
    fn load_plan_reports_missing_file() {
        let err = load_plan(Path::new("/nonexistent/plan.json")).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/plan.json"));
    }

    #[test]
    fn load_plan_reports_bad_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("plan.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_plan(&path).unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
    }

    #[test]
    fn load_source_image_round_trips_pixels() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("src.png");

        let mut buffer = TextureBuffer::new_black(2, 2);
        buffer.set(1, 0, Color::rgba(1.0, 0.0, 0.0, 1.0));
        buffer.set(0, 1, Color::rgba(0.0, 1.0, 0.0, 0.5));
        write_rgba(&buffer, &path, &PngConfig::default()).unwrap();

        let loaded = load_source_image(&path).unwrap();
        assert_eq!(loaded.width, 2);
        assert_eq!(loaded.height, 2);
        assert!((loaded.get(1, 0).r - 1.0).abs() < 1e-9);
        assert!((loaded.get(0, 1).g - 1.0).abs() < 1e-9);
        // 0.5 alpha quantizes to 128/255.
        assert!((loaded.get(0, 1).a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn load_source_image_reports_undecodable_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("not_a.png");
        std::fs::write(&path, b"plainly not a png").unwrap();

        let err = load_source_image(&path).unwrap_err();
        assert!(matches!(err, InputError::Decode { .. }));
    }
}
