//! Image loading, saving and output path generation

use image::RgbaImage;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Default extension for recolored images
pub const DEFAULT_EXTENSION: &str = "png";

/// Error type for image I/O operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image decoding or encoding error
    Image(image::ImageError),
    /// Player name cannot be used as an output file name
    InvalidPlayerName(String),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::InvalidPlayerName(name) => {
                write!(f, "Player name '{}' is not a valid output file name", name)
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::InvalidPlayerName(_) => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Decode an image file into an RGBA raster with 8 bits per channel.
///
/// Any format the `image` crate can read is accepted; palette, grayscale and
/// RGB images are converted to RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, OutputError> {
    let image = image::open(path)?;
    Ok(image.to_rgba8())
}

/// Save an RGBA raster, choosing the format from the file extension.
///
/// # Arguments
///
/// * `image` - The raster to save
/// * `path` - The output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Generate the output path for a recolored player image.
///
/// | Player | Output dir | Extension | Output |
/// |--------|------------|-----------|--------|
/// | `Pablo Sanchez` | `out/` | `png` | `out/Pablo Sanchez.png` |
/// | `pablo` | `out` | `.bmp` | `out/pablo.bmp` |
///
/// A leading dot on the extension is ignored. Names that are empty or contain
/// a path separator are rejected so every output stays inside `output_dir`.
pub fn generate_output_path(
    output_dir: &Path,
    player: &str,
    extension: &str,
) -> Result<PathBuf, OutputError> {
    if !is_plain_file_stem(player) {
        return Err(OutputError::InvalidPlayerName(player.to_string()));
    }
    let extension = extension.trim_start_matches('.');
    Ok(output_dir.join(format!("{}.{}", player, extension)))
}

fn is_plain_file_stem(name: &str) -> bool {
    if name.is_empty() || name.contains(|c| matches!(c, '/' | '\\' | '\0')) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}

/// Resolve a player's source image inside the base images directory.
pub fn source_image_path(images_dir: &Path, image_filename: &str) -> PathBuf {
    images_dir.join(image_filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_generate_output_path() {
        let path = generate_output_path(Path::new("out"), "pablo", "png").unwrap();
        assert_eq!(path, PathBuf::from("out/pablo.png"));
    }

    #[test]
    fn test_generate_output_path_keeps_spaces() {
        let path = generate_output_path(Path::new("out/"), "Pablo Sanchez", "png").unwrap();
        assert_eq!(path, PathBuf::from("out/Pablo Sanchez.png"));
    }

    #[test]
    fn test_generate_output_path_strips_leading_dot() {
        let path = generate_output_path(Path::new("out"), "pablo", ".bmp").unwrap();
        assert_eq!(path, PathBuf::from("out/pablo.bmp"));
    }

    #[test]
    fn test_generate_output_path_rejects_directory_escapes() {
        for name in ["../escape", "nested/pablo", "..\\escape", "/abs", "..", ".", ""] {
            let err = generate_output_path(Path::new("out"), name, "png").unwrap_err();
            assert!(
                matches!(err, OutputError::InvalidPlayerName(ref n) if n == name),
                "{:?} should be rejected",
                name
            );
        }
        // Dots inside a plain name are fine
        let path = generate_output_path(Path::new("out"), "J.R. Smith..", "png").unwrap();
        assert_eq!(path, PathBuf::from("out/J.R. Smith...png"));
    }

    #[test]
    fn test_source_image_path() {
        let path = source_image_path(Path::new("imgs"), "pablo.png");
        assert_eq!(path, PathBuf::from("imgs/pablo.png"));
    }

    #[test]
    fn test_save_and_load_roundtrip_keeps_alpha() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("sprite.png");

        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 128]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        save_image(&image, &path).unwrap();
        assert!(path.exists());

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_rgba(Path::new("/nonexistent/sprite.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_converts_rgb_to_rgba() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rgb.png");
        let rgb = image::RgbImage::from_pixel(1, 1, image::Rgb([1, 2, 3]));
        rgb.save(&path).unwrap();

        let loaded = load_rgba(&path).unwrap();
        assert_eq!(loaded.get_pixel(0, 0), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_error_display() {
        let err = OutputError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
