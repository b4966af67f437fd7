//! Test images and temporary batch directory trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pixtone_image::{encode_png, PngConfig};
use pixtone_spec::{ColorType, Image};

/// Smooth ramp: each component is `(x * 37 + y * 11 + c * 71) % 256`.
pub fn gradient(width: u32, height: u32, color_type: ColorType) -> Image {
    let channels = color_type.bytes_per_pixel();
    let mut data = Vec::with_capacity(Image::buffer_len(width, height, color_type));
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                data.push(((x as usize * 37 + y as usize * 11 + c * 71) % 256) as u8);
            }
        }
    }
    Image::new(width, height, color_type, data).expect("gradient layout")
}

/// Alternating 0 / 255 pixels, all channels equal.
pub fn checkerboard(width: u32, height: u32, color_type: ColorType) -> Image {
    let channels = color_type.bytes_per_pixel();
    let mut data = Vec::with_capacity(Image::buffer_len(width, height, color_type));
    for y in 0..height {
        for x in 0..width {
            let value = if (x + y) % 2 == 0 { 0 } else { 255 };
            data.extend(std::iter::repeat(value).take(channels));
        }
    }
    Image::new(width, height, color_type, data).expect("checkerboard layout")
}

/// A temporary root with the `input/` directory the batch command reads.
pub struct BatchRootFixture {
    pub root: TempDir,
    pub input_dir: PathBuf,
}

impl BatchRootFixture {
    /// Create an empty root with `input/`.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let input_dir = root.path().join("input");
        fs::create_dir_all(&input_dir).expect("Failed to create input dir");
        Self { root, input_dir }
    }

    /// Root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Encode `image` into `input/<name>.png`.
    pub fn add_png(&self, name: &str, image: &Image) -> PathBuf {
        let bytes = encode_png(image, &PngConfig::default()).expect("Failed to encode PNG");
        self.add_raw(&format!("{}.png", name), &bytes)
    }

    /// Write arbitrary bytes into `input/<file_name>`.
    pub fn add_raw(&self, file_name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.input_dir.join(file_name);
        fs::write(&path, bytes).expect("Failed to write input file");
        path
    }
}

impl Default for BatchRootFixture {
    fn default() -> Self {
        Self::new()
    }
}
