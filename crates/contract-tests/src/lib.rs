use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use contract_model::Job;
use contract_pdf::images::{ImageError, ImageLoader};
use image::{ImageFormat, Rgba, RgbaImage};

pub fn demos_path() -> PathBuf {
    let test_pkg = Path::new(env!("CARGO_MANIFEST_DIR"))
        .canonicalize()
        .unwrap();
    let crates = test_pkg.parent().unwrap();
    let workspace = crates.parent().unwrap();
    workspace.join("demos")
}

pub const DEMOS: [&str; 3] = ["architecture", "communication", "quote"];

pub fn load_demo(name: &str) -> Job {
    let path = demos_path().join(name).with_extension("ron");
    Job::load(&path).unwrap()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([31, 78, 121, 255]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// Serves the same small PNG for every URL
pub struct SolidImages;

impl ImageLoader for SolidImages {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
        Ok(png(4, 2))
    }
}

/// Serves bytes that are not an image
pub struct BrokenImages;

impl ImageLoader for BrokenImages {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
        Ok(b"<html>404</html>".to_vec())
    }
}
