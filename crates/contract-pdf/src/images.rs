//! Fetching and decoding the logo and the signature

use std::{future::Future, io};

use contract_model::input::AgencyProfile;
use displaydoc::Display;
use image::RgbaImage;
use thiserror::Error;

use crate::layout::ImageSlot;

/// Error when fetching or decoding an image
#[derive(Debug, Display, Error)]
pub enum ImageError {
    /// Failed to read the image: {0}
    Io(#[from] io::Error),
    /// Failed to decode the image: {0}
    Decode(#[from] image::ImageError),
    /// Can't load images from {0:?}
    Unsupported(String),
}

/// A source of image bytes
pub trait ImageLoader {
    /// Fetch the raw (encoded) bytes behind `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ImageError>>;
}

/// A loader for documents without images
#[derive(Debug, Default, Copy, Clone)]
pub struct NoImages;

impl ImageLoader for NoImages {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ImageError>> {
        std::future::ready(Err(ImageError::Unsupported(url.to_owned())))
    }
}

/// A decoded image, flattened onto a white background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// 8-bit RGB samples, row by row
    pub rgb: Vec<u8>,
}

impl LoadedImage {
    /// The largest size with the aspect ratio of the image that fits the box
    pub fn fit(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        let (w, h) = (self.width as f32, self.height as f32);
        let scale = (max_width / w).min(max_height / h);
        (w * scale, h * scale)
    }
}

fn blend(component: u8, alpha: u8) -> u8 {
    let (c, a) = (u16::from(component), u16::from(alpha));
    ((c * a + 255 * (255 - a)) / 255) as u8
}

fn flatten(image: &RgbaImage) -> LoadedImage {
    let (width, height) = image.dimensions();
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend([blend(r, a), blend(g, a), blend(b, a)]);
    }
    LoadedImage { width, height, rgb }
}

/// Decode a PNG or JPEG image
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage, ImageError> {
    let image = image::load_from_memory(bytes)?;
    Ok(flatten(&image.to_rgba8()))
}

/// Fetch and decode an image, in a single attempt
///
/// Any failure is logged and yields `None`; the document is rendered
/// without the image.
pub async fn fetch_image<L: ImageLoader>(
    loader: &L,
    url: Option<&str>,
    what: &str,
) -> Option<LoadedImage> {
    let url = url.map(str::trim).filter(|u| !u.is_empty())?;
    let result = match loader.fetch(url).await {
        Ok(bytes) => decode_image(&bytes),
        Err(e) => Err(e),
    };
    match result {
        Ok(image) => {
            log::debug!("Loaded the {} ({}x{})", what, image.width, image.height);
            Some(image)
        }
        Err(e) => {
            log::warn!("Could not load the {} from {:?}: {}", what, url, e);
            None
        }
    }
}

/// The images a document may show
#[derive(Debug, Clone, Default)]
pub struct DocumentImages {
    /// The logo of the issuer
    pub logo: Option<LoadedImage>,
    /// The signature of the issuer
    pub signature: Option<LoadedImage>,
}

impl DocumentImages {
    /// Fetch the logo and the signature of the agency
    pub async fn load<L: ImageLoader>(loader: &L, agency: &AgencyProfile) -> Self {
        let logo = fetch_image(loader, agency.logo_url.as_deref(), "logo").await;
        let signature = fetch_image(loader, agency.signature_url.as_deref(), "signature").await;
        Self { logo, signature }
    }

    /// The image in a slot, if it was loaded
    pub fn get(&self, slot: ImageSlot) -> Option<&LoadedImage> {
        match slot {
            ImageSlot::Logo => self.logo.as_ref(),
            ImageSlot::Signature => self.signature.as_ref(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::{decode_image, fetch_image, ImageError, ImageLoader, LoadedImage};
    use futures_lite::future::block_on;
    use image::{ImageFormat, Rgba, RgbaImage};

    /// A 2x1 PNG: one opaque red pixel and one transparent pixel
    pub(crate) fn tiny_png() -> Vec<u8> {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    struct Fixed(Vec<u8>);

    impl ImageLoader for Fixed {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn decode_flattens_alpha() {
        let image = decode_image(&tiny_png()).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.rgb, vec![255, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn fit_keeps_ratio() {
        let image = LoadedImage {
            width: 200,
            height: 100,
            rgb: Vec::new(),
        };
        assert_eq!(image.fit(100.0, 100.0), (100.0, 50.0));
        assert_eq!(image.fit(400.0, 50.0), (100.0, 50.0));
    }

    #[test]
    fn failures_yield_none() {
        let garbage = Fixed(b"not an image".to_vec());
        assert!(block_on(fetch_image(&garbage, Some("logo.png"), "logo")).is_none());
        assert!(block_on(fetch_image(&garbage, Some("  "), "logo")).is_none());
        let png = Fixed(tiny_png());
        assert!(block_on(fetch_image(&png, Some("logo.png"), "logo")).is_some());
    }
}
