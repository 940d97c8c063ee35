//! Common structs and enums

use std::{collections::BTreeMap, fmt, io, str::FromStr};

use crate::{
    encoding::{pdf_doc_encode, PDFDocEncodingError},
    write::{Formatter, PdfDict, PdfName, Serialize, ToDict},
};

/// A PDF Byte string
#[derive(Clone, Eq, PartialEq)]
pub struct PdfString(Vec<u8>);

impl PdfString {
    /// Create a new string from raw (already encoded) bytes
    pub fn new(string: &[u8]) -> Self {
        Self(string.to_vec())
    }

    /// Get a slice to the contained bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Get the contained byte buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl FromStr for PdfString {
    type Err = PDFDocEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        pdf_doc_encode(s).map(Self)
    }
}

impl fmt::Debug for PdfString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PdfString({:?})", String::from_utf8_lossy(&self.0))
    }
}

/// A reference to an object
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjRef {
    /// The index within the file
    pub id: u64,
    /// The generation number
    pub gen: u16,
}

/// The base encoding of a simple font
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BaseEncoding {
    /// `WinAnsiEncoding` (Windows Code Page 1252)
    WinAnsiEncoding,
}

impl Serialize for BaseEncoding {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        match self {
            Self::WinAnsiEncoding => PdfName("WinAnsiEncoding").write(f),
        }
    }
}

/// A simple two-dimensional coordinate
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Point<P> {
    /// Horizontal offset
    pub x: P,
    /// Vertical offset
    pub y: P,
}

/// A media box definition, in PDF points (1/72 inch)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MediaBox {
    /// The width
    pub width: f32,
    /// The height
    pub height: f32,
}

impl MediaBox {
    /// An A4 (portrait) Media Box
    pub const A4: Self = Self {
        width: 595.28,
        height: 841.89,
    };
}

impl From<MediaBox> for Rectangle<f32> {
    fn from(value: MediaBox) -> Self {
        Rectangle {
            ll: Point { x: 0.0, y: 0.0 },
            ur: Point {
                x: value.width,
                y: value.height,
            },
        }
    }
}

/// A primitive rectangle
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle<P> {
    /// lower left
    pub ll: Point<P>,
    /// upper right
    pub ur: Point<P>,
}

impl<P: Serialize> Serialize for Rectangle<P> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_arr()
            .entry(&self.ll.x)?
            .entry(&self.ll.y)?
            .entry(&self.ur.x)?
            .entry(&self.ur.y)?
            .finish()
    }
}

/// A dict is a map from strings to a type P
pub type Dict<P> = BTreeMap<String, P>;

impl<P: Serialize> Serialize for Dict<P> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut dict = f.pdf_dict();
        for (key, value) in self {
            dict.field(key, value)?;
        }
        dict.finish()
    }
}

/// Valid `ProcSet`s for PDF files
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ProcSet {
    /// General PDFs procs
    PDF,
    /// Text procs
    Text,
    /// Color Images
    ImageC,
}

impl Serialize for ProcSet {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        match self {
            Self::PDF => PdfName("PDF").write(f),
            Self::Text => PdfName("Text").write(f),
            Self::ImageC => PdfName("ImageC").write(f),
        }
    }
}

/// The color space of an image
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ColorSpace {
    /// A 1-component grayscale image
    DeviceGray,
    /// A 3-component RGB image
    DeviceRGB,
}

impl Serialize for ColorSpace {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        match self {
            Self::DeviceGray => PdfName("DeviceGray").write(f),
            Self::DeviceRGB => PdfName("DeviceRGB").write(f),
        }
    }
}

/// The metadata for an image XObject
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageMetadata {
    /// The width of the image in pixels
    pub width: usize,
    /// The height of the image in pixels
    pub height: usize,
    /// The `ColorSpace`
    pub color_space: ColorSpace,
    /// The `BitsPerComponent`
    pub bits_per_component: u8,
}

impl ToDict for ImageMetadata {
    fn write(&self, dict: &mut PdfDict<'_, '_>) -> io::Result<()> {
        dict.field("Type", &PdfName("XObject"))?;
        dict.field("Subtype", &PdfName("Image"))?;
        dict.field("Width", &self.width)?;
        dict.field("Height", &self.height)?;
        dict.field("ColorSpace", &self.color_space)?;
        dict.field("BitsPerComponent", &self.bits_per_component)?;
        Ok(())
    }
}

/// The metadata for a stream
#[derive(Debug, Copy, Clone)]
pub enum StreamMetadata {
    /// No specific metadata (e.g. page contents)
    None,
    /// Metadata for an Image
    Image(ImageMetadata),
}

impl ToDict for StreamMetadata {
    fn write(&self, dict: &mut PdfDict<'_, '_>) -> io::Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Image(i) => i.write(dict),
        }
    }
}
