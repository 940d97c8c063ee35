//! Low-Level API
//!
//! This module contains structs and enums for representing a PDF
//! that is already split up into objects with opaque reference IDs.

use std::io::{self, Write};

use flate2::{write::ZlibEncoder, Compression};

use crate::{
    common::{Dict, ObjRef, PdfString, ProcSet, Rectangle, StreamMetadata},
    write::{Formatter, PdfName, Serialize},
};

/// Destination of a GoTo action
#[derive(Debug, Clone)]
pub enum Destination {
    /// Page @0, fit the page into view and scroll to height {1}
    PageFitH(ObjRef, f32),
}

/// A PDF action
#[derive(Debug, Clone)]
pub enum Action {
    /// Go to some destination within the document
    GoTo(Destination),
}

impl Serialize for Destination {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        match self {
            Self::PageFitH(r, top) => f
                .pdf_arr()
                .entry(r)?
                .entry(&PdfName("FitH"))?
                .entry(top)?
                .finish(),
        }
    }
}

/// The root outline item
#[derive(Debug, Clone)]
pub struct Outline {
    /// The first item
    pub first: ObjRef,
    /// The last item
    pub last: ObjRef,
    /// The total amount of visible items
    pub count: usize,
}

impl Serialize for Outline {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Outlines"))?
            .field("First", &self.first)?
            .field("Last", &self.last)?
            .field("Count", &self.count)?
            .finish()
    }
}

/// A child outline item
#[derive(Debug, Clone)]
pub struct OutlineItem {
    /// The title of the outline item
    pub title: PdfString,
    /// The parent of this item
    pub parent: ObjRef,
    /// The previous sibling
    pub prev: Option<ObjRef>,
    /// The next sibling
    pub next: Option<ObjRef>,
    /// The first child
    pub first: Option<ObjRef>,
    /// The last child
    pub last: Option<ObjRef>,
    /// The total amount of open children
    pub count: usize,
    /// The destination to be used
    pub action: Action,
}

impl Serialize for OutlineItem {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut dict = f.pdf_dict();
        dict.field("Title", &self.title)?
            .field("Parent", &self.parent)?
            .opt_field("Prev", &self.prev)?
            .opt_field("Next", &self.next)?
            .opt_field("First", &self.first)?
            .opt_field("Last", &self.last)?;
        if self.count > 0 {
            dict.field("Count", &self.count)?;
        }
        match &self.action {
            Action::GoTo(dest) => dict.field("Dest", dest),
        }?;
        dict.finish()
    }
}

/// A page object
pub struct Page<'a> {
    /// Reference to the parent
    pub parent: ObjRef,
    /// The content stream of the page
    pub contents: ObjRef,
    /// The resources of this page
    pub resources: Resources<'a>,
    /// Describes the bound of the physical page in default user units
    pub media_box: Rectangle<f32>,
}

impl Serialize for Page<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Page"))?
            .field("Parent", &self.parent)?
            .field("MediaBox", &self.media_box)?
            .field("Resources", &self.resources)?
            .field("Contents", &self.contents)?
            .finish()
    }
}

/// The resources of a page
pub struct Resources<'a> {
    /// Reference to the shared font dict
    pub font: ObjRef,
    /// A dict of embedded object resources
    pub x_object: Dict<ObjRef>,
    /// A set of valid procedures
    pub proc_set: &'a [ProcSet],
}

impl Serialize for Resources<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut dict = f.pdf_dict();
        dict.field("Font", &self.font)?;
        if !self.x_object.is_empty() {
            dict.field("XObject", &self.x_object)?;
        }
        dict.arr_field("ProcSet", self.proc_set)?.finish()
    }
}

/// The list of pages
pub struct Pages {
    /// References to the individual pages
    pub kids: Vec<ObjRef>,
}

impl Serialize for Pages {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Pages"))?
            .field("Count", &self.kids.len())?
            .field("Kids", &self.kids)?
            .finish()
    }
}

/// A data stream that is written as-is
pub struct Stream<'a> {
    /// The (unencoded) data
    pub data: &'a [u8],
    /// Additional metadata
    pub meta: StreamMetadata,
}

impl Serialize for Stream<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut len = self.data.len();
        if self.data.ends_with(&[0x0a]) {
            len -= 1;
        }
        f.pdf_dict()
            .embed(&self.meta)?
            .field("Length", &len)?
            .finish()?;
        f.pdf_stream(self.data)?;
        Ok(())
    }
}

/// A stream that is compressed with `FlateDecode`
pub struct FlateStream<'a> {
    /// The (unencoded) data of this stream
    pub data: &'a [u8],
    /// The associated metadata
    pub meta: StreamMetadata,
}

impl Serialize for FlateStream<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let mut e = ZlibEncoder::new(Vec::new(), Compression::best());
        e.write_all(self.data)?;
        let mut buf = e.finish()?;
        let len = buf.len();
        buf.push(10);
        f.pdf_dict()
            .embed(&self.meta)?
            .field("Length", &len)?
            .field("Filter", &PdfName("FlateDecode"))?
            .finish()?;
        f.pdf_stream(&buf)?;
        Ok(())
    }
}

/// How the document should be displayed when opened
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PageMode {
    /// Neither outline nor thumbnails
    UseNone,
    /// Show the document outline
    UseOutlines,
}

impl Serialize for PageMode {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        match self {
            Self::UseNone => PdfName("UseNone").write(f),
            Self::UseOutlines => PdfName("UseOutlines").write(f),
        }
    }
}

/// The catalog/root of the document
pub struct Catalog {
    /// Reference to the list of pages
    pub pages: ObjRef,
    /// Optional reference to the outline
    pub outline: Option<ObjRef>,
    /// The initial display of the document
    pub page_mode: Option<PageMode>,
}

impl Serialize for Catalog {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Type", &PdfName("Catalog"))?
            .field("Pages", &self.pages)?
            .opt_field("Outlines", &self.outline)?
            .opt_field("PageMode", &self.page_mode)?
            .finish()
    }
}

/// The structure that holds the document IDs.
#[allow(clippy::upper_case_acronyms)]
pub struct ID {
    /// The ID for the original (gen 0) document
    pub original: md5::Digest,
    /// The ID for the current generation of the document
    pub current: md5::Digest,
}

impl Serialize for ID {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_arr()
            .entry(&self.original)?
            .entry(&self.current)?
            .finish()
    }
}

/// The trailer of the document
pub struct Trailer {
    /// The size of the document / number of objects
    pub size: usize,
    /// Optional reference to the info struct
    pub info: Option<ObjRef>,
    /// Reference to the root/catalog
    pub root: ObjRef,
    /// The ID String
    pub id: ID,
}

impl Serialize for Trailer {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .field("Size", &self.size)?
            .opt_field("Info", &self.info)?
            .field("Root", &self.root)?
            .field("ID", &self.id)?
            .finish()
    }
}
