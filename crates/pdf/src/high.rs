//! High-Level API

use std::{
    io::{self, Write},
    str::FromStr,
};

use chrono::{DateTime, FixedOffset};

use crate::{
    common::{Dict, ImageMetadata, MediaBox, PdfString, ProcSet, StreamMetadata},
    encoding::pdf_doc_encode_lossy,
    font::{FontDict, StandardFont},
    low::{self, PageMode, ID},
    lowering::{lower_outline_items, make_ref, LowerBox},
    util::NextId,
    write::{Formatter, Serialize},
};

/// A single page
#[derive(Debug, Clone)]
pub struct Page {
    /// The dimensions of the page
    pub media_box: MediaBox,
    /// The resource used within the page
    pub resources: Resources,
    /// The content stream of the page
    pub contents: Vec<u8>,
}

/// The resources of a page
///
/// All pages share the dict of standard fonts, so only the images need to
/// be listed here.
#[derive(Debug, Clone)]
pub struct Resources {
    /// Map from the key used in the content stream to an index in [`Handle::images`]
    pub x_objects: Dict<usize>,
    /// The procedure sets
    pub proc_sets: Vec<ProcSet>,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            x_objects: Dict::new(),
            proc_sets: vec![ProcSet::PDF, ProcSet::Text],
        }
    }
}

/// An uncompressed raster image
#[derive(Debug, Clone)]
pub struct Image {
    /// Width, height and color space
    pub meta: ImageMetadata,
    /// The samples, row by row
    pub data: Vec<u8>,
}

/// The Metadata/Info
#[derive(Debug, Default, Clone)]
pub struct Metadata {
    /// The title
    pub title: Option<String>,
    /// The author
    pub author: Option<String>,
    /// The subject
    pub subject: Option<String>,
    /// A list of keywords
    pub keywords: Vec<String>,
    /// The program used to create the source
    pub creator: Option<String>,
    /// The program that produced the file
    pub producer: String,
    /// The date of creation
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl Metadata {
    /// Check whether the info contains any meaningful data
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_empty()
            && self.creator.is_none()
            && self.producer.is_empty()
    }
}

/// The `/Info` dictionary
#[derive(Debug, Default)]
pub struct Info {
    /// The title
    pub title: Option<PdfString>,
    /// The author
    pub author: Option<PdfString>,
    /// The subject
    pub subject: Option<PdfString>,
    /// A list of keywords
    pub keywords: Option<PdfString>,
    /// The program used to create the source
    pub creator: Option<PdfString>,
    /// The program that produced the file
    pub producer: Option<PdfString>,
    /// The date of creation
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// The date of the last modification
    pub mod_date: Option<DateTime<FixedOffset>>,
}

impl Serialize for Info {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_dict()
            .opt_field("Title", &self.title)?
            .opt_field("Author", &self.author)?
            .opt_field("Subject", &self.subject)?
            .opt_field("Keywords", &self.keywords)?
            .opt_field("Creator", &self.creator)?
            .opt_field("Producer", &self.producer)?
            .opt_field("CreationDate", &self.creation_date)?
            .opt_field("ModDate", &self.mod_date)?
            .finish()
    }
}

/// Information for the Outline of the document
#[derive(Debug, Clone, Default)]
pub struct Outline {
    /// Immediate children of this item
    pub children: Vec<OutlineItem>,
}

/// One item in the outline
#[derive(Debug, Clone)]
pub struct OutlineItem {
    /// The title of the outline item
    pub title: String,
    /// The destination to navigate to
    pub dest: Destination,
    /// Immediate children of this item
    pub children: Vec<OutlineItem>,
}

/// A destination of a GoTo Action
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Destination {
    /// Scroll to page {0} at height {1} (in PDF units, from the bottom)
    PageFitH(usize, f32),
}

/// Entrypoint to the high-level API
///
/// Create a new handle to start a PDF document
#[derive(Debug, Default)]
pub struct Handle {
    /// The metadata of this document
    pub meta: Metadata,
    /// The images that may be referenced by pages
    pub images: Vec<Image>,
    /// The outline
    pub outline: Outline,
    /// The pages
    pub pages: Vec<Page>,
}

fn pdf_string_of(o: &Option<String>) -> Option<PdfString> {
    o.as_deref().map(lossy_pdf_string)
}

fn lossy_pdf_string(s: &str) -> PdfString {
    PdfString::from_str(s).unwrap_or_else(|e| {
        log::debug!("{}, replacing it", e);
        PdfString::new(&pdf_doc_encode_lossy(s))
    })
}

impl Handle {
    /// Creates a new handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image and return its index for [`Resources::x_objects`]
    pub fn push_image(&mut self, image: Image) -> usize {
        let index = self.images.len();
        log::debug!(
            "Adding image #{} ({}x{})",
            index,
            image.meta.width,
            image.meta.height
        );
        self.images.push(image);
        index
    }

    /// Write the whole PDF to the given writer
    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut fmt = Formatter::new(w);
        let mut id_gen = NextId::new(1);
        let mut images = LowerBox::new(&self.images);

        // Start
        writeln!(fmt.inner, "%PDF-1.4")?;
        fmt.inner.write_all(&[b'%', 180, 200, 220, 240, b'\n'])?;

        // Catalog ID
        let catalog_id = id_gen.next();

        // **Info**
        let info_ref = if self.meta.is_empty() {
            None
        } else {
            let r = make_ref(id_gen.next());
            let keywords = if self.meta.keywords.is_empty() {
                None
            } else {
                Some(lossy_pdf_string(&self.meta.keywords.join(", ")))
            };
            let info = Info {
                title: pdf_string_of(&self.meta.title),
                author: pdf_string_of(&self.meta.author),
                subject: pdf_string_of(&self.meta.subject),
                keywords,
                creator: pdf_string_of(&self.meta.creator),
                producer: Some(lossy_pdf_string(&self.meta.producer)),
                creation_date: self.meta.creation_date,
                mod_date: self.meta.creation_date,
            };
            fmt.obj(r, &info)?;
            Some(r)
        };

        // **Fonts**
        let font_dict_ref = make_ref(id_gen.next());
        let mut font_dict = Dict::new();
        for font in StandardFont::ALL {
            let r = make_ref(id_gen.next());
            fmt.obj(r, &FontDict(font))?;
            font_dict.insert(font.resource_key().to_owned(), r);
        }
        fmt.obj(font_dict_ref, &font_dict)?;

        // **Pages**
        let mut pages = low::Pages { kids: vec![] };
        let pages_ref = make_ref(id_gen.next());

        for page in &self.pages {
            let page_ref = make_ref(id_gen.next());
            let contents_ref = make_ref(id_gen.next());

            let contents = low::FlateStream {
                data: &page.contents,
                meta: StreamMetadata::None,
            };
            fmt.obj(contents_ref, &contents)?;

            let mut x_object = Dict::new();
            for (key, index) in &page.resources.x_objects {
                let r = images.map_ref(*index, &mut id_gen)?;
                x_object.insert(key.clone(), r);
            }

            let page_low = low::Page {
                parent: pages_ref,
                resources: low::Resources {
                    font: font_dict_ref,
                    x_object,
                    proc_set: &page.resources.proc_sets,
                },
                contents: contents_ref,
                media_box: page.media_box.into(),
            };
            fmt.obj(page_ref, &page_low)?;
            pages.kids.push(page_ref);
        }

        for (x_ref, image) in images.store_values() {
            let stream = low::FlateStream {
                data: &image.data,
                meta: StreamMetadata::Image(image.meta),
            };
            fmt.obj(x_ref, &stream)?;
        }

        fmt.obj(pages_ref, &pages)?;

        // **Outline**
        let outline_ref = match self.outline.children.is_empty() {
            true => None,
            false => {
                let mut acc = Vec::new();
                let outline_ref = make_ref(id_gen.next());
                let lowered = lower_outline_items(
                    &mut acc,
                    &pages.kids,
                    &self.outline.children,
                    outline_ref,
                    &mut id_gen,
                )?;
                for (r, item) in &acc {
                    fmt.obj(*r, item)?;
                }
                if let Some((first, last)) = lowered {
                    let outline = low::Outline {
                        first,
                        last,
                        count: self.outline.children.len(),
                    };
                    fmt.obj(outline_ref, &outline)?;
                }
                Some(outline_ref)
            }
        };

        // **Catalog**
        let catalog = low::Catalog {
            pages: pages_ref,
            page_mode: outline_ref.map(|_| PageMode::UseOutlines),
            outline: outline_ref,
        };
        let catalog_ref = make_ref(catalog_id);
        fmt.obj(catalog_ref, &catalog)?;

        // **xref**
        let startxref = fmt.xref()?;
        let id = self.compute_id(&fmt);

        writeln!(fmt.inner, "trailer")?;

        let trailer = low::Trailer {
            size: fmt.xref.len(),
            root: catalog_ref,
            info: info_ref,
            id,
        };
        trailer.write(&mut fmt)?;

        writeln!(fmt.inner, "startxref")?;
        writeln!(fmt.inner, "{}", startxref)?;
        writeln!(fmt.inner, "%%EOF")?;

        Ok(())
    }

    /// Write the whole PDF into a buffer
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    // Consume for the ID
    fn compute_id(&self, fmt: &Formatter) -> ID {
        let mut id_ctx = md5::Context::new();

        // - The time of creation
        if let Some(date) = &self.meta.creation_date {
            id_ctx.consume(date.to_rfc3339());
        }

        // - The size of the file in bytes
        let len = fmt.bytes_written();
        id_ctx.consume(len.to_ne_bytes());

        // - The values of all entries in the file’s document information dictionary
        for a in [&self.meta.title, &self.meta.author, &self.meta.subject]
            .into_iter()
            .flatten()
        {
            id_ctx.consume(a.as_bytes());
        }
        for kw in &self.meta.keywords {
            id_ctx.consume(kw.as_bytes());
        }
        if let Some(a) = &self.meta.creator {
            id_ctx.consume(a.as_bytes());
        }
        id_ctx.consume(self.meta.producer.as_bytes());

        let digest = id_ctx.compute();
        ID {
            original: digest,
            current: digest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Destination, Handle, Metadata, OutlineItem, Page, Resources};
    use crate::common::MediaBox;

    fn page() -> Page {
        Page {
            media_box: MediaBox::A4,
            resources: Resources::default(),
            contents: b"BT /F1 12 Tf 72 770 Td (Hello) Tj ET\n".to_vec(),
        }
    }

    #[test]
    fn writes_a_complete_file() {
        let mut doc = Handle::new();
        doc.meta = Metadata {
            title: Some("Contrat".to_owned()),
            producer: "pdf-base".to_owned(),
            ..Metadata::default()
        };
        doc.pages.push(page());
        doc.pages.push(page());
        doc.outline.children.push(OutlineItem {
            title: "Signatures".to_owned(),
            dest: Destination::PageFitH(1, 841.89),
            children: vec![],
        });

        let bytes = doc.to_bytes().unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(text.trim_end().ends_with("%%EOF"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Title(Contrat)"));
        assert!(text.contains("/BaseFont/Helvetica-Bold"));
        assert!(text.contains("/PageMode/UseOutlines"));
        assert!(text.contains("/Title(Signatures)"));
    }

    #[test]
    fn outline_to_missing_page_fails() {
        let mut doc = Handle::new();
        doc.pages.push(page());
        doc.outline.children.push(OutlineItem {
            title: "Nowhere".to_owned(),
            dest: Destination::PageFitH(4, 0.0),
            children: vec![],
        });
        assert!(doc.to_bytes().is_err());
    }
}
