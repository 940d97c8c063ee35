//! Turning the display lists into a PDF document

use std::{collections::BTreeMap, io};

use contract_model::plan::{DocumentKind, SectionKind};
use pdf_base::{
    common::{ColorSpace, ImageMetadata, MediaBox, ProcSet},
    content::Contents,
    high::{Destination, Handle, Image, Metadata, OutlineItem, Page, Resources},
};

use crate::{
    images::{DocumentImages, LoadedImage},
    layout::{ImageSlot, Layout, Op, PageOps, SectionStart},
};

fn image_key(slot: ImageSlot) -> &'static str {
    match slot {
        ImageSlot::Logo => "Logo",
        ImageSlot::Signature => "Sig",
    }
}

fn pdf_image(image: &LoadedImage) -> Image {
    Image {
        meta: ImageMetadata {
            width: image.width as usize,
            height: image.height as usize,
            color_space: ColorSpace::DeviceRGB,
            bits_per_component: 8,
        },
        data: image.rgb.clone(),
    }
}

/// Image objects are shared between the pages that paint them
struct ImageTable<'a> {
    images: &'a DocumentImages,
    ids: BTreeMap<ImageSlot, usize>,
}

impl ImageTable<'_> {
    fn id(&mut self, hnd: &mut Handle, slot: ImageSlot) -> Option<usize> {
        if let Some(id) = self.ids.get(&slot) {
            return Some(*id);
        }
        let image = self.images.get(slot)?;
        let id = hnd.push_image(pdf_image(image));
        self.ids.insert(slot, id);
        Some(id)
    }
}

fn lower_page(
    hnd: &mut Handle,
    table: &mut ImageTable,
    media_box: MediaBox,
    page: &PageOps,
) -> io::Result<Page> {
    let mut contents = Contents::new(media_box.height);
    let mut resources = Resources::default();
    for op in &page.ops {
        match op {
            Op::Text {
                font,
                size,
                color,
                x,
                baseline,
                text,
            } => {
                contents.fill_color(*color)?;
                contents.text(*font, *size, *x, *baseline, text)?;
            }
            Op::Line {
                from,
                to,
                width,
                color,
            } => {
                contents.stroke_color(*color)?;
                contents.line(*from, *to, *width)?;
            }
            Op::Rect {
                x,
                top,
                width,
                height,
                fill,
                stroke,
            } => {
                if let Some(fill) = fill {
                    contents.fill_color(*fill)?;
                    contents.fill_rect(*x, *top, *width, *height)?;
                }
                if let Some(stroke) = stroke {
                    contents.stroke_color(*stroke)?;
                    contents.stroke_rect(*x, *top, *width, *height, 0.5)?;
                }
            }
            Op::Image {
                slot,
                x,
                top,
                width,
                height,
            } => match table.id(hnd, *slot) {
                Some(id) => {
                    let key = image_key(*slot);
                    contents.image(key, *x, *top, *width, *height)?;
                    resources.x_objects.insert(key.to_owned(), id);
                }
                None => log::debug!("No image for {:?}, skipping it", slot),
            },
        }
    }
    if !resources.x_objects.is_empty() {
        resources.proc_sets.push(ProcSet::ImageC);
    }
    Ok(Page {
        media_box,
        resources,
        contents: contents.finish(),
    })
}

fn outline_item(kind: DocumentKind, start: &SectionStart, media_box: MediaBox) -> OutlineItem {
    let title = match start.kind {
        SectionKind::Cover => SectionKind::Cover.title().to_owned(),
        section => humanize_title(kind.section_title(section)),
    };
    OutlineItem {
        title,
        dest: Destination::PageFitH(start.page, media_box.height - start.top),
        children: Vec::new(),
    }
}

/// `DÉTAIL DES PHASES` becomes `Détail des phases`
fn humanize_title(title: &str) -> String {
    let lower = title.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the document from a finished layout
pub(crate) fn lower_layout(
    layout: &Layout,
    kind: DocumentKind,
    media_box: MediaBox,
    images: &DocumentImages,
    meta: Metadata,
) -> io::Result<Handle> {
    let mut hnd = Handle::new();
    hnd.meta = meta;
    let mut table = ImageTable {
        images,
        ids: BTreeMap::new(),
    };
    for page in &layout.pages {
        let page = lower_page(&mut hnd, &mut table, media_box, page)?;
        hnd.pages.push(page);
    }
    hnd.outline.children = layout
        .starts
        .iter()
        .map(|start| outline_item(kind, start, media_box))
        .collect();
    Ok(hnd)
}

#[cfg(test)]
mod tests {
    use super::humanize_title;

    #[test]
    fn outline_titles() {
        assert_eq!(humanize_title("DÉTAIL DES PHASES"), "Détail des phases");
        assert_eq!(humanize_title("ÉCHÉANCIER DE PAIEMENT"), "Échéancier de paiement");
        assert_eq!(humanize_title(""), "");
    }
}
