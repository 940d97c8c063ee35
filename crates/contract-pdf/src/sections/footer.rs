use pdf_base::{common::MediaBox, content::Rgb, font::StandardFont};

use crate::layout::{baseline_offset, Op, PageOps, MARGIN, MUTED, RULE, SMALL_SIZE};

/// The page counter, e.g. `2/5`
pub fn page_label(index: usize, count: usize) -> String {
    format!("{}/{}", index + 1, count)
}

/// Add the footer to every page after the cover
///
/// The counter counts the cover, so the first footer reads `2/N`.
pub fn apply_footers(pages: &mut [PageOps], media_box: MediaBox, issuer_line: &str) {
    let count = pages.len();
    let left = MARGIN;
    let right = media_box.width - MARGIN;
    let top = media_box.height - MARGIN - SMALL_SIZE;
    let baseline = top + baseline_offset(SMALL_SIZE);
    let font = StandardFont::Helvetica;
    for (index, page) in pages.iter_mut().enumerate().skip(1) {
        let counter = page_label(index, count);
        page.ops.push(Op::Line {
            from: (left, top - 6.0),
            to: (right, top - 6.0),
            width: 0.4,
            color: RULE,
        });
        page.ops.push(Op::Text {
            font,
            size: SMALL_SIZE,
            color: MUTED,
            x: left,
            baseline,
            text: issuer_line.to_owned(),
        });
        page.ops.push(Op::Text {
            font,
            size: SMALL_SIZE,
            color: Rgb::BLACK,
            x: right - font.text_width(&counter, SMALL_SIZE),
            baseline,
            text: counter,
        });
    }
}
