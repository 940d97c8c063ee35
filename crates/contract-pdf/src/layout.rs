//! The page cursor
//!
//! Content is laid out top-down into a list of display operations per page.
//! Nothing is written to the PDF until the layout is complete, so the page
//! count is known when the footers are added.

use contract_model::plan::{Field, SectionKind};
use pdf_base::{common::MediaBox, content::Rgb, font::StandardFont};

use crate::text::{truncate_lines, wrap_text};

/// Page margin on all sides
pub const MARGIN: f32 = 42.0;
/// Space kept free above the bottom margin for the footer
pub const FOOTER_RESERVE: f32 = 24.0;

/// Size of running text
pub const BODY_SIZE: f32 = 9.5;
/// Size of secondary text
pub const SMALL_SIZE: f32 = 8.0;
/// Size of section titles
pub const TITLE_SIZE: f32 = 11.0;

/// Main color of titles and table headers
pub const ACCENT: Rgb = Rgb(31, 58, 96);
/// Secondary text
pub const MUTED: Rgb = Rgb(102, 102, 102);
/// Table rules and card borders
pub const RULE: Rgb = Rgb(200, 200, 200);
/// Background of banners
pub const SHADE: Rgb = Rgb(241, 243, 246);

/// Vertical distance between two lines of text at `size`
pub fn line_height(size: f32) -> f32 {
    size * 1.35
}

/// Offset from the top of a line box to the baseline
pub fn baseline_offset(size: f32) -> f32 {
    size * 1.05
}

/// Which of the document images to paint
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSlot {
    /// The logo of the issuer
    Logo,
    /// The signature of the issuer
    Signature,
}

/// A single drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// A line of text
    Text {
        /// The font
        font: StandardFont,
        /// The font size
        size: f32,
        /// The fill color
        color: Rgb,
        /// Left edge
        x: f32,
        /// Baseline, from the top of the page
        baseline: f32,
        /// The text
        text: String,
    },
    /// A straight line
    Line {
        /// Start point
        from: (f32, f32),
        /// End point
        to: (f32, f32),
        /// Line width
        width: f32,
        /// Stroke color
        color: Rgb,
    },
    /// A rectangle
    Rect {
        /// Left edge
        x: f32,
        /// Top edge
        top: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill color
        fill: Option<Rgb>,
        /// Stroke color
        stroke: Option<Rgb>,
    },
    /// One of the document images
    Image {
        /// Which image
        slot: ImageSlot,
        /// Left edge
        x: f32,
        /// Top edge
        top: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
}

/// The display list of one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOps {
    /// Operations in painting order
    pub ops: Vec<Op>,
}

impl PageOps {
    /// The text fragments on this page
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether the page paints the given image
    pub fn has_image(&self, slot: ImageSlot) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, Op::Image { slot: s, .. } if *s == slot))
    }
}

/// Where a section begins
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SectionStart {
    /// The section
    pub kind: SectionKind,
    /// Index of the page
    pub page: usize,
    /// Distance from the top of the page
    pub top: f32,
}

/// A cursor over a growing list of pages
#[derive(Debug)]
pub struct LayoutContext {
    media_box: MediaBox,
    y: f32,
    pages: Vec<PageOps>,
    current: Option<SectionKind>,
    starts: Vec<SectionStart>,
    trace: Vec<(SectionKind, Field)>,
}

/// The result of a layout
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// The pages
    pub pages: Vec<PageOps>,
    /// Where each section begins
    pub starts: Vec<SectionStart>,
    /// The optional fields that were rendered, in order
    pub trace: Vec<(SectionKind, Field)>,
}

impl LayoutContext {
    /// Start with a single empty page
    pub fn new(media_box: MediaBox) -> Self {
        Self {
            media_box,
            y: MARGIN,
            pages: vec![PageOps::default()],
            current: None,
            starts: Vec::new(),
            trace: Vec::new(),
        }
    }

    /// The size of the pages
    pub fn media_box(&self) -> MediaBox {
        self.media_box
    }

    /// The left edge of the content area
    pub fn left(&self) -> f32 {
        MARGIN
    }

    /// The right edge of the content area
    pub fn right(&self) -> f32 {
        self.media_box.width - MARGIN
    }

    /// The width of the content area
    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    /// The lowest position content may reach
    pub fn bottom(&self) -> f32 {
        self.media_box.height - MARGIN - FOOTER_RESERVE
    }

    /// The current position, from the top of the page
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move the cursor to an absolute position on the current page
    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    /// The space left on the current page
    pub fn remaining(&self) -> f32 {
        self.bottom() - self.y
    }

    /// The height of an empty page's content area
    pub fn page_capacity(&self) -> f32 {
        self.bottom() - MARGIN
    }

    /// Whether the cursor is at the top of a page
    pub fn at_top(&self) -> bool {
        self.y <= MARGIN
    }

    /// Index of the current page
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Move the cursor down
    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    /// Vertical space between blocks, dropped at the top of a page
    pub fn gap(&mut self, dy: f32) {
        if !self.at_top() {
            self.y = (self.y + dy).min(self.bottom());
        }
    }

    /// Start a new page and put the cursor at its top
    pub fn new_page(&mut self) {
        self.pages.push(PageOps::default());
        self.y = MARGIN;
        log::trace!("Starting page {}", self.pages.len());
    }

    /// Start a new page unless `space` fits on the current one
    ///
    /// Returns whether a page was started. A block that doesn't fit on an
    /// empty page is left on the current one when the cursor is at the top.
    pub fn ensure(&mut self, space: f32) -> bool {
        if self.y + space > self.bottom() && !self.at_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Mark the beginning of a section at the current position
    pub fn begin_section(&mut self, kind: SectionKind) {
        self.current = Some(kind);
        self.starts.push(SectionStart {
            kind,
            page: self.page_index(),
            top: self.y,
        });
    }

    /// Begin a section and draw its title
    ///
    /// The title is kept together with the first lines of its content.
    pub fn begin_titled_section(&mut self, kind: SectionKind, title: &str) {
        self.gap(10.0);
        self.ensure(line_height(TITLE_SIZE) + 6.0 + 3.0 * line_height(BODY_SIZE));
        self.begin_section(kind);
        let top = self.y;
        let left = self.left();
        self.text_at(StandardFont::HelveticaBold, TITLE_SIZE, ACCENT, left, top, title);
        self.advance(line_height(TITLE_SIZE) + 1.0);
        self.rule(ACCENT, 0.8);
        self.advance(5.0);
    }

    /// Note that an optional field was rendered
    pub fn record(&mut self, field: Field) {
        match self.current {
            Some(kind) => self.trace.push((kind, field)),
            None => log::debug!("Field {:?} rendered outside of a section", field),
        }
    }

    /// Add an operation to the current page
    pub fn push(&mut self, op: Op) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    /// Draw a line of text with its top at `top`
    pub fn text_at(
        &mut self,
        font: StandardFont,
        size: f32,
        color: Rgb,
        x: f32,
        top: f32,
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }
        self.push(Op::Text {
            font,
            size,
            color,
            x,
            baseline: top + baseline_offset(size),
            text: text.to_owned(),
        });
    }

    /// Draw a line of text ending at `right`
    pub fn text_right(
        &mut self,
        font: StandardFont,
        size: f32,
        color: Rgb,
        right: f32,
        top: f32,
        text: &str,
    ) {
        let x = right - font.text_width(text, size);
        self.text_at(font, size, color, x, top, text);
    }

    /// Draw a line of text centered on `center`
    pub fn text_centered(
        &mut self,
        font: StandardFont,
        size: f32,
        color: Rgb,
        center: f32,
        top: f32,
        text: &str,
    ) {
        let x = center - font.text_width(text, size) / 2.0;
        self.text_at(font, size, color, x, top, text);
    }

    /// Draw a horizontal rule at the current position
    pub fn rule(&mut self, color: Rgb, width: f32) {
        let y = self.y;
        self.push(Op::Line {
            from: (self.left(), y),
            to: (self.right(), y),
            width,
            color,
        });
    }

    /// Draw one line of text at the cursor and move below it
    pub fn write_line(&mut self, font: StandardFont, size: f32, color: Rgb, x: f32, text: &str) {
        self.ensure(line_height(size));
        let top = self.y;
        self.text_at(font, size, color, x, top, text);
        self.advance(line_height(size));
    }

    /// Wrap `text` into the column at `x` and write it line by line
    #[allow(clippy::too_many_arguments)]
    pub fn paragraph(
        &mut self,
        font: StandardFont,
        size: f32,
        color: Rgb,
        x: f32,
        width: f32,
        text: &str,
        max_lines: Option<usize>,
    ) {
        let mut lines = wrap_text(text, font, size, width);
        if let Some(max) = max_lines {
            lines = truncate_lines(lines, max, font, size, width);
        }
        for line in lines {
            self.write_line(font, size, color, x, &line);
        }
    }

    /// Write a labelled value and record its field
    ///
    /// Long values wrap under the start of the value.
    pub fn label_value(&mut self, field: Field, value: &str) {
        let label = format!("{} : ", field.label());
        let label_width = StandardFont::HelveticaBold.text_width(&label, BODY_SIZE);
        let x = self.left() + label_width;
        let lines = wrap_text(value, StandardFont::Helvetica, BODY_SIZE, self.right() - x);
        self.record(field);
        self.ensure(line_height(BODY_SIZE));
        let top = self.y;
        let left = self.left();
        self.text_at(StandardFont::HelveticaBold, BODY_SIZE, MUTED, left, top, &label);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.ensure(line_height(BODY_SIZE));
            }
            let top = self.y;
            self.text_at(StandardFont::Helvetica, BODY_SIZE, Rgb::BLACK, x, top, line);
            self.advance(line_height(BODY_SIZE));
        }
        if lines.is_empty() {
            self.advance(line_height(BODY_SIZE));
        }
    }

    /// Take the pages out of the context
    pub fn finish(self) -> Layout {
        Layout {
            pages: self.pages,
            starts: self.starts,
            trace: self.trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutContext, Op, MARGIN};
    use contract_model::plan::{Field, SectionKind};
    use pdf_base::{common::MediaBox, content::Rgb, font::StandardFont};

    #[test]
    fn ensure_breaks_pages() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        assert!(!ctx.ensure(100.0));
        ctx.set_y(ctx.bottom() - 10.0);
        assert!(ctx.ensure(20.0));
        assert_eq!(ctx.page_index(), 1);
        assert_eq!(ctx.y(), MARGIN);
        // a block taller than a page stays where it is
        assert!(!ctx.ensure(10_000.0));
        assert_eq!(ctx.page_index(), 1);
    }

    #[test]
    fn label_values_are_traced() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        ctx.begin_section(SectionKind::Project);
        ctx.label_value(Field::ProjectSurface, "120 m²");
        let layout = ctx.finish();
        assert_eq!(
            layout.trace,
            vec![(SectionKind::Project, Field::ProjectSurface)]
        );
        let texts: Vec<_> = layout.pages[0].texts().collect();
        assert_eq!(texts, vec!["Surface : ", "120 m²"]);
        assert_eq!(layout.starts[0].page, 0);
    }

    #[test]
    fn long_paragraphs_flow_over_pages() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        let text = "Lorem ipsum dolor sit amet ".repeat(400);
        ctx.paragraph(
            StandardFont::Helvetica,
            10.0,
            Rgb::BLACK,
            ctx.left(),
            ctx.content_width(),
            &text,
            None,
        );
        let layout = ctx.finish();
        assert!(layout.pages.len() > 1);
        for page in &layout.pages {
            for op in &page.ops {
                if let Op::Text { baseline, .. } = op {
                    assert!(*baseline < MediaBox::A4.height - MARGIN);
                }
            }
        }
    }

    #[test]
    fn truncated_paragraph() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        let text = "mot ".repeat(500);
        ctx.paragraph(
            StandardFont::Helvetica,
            10.0,
            Rgb::BLACK,
            ctx.left(),
            100.0,
            &text,
            Some(3),
        );
        let layout = ctx.finish();
        assert_eq!(layout.pages.len(), 1);
        assert_eq!(layout.pages[0].texts().count(), 3);
    }
}
