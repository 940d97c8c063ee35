//! Tables whose header is repeated on every page they span

use contract_model::model::INCLUDED_MARK;
use pdf_base::{content::Rgb, font::StandardFont};

use crate::{
    layout::{line_height, LayoutContext, Op, ACCENT, BODY_SIZE, MUTED, RULE, SHADE, SMALL_SIZE},
    text::wrap_text,
};

const PAD_X: f32 = 4.0;
const PAD_Y: f32 = 3.5;

/// Horizontal alignment within a cell
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    /// Flush left
    Left,
    /// Centered
    Center,
    /// Flush right
    Right,
}

/// How wide a column is
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Width {
    /// A fixed width in points
    Fixed(f32),
    /// An equal share of the width the fixed columns leave
    Fill,
}

/// A column of a table
#[derive(Debug, Copy, Clone)]
pub struct Column {
    /// The header text
    pub header: &'static str,
    /// The width
    pub width: Width,
    /// The alignment of header and cells
    pub align: Align,
}

impl Column {
    /// A column that takes the remaining width
    pub const fn fill(header: &'static str) -> Self {
        Self {
            header,
            width: Width::Fill,
            align: Align::Left,
        }
    }

    /// A column of fixed width
    pub const fn fixed(header: &'static str, width: f32, align: Align) -> Self {
        Self {
            header,
            width: Width::Fixed(width),
            align,
        }
    }
}

/// A run of text in a single style
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text, wrapped to the cell width
    pub text: String,
    /// The font
    pub font: StandardFont,
    /// The size
    pub size: f32,
    /// The color
    pub color: Rgb,
}

impl Span {
    fn new(text: impl Into<String>, font: StandardFont, size: f32, color: Rgb) -> Self {
        Self {
            text: text.into(),
            font,
            size,
            color,
        }
    }

    /// Body text
    pub fn regular(text: impl Into<String>) -> Self {
        Self::new(text, StandardFont::Helvetica, BODY_SIZE, Rgb::BLACK)
    }

    /// Bold body text
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, StandardFont::HelveticaBold, BODY_SIZE, Rgb::BLACK)
    }

    /// Slanted body text
    pub fn oblique(text: impl Into<String>) -> Self {
        Self::new(text, StandardFont::HelveticaOblique, BODY_SIZE, Rgb::BLACK)
    }

    /// Small secondary text
    pub fn muted(text: impl Into<String>) -> Self {
        Self::new(text, StandardFont::Helvetica, SMALL_SIZE, MUTED)
    }

    /// An inclusion marker
    ///
    /// The check mark only exists in the dingbats font.
    pub fn marker(text: &'static str) -> Self {
        if text == INCLUDED_MARK {
            Self::new(text, StandardFont::ZapfDingbats, BODY_SIZE, ACCENT)
        } else {
            Self::new(text, StandardFont::Helvetica, SMALL_SIZE, MUTED)
        }
    }
}

/// The content of a cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// The runs, each starting on a new line
    pub spans: Vec<Span>,
}

impl Cell {
    /// An empty cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// A cell with a single run
    pub fn of(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    /// A cell of body text
    pub fn text(text: impl Into<String>) -> Self {
        Self::of(Span::regular(text))
    }

    /// Add a run below the existing ones, if it has any text
    pub fn with(mut self, span: Span) -> Self {
        if !span.text.trim().is_empty() {
            self.spans.push(span);
        }
        self
    }
}

/// A row of a table
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// One cell per column
    Cells(Vec<Cell>),
    /// A shaded cell across the whole width
    Banner(Cell),
}

struct LaidLine<'a> {
    span: &'a Span,
    text: String,
}

struct LaidCell<'a> {
    lines: Vec<LaidLine<'a>>,
}

impl<'a> LaidCell<'a> {
    fn layout(cell: &'a Cell, width: f32) -> Self {
        let lines = cell
            .spans
            .iter()
            .flat_map(|span| {
                wrap_text(&span.text, span.font, span.size, width)
                    .into_iter()
                    .map(move |text| LaidLine { span, text })
            })
            .collect();
        Self { lines }
    }

    fn height(&self) -> f32 {
        self.lines.iter().map(|l| line_height(l.span.size)).sum()
    }

    /// Move the lines below `max_height` into a new cell, keeping at least one
    fn split_off(&mut self, max_height: f32) -> Self {
        let mut height = 0.0;
        let at = self
            .lines
            .iter()
            .position(|l| {
                height += line_height(l.span.size);
                height > max_height
            })
            .unwrap_or(self.lines.len())
            .max(1)
            .min(self.lines.len());
        Self {
            lines: self.lines.split_off(at),
        }
    }
}

/// A table layout for a fixed set of columns
pub struct Table<'a> {
    columns: &'a [Column],
    widths: Vec<f32>,
}

impl<'a> Table<'a> {
    /// Distribute `total_width` over the columns
    pub fn new(columns: &'a [Column], total_width: f32) -> Self {
        let fixed: f32 = columns
            .iter()
            .filter_map(|c| match c.width {
                Width::Fixed(w) => Some(w),
                Width::Fill => None,
            })
            .sum();
        let fill_count = columns.iter().filter(|c| c.width == Width::Fill).count();
        let share = if fill_count > 0 {
            ((total_width - fixed) / fill_count as f32).max(0.0)
        } else {
            0.0
        };
        let widths = columns
            .iter()
            .map(|c| match c.width {
                Width::Fixed(w) => w,
                Width::Fill => share,
            })
            .collect();
        Self { columns, widths }
    }

    /// The width of a column
    pub fn width(&self, index: usize) -> f32 {
        self.widths[index]
    }

    fn total_width(&self) -> f32 {
        self.widths.iter().sum()
    }

    fn header_height(&self) -> f32 {
        line_height(SMALL_SIZE) + 2.0 * PAD_Y
    }

    fn draw_header(&self, ctx: &mut LayoutContext) {
        let top = ctx.y();
        let height = self.header_height();
        ctx.push(Op::Rect {
            x: ctx.left(),
            top,
            width: self.total_width(),
            height,
            fill: Some(ACCENT),
            stroke: None,
        });
        let mut x = ctx.left();
        for (column, width) in self.columns.iter().zip(&self.widths) {
            let font = StandardFont::HelveticaBold;
            let text_width = font.text_width(column.header, SMALL_SIZE);
            let tx = aligned(column.align, x, *width, text_width);
            ctx.text_at(font, SMALL_SIZE, Rgb::WHITE, tx, top + PAD_Y, column.header);
            x += width;
        }
        ctx.advance(height);
    }

    /// Draw the header and the rows
    ///
    /// The header is repeated at the top of every page the table continues
    /// on. Without rows, only the header is drawn. A row taller than a page
    /// is split between lines and continues on the next page.
    pub fn draw(&self, ctx: &mut LayoutContext, rows: &[Row]) {
        let max_row = ctx.page_capacity() - self.header_height();
        let min_piece = line_height(BODY_SIZE) + 2.0 * PAD_Y;
        let laid: Vec<_> = rows.iter().map(|row| self.layout_row(row)).collect();
        let first = laid.first().map_or(0.0, |row| row.height().min(max_row));
        ctx.ensure(self.header_height() + first);
        self.draw_header(ctx);
        for mut row in laid {
            loop {
                let height = row.height();
                if height <= max_row {
                    if ctx.ensure(height) {
                        self.draw_header(ctx);
                    }
                    self.draw_row(ctx, &row, height);
                    break;
                }
                if ctx.ensure(min_piece) {
                    self.draw_header(ctx);
                }
                let rest = row.split_off(ctx.remaining() - 2.0 * PAD_Y);
                let height = row.height();
                self.draw_row(ctx, &row, height);
                match rest {
                    Some(rest) => {
                        log::debug!("Continuing a table row on page {}", ctx.page_index() + 2);
                        ctx.new_page();
                        self.draw_header(ctx);
                        row = rest;
                    }
                    None => break,
                }
            }
        }
    }

    fn layout_row<'r>(&self, row: &'r Row) -> LaidRow<'r> {
        match row {
            Row::Cells(cells) => LaidRow::Cells(
                cells
                    .iter()
                    .zip(&self.widths)
                    .map(|(cell, w)| LaidCell::layout(cell, w - 2.0 * PAD_X))
                    .collect(),
            ),
            Row::Banner(cell) => {
                LaidRow::Banner(LaidCell::layout(cell, self.total_width() - 2.0 * PAD_X))
            }
        }
    }

    fn draw_row(&self, ctx: &mut LayoutContext, row: &LaidRow, height: f32) {
        let top = ctx.y();
        let left = ctx.left();
        match row {
            LaidRow::Cells(cells) => {
                let mut x = left;
                for ((cell, width), column) in cells.iter().zip(&self.widths).zip(self.columns) {
                    draw_cell(ctx, cell, column.align, x, *width, top);
                    x += width;
                }
            }
            LaidRow::Banner(cell) => {
                ctx.push(Op::Rect {
                    x: left,
                    top,
                    width: self.total_width(),
                    height,
                    fill: Some(SHADE),
                    stroke: None,
                });
                draw_cell(ctx, cell, Align::Left, left, self.total_width(), top);
            }
        }
        ctx.push(Op::Line {
            from: (left, top + height),
            to: (left + self.total_width(), top + height),
            width: 0.4,
            color: RULE,
        });
        ctx.advance(height);
    }
}

enum LaidRow<'a> {
    Cells(Vec<LaidCell<'a>>),
    Banner(LaidCell<'a>),
}

impl LaidRow<'_> {
    fn height(&self) -> f32 {
        let content = match self {
            Self::Cells(cells) => cells.iter().map(LaidCell::height).fold(0.0, f32::max),
            Self::Banner(cell) => cell.height(),
        };
        content.max(line_height(BODY_SIZE)) + 2.0 * PAD_Y
    }

    /// Split off what doesn't fit into `max_content`, if anything
    fn split_off(&mut self, max_content: f32) -> Option<Self> {
        let rest = match self {
            Self::Cells(cells) => {
                let rest: Vec<_> = cells.iter_mut().map(|c| c.split_off(max_content)).collect();
                if rest.iter().all(|c| c.lines.is_empty()) {
                    return None;
                }
                Self::Cells(rest)
            }
            Self::Banner(cell) => {
                let rest = cell.split_off(max_content);
                if rest.lines.is_empty() {
                    return None;
                }
                Self::Banner(rest)
            }
        };
        Some(rest)
    }
}

fn aligned(align: Align, x: f32, width: f32, text_width: f32) -> f32 {
    match align {
        Align::Left => x + PAD_X,
        Align::Center => x + (width - text_width) / 2.0,
        Align::Right => x + width - PAD_X - text_width,
    }
}

fn draw_cell(ctx: &mut LayoutContext, cell: &LaidCell, align: Align, x: f32, width: f32, top: f32) {
    let mut y = top + PAD_Y;
    for line in &cell.lines {
        let span = line.span;
        let text_width = span.font.text_width(&line.text, span.size);
        let tx = aligned(align, x, width, text_width);
        ctx.text_at(span.font, span.size, span.color, tx, y, &line.text);
        y += line_height(span.size);
    }
}

#[cfg(test)]
mod tests {
    use super::{Align, Cell, Column, Row, Span, Table};
    use crate::layout::{LayoutContext, Op};
    use pdf_base::{common::MediaBox, font::StandardFont};

    const COLUMNS: [Column; 2] = [
        Column::fill("Désignation"),
        Column::fixed("Montant HT", 80.0, Align::Right),
    ];

    fn headers(ctx: LayoutContext) -> Vec<usize> {
        ctx.finish()
            .pages
            .iter()
            .map(|p| p.texts().filter(|t| *t == "Désignation").count())
            .collect()
    }

    #[test]
    fn widths() {
        let table = Table::new(&COLUMNS, 500.0);
        assert_eq!(table.width(0), 420.0);
        assert_eq!(table.width(1), 80.0);
    }

    #[test]
    fn empty_table_has_a_header() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        Table::new(&COLUMNS, ctx.content_width()).draw(&mut ctx, &[]);
        assert_eq!(headers(ctx), vec![1]);
    }

    #[test]
    fn header_repeats_on_each_page() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        let rows: Vec<_> = (0..120)
            .map(|i| {
                Row::Cells(vec![
                    Cell::text(format!("Ligne {}", i)),
                    Cell::text("10,00 €"),
                ])
            })
            .collect();
        Table::new(&COLUMNS, ctx.content_width()).draw(&mut ctx, &rows);
        let counts = headers(ctx);
        assert!(counts.len() >= 3);
        assert!(counts.iter().all(|c| *c == 1));
    }

    #[test]
    fn tall_rows_continue_on_the_next_page() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        let description = (0..2000)
            .map(|i| format!("mot{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        let rows = [Row::Cells(vec![
            Cell::text("Mission complète").with(Span::regular(description)),
            Cell::text("10,00 €"),
        ])];
        Table::new(&COLUMNS, ctx.content_width()).draw(&mut ctx, &rows);
        let layout = ctx.finish();
        assert!(layout.pages.len() >= 2);
        let texts: Vec<_> = layout.pages.iter().flat_map(|p| p.texts()).collect();
        assert!(texts.iter().any(|t| t.contains("mot0 ")));
        assert!(texts.iter().any(|t| t.ends_with("mot1999")));
        assert_eq!(texts.iter().filter(|t| **t == "10,00 €").count(), 1);
        assert!(layout
            .pages
            .iter()
            .all(|p| p.texts().filter(|t| *t == "Désignation").count() == 1));
    }

    #[test]
    fn markers_use_dingbats() {
        let mut ctx = LayoutContext::new(MediaBox::A4);
        let rows = [Row::Cells(vec![
            Cell::of(Span::marker("\u{2713}")),
            Cell::empty(),
        ])];
        Table::new(&COLUMNS, ctx.content_width()).draw(&mut ctx, &rows);
        let layout = ctx.finish();
        assert!(layout.pages[0].ops.iter().any(|op| matches!(
            op,
            Op::Text { font: StandardFont::ZapfDingbats, text, .. } if text == "\u{2713}"
        )));
    }
}
