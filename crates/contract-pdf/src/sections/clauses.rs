use contract_model::{model::Clause, plan::Field};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::layout::{line_height, LayoutContext, ACCENT, BODY_SIZE};

/// Each clause with its humanized title and full text
pub fn render_clauses(ctx: &mut LayoutContext, clauses: &[Clause]) {
    let (left, width) = (ctx.left(), ctx.content_width());
    for clause in clauses {
        ctx.gap(6.0);
        ctx.ensure(line_height(BODY_SIZE) * 3.0);
        let bold = StandardFont::HelveticaBold;
        ctx.paragraph(bold, BODY_SIZE, ACCENT, left, width, &clause.title(), None);
        let regular = StandardFont::Helvetica;
        ctx.paragraph(regular, BODY_SIZE, Rgb::BLACK, left, width, &clause.text, None);
    }
}

/// Labelled rows, such as the insurance or the conditions of a quote
pub fn render_rows(ctx: &mut LayoutContext, rows: &[(Field, String)]) {
    for (field, value) in rows {
        ctx.label_value(*field, value);
    }
}
