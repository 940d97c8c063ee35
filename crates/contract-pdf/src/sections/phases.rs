//! The phase table and the detailed description of included phases

use contract_model::{format::format_percent, model::Phase};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::{
    layout::{line_height, LayoutContext, BODY_SIZE, MUTED, SMALL_SIZE},
    table::{Align, Cell, Column, Row, Span, Table},
};

const COLUMNS: [Column; 4] = [
    Column::fixed("Code", 50.0, Align::Left),
    Column::fill("Phase"),
    Column::fixed("Incl.", 50.0, Align::Center),
    Column::fixed("%", 60.0, Align::Right),
];

const BULLET: &str = "\u{2022}";

fn phase_row(phase: &Phase, show_descriptions: bool) -> Row {
    let mut name = Cell::of(Span::bold(phase.name.clone()));
    if show_descriptions {
        if let Some(description) = &phase.description {
            name = name.with(Span::muted(description.clone()));
        }
        for deliverable in &phase.deliverables {
            name = name.with(Span::muted(format!("{} {}", BULLET, deliverable)));
        }
    }
    Row::Cells(vec![
        Cell::text(phase.code.clone()),
        name,
        Cell::of(Span::marker(phase.inclusion_marker())),
        Cell::text(format_percent(phase.percentage)),
    ])
}

/// The compact table of all phases
///
/// With `show_descriptions` unset, descriptions and deliverables are left
/// out of the table.
pub fn render_phase_table(ctx: &mut LayoutContext, phases: &[Phase], show_descriptions: bool) {
    let rows: Vec<_> = phases
        .iter()
        .map(|phase| phase_row(phase, show_descriptions))
        .collect();
    Table::new(&COLUMNS, ctx.content_width()).draw(ctx, &rows);
}

/// The full text of every included phase
pub fn render_phase_details(ctx: &mut LayoutContext, phases: &[Phase]) {
    let (left, width) = (ctx.left(), ctx.content_width());
    let indent = 12.0;
    for phase in phases.iter().filter(|p| p.is_included) {
        ctx.gap(6.0);
        ctx.ensure(line_height(BODY_SIZE) * 2.0);
        let title = format!("{} \u{2013} {}", phase.code, phase.name);
        let bold = StandardFont::HelveticaBold;
        ctx.paragraph(bold, BODY_SIZE, Rgb::BLACK, left, width, &title, None);
        if let Some(description) = &phase.description {
            let regular = StandardFont::Helvetica;
            ctx.paragraph(regular, BODY_SIZE, Rgb::BLACK, left, width, description, None);
        }
        for deliverable in &phase.deliverables {
            ctx.ensure(line_height(SMALL_SIZE));
            let top = ctx.y();
            ctx.text_at(StandardFont::Helvetica, SMALL_SIZE, MUTED, left + 2.0, top, BULLET);
            let x = left + indent;
            let regular = StandardFont::Helvetica;
            ctx.paragraph(regular, SMALL_SIZE, MUTED, x, width - indent, deliverable, None);
        }
    }
}
