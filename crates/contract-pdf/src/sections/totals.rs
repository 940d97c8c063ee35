//! The totals box and the payment schedule

use contract_model::{
    format::{format_currency, format_percent},
    model::{PaymentStage, Totals},
};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::{
    layout::{line_height, LayoutContext, Op, ACCENT, BODY_SIZE, RULE, SHADE},
    table::{Align, Cell, Column, Row, Table},
};

const BOX_WIDTH: f32 = 230.0;
const PAD: f32 = 6.0;

const SCHEDULE_COLUMNS: [Column; 5] = [
    Column::fixed("Étape", 90.0, Align::Left),
    Column::fixed("Phase", 50.0, Align::Left),
    Column::fill("Description"),
    Column::fixed("%", 55.0, Align::Right),
    Column::fixed("Montant HT", 85.0, Align::Right),
];

/// The right-aligned box with the totals
pub fn render_totals(ctx: &mut LayoutContext, totals: &Totals) {
    let row = line_height(BODY_SIZE) + 4.0;
    let height = 3.0 * row + 2.0 * PAD + 4.0;
    ctx.ensure(height);
    let top = ctx.y();
    let x = ctx.right() - BOX_WIDTH;
    ctx.push(Op::Rect {
        x,
        top,
        width: BOX_WIDTH,
        height,
        fill: Some(SHADE),
        stroke: Some(RULE),
    });
    let regular = StandardFont::Helvetica;
    let bold = StandardFont::HelveticaBold;
    let right = ctx.right() - PAD;
    let mut y = top + PAD;
    let rows = [
        ("Total HT".to_owned(), totals.total_ht),
        (totals.tva_label(), totals.tva_amount),
    ];
    for (label, amount) in &rows {
        ctx.text_at(regular, BODY_SIZE, Rgb::BLACK, x + PAD, y, label);
        let amount = format_currency(*amount);
        ctx.text_right(regular, BODY_SIZE, Rgb::BLACK, right, y, &amount);
        y += row;
    }
    ctx.push(Op::Line {
        from: (x + PAD, y),
        to: (right, y),
        width: 0.6,
        color: ACCENT,
    });
    y += 4.0;
    ctx.text_at(bold, 10.5, ACCENT, x + PAD, y, "Total TTC");
    let total = format_currency(totals.total_ttc);
    ctx.text_right(bold, 10.5, ACCENT, right, y, &total);
    ctx.advance(height);
}

/// The payment schedule, with amounts computed from the total before tax
pub fn render_schedule(ctx: &mut LayoutContext, stages: &[PaymentStage], total_ht: f64) {
    let rows: Vec<_> = stages
        .iter()
        .map(|stage| {
            Row::Cells(vec![
                Cell::text(stage.stage.clone()),
                stage.phase_code.clone().map_or_else(Cell::empty, Cell::text),
                stage.description.clone().map_or_else(Cell::empty, Cell::text),
                Cell::text(format_percent(stage.percentage)),
                Cell::text(format_currency(stage.amount_for(total_ht))),
            ])
        })
        .collect();
    Table::new(&SCHEDULE_COLUMNS, ctx.content_width()).draw(ctx, &rows);
}
