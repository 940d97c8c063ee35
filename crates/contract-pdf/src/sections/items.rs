//! Priced items of a contract and the lines of a quote

use contract_model::{
    format::{format_currency, format_quantity},
    model::PricedItem,
    quote::QuoteRow,
};

use crate::{
    layout::LayoutContext,
    table::{Align, Cell, Column, Row, Span, Table},
};

const ITEM_COLUMNS: [Column; 3] = [
    Column::fill("Désignation"),
    Column::fixed("Qté", 60.0, Align::Right),
    Column::fixed("Montant HT", 90.0, Align::Right),
];

const QUOTE_COLUMNS: [Column; 4] = [
    Column::fill("Désignation"),
    Column::fixed("Qté", 60.0, Align::Right),
    Column::fixed("PU HT", 80.0, Align::Right),
    Column::fixed("Montant HT", 90.0, Align::Right),
];

fn quantity(value: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{} {}", format_quantity(value), unit),
        None => format_quantity(value),
    }
}

fn description_cell(name: Span, description: Option<&String>) -> Cell {
    let cell = Cell::of(name);
    match description {
        Some(description) => cell.with(Span::muted(description.clone())),
        None => cell,
    }
}

/// The table of fees or services
pub fn render_items(ctx: &mut LayoutContext, items: &[PricedItem]) {
    let rows: Vec<_> = items
        .iter()
        .map(|item| {
            Row::Cells(vec![
                description_cell(Span::regular(item.display_name()), item.description.as_ref()),
                Cell::text(quantity(item.quantity, item.unit.as_deref())),
                Cell::text(format_currency(item.amount_ht)),
            ])
        })
        .collect();
    Table::new(&ITEM_COLUMNS, ctx.content_width()).draw(ctx, &rows);
}

fn quote_row(row: &QuoteRow) -> Row {
    match row {
        QuoteRow::Group { name } => Row::Banner(Cell::of(Span::bold(name.clone()))),
        QuoteRow::Item {
            description,
            quantity: qty,
            unit,
            unit_price,
            amount_ht,
            ..
        } => Row::Cells(vec![
            description_cell(Span::regular(row.display_name()), description.as_ref()),
            qty.map_or_else(Cell::empty, |q| Cell::text(quantity(q, unit.as_deref()))),
            unit_price.map_or_else(Cell::empty, |p| Cell::text(format_currency(p))),
            Cell::text(format_currency(*amount_ht)),
        ]),
        QuoteRow::Discount { amount_ht, .. } => Row::Cells(vec![
            Cell::of(Span::oblique(row.display_name())),
            Cell::empty(),
            Cell::empty(),
            Cell::of(Span::oblique(format_currency(*amount_ht))),
        ]),
    }
}

/// The lines of a quote, group headings included
pub fn render_quote_lines(ctx: &mut LayoutContext, rows: &[QuoteRow]) {
    let rows: Vec<_> = rows.iter().map(quote_row).collect();
    Table::new(&QUOTE_COLUMNS, ctx.content_width()).draw(ctx, &rows);
}
