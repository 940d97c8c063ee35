use color_eyre::eyre;
use contract_model::{
    builder::build_contract,
    format::{format_currency, format_quantity},
    model::Totals,
    plan::DocumentPlan,
    quote::{build_quote, QuoteRow},
    JobKind,
};
use prettytable::{cell, format, row, Cell, Row, Table};

use super::JobRun;

fn plan_table(plan: &DocumentPlan) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["idx", "section", "title", "fields"]);
    for (index, section) in plan.sections.iter().enumerate() {
        let fields: Vec<_> = section.fields.iter().map(|f| f.label()).collect();
        table.add_row(Row::new(vec![
            Cell::new(&format!("{:2}", index)),
            Cell::new(&format!("{:?}", section.kind)),
            Cell::new(plan.kind.section_title(section.kind)),
            Cell::new(&fields.join(", ")),
        ]));
    }
    table
}

fn totals_rows(table: &mut Table, totals: &Totals) {
    table.add_row(row!["", "Total HT", "", r->format_currency(totals.total_ht)]);
    table.add_row(row!["", totals.tva_label(), "", r->format_currency(totals.tva_amount)]);
    table.add_row(row!["", b->"Total TTC", "", br->format_currency(totals.total_ttc)]);
}

fn item_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["#", "Désignation", "Qté", "Montant HT"]);
    table
}

/// Print the plan, the priced lines and the totals of the job
pub fn output_summary(run: &JobRun) -> eyre::Result<()> {
    let job = &run.job;
    match job.kind {
        JobKind::Contract => {
            let contract = build_contract(
                &job.document,
                &job.lines,
                &job.agency,
                &run.classifier,
                job.contract_type.as_deref(),
            );
            let plan = DocumentPlan::for_optional_contract(contract.as_ref());
            println!("{} ({})", plan.kind.badge(), run.file.display());
            plan_table(&plan).printstd();

            let Some(contract) = contract else {
                println!("No detailed view for this kind of contract");
                return Ok(());
            };
            let core = contract.core();
            let mut table = item_table();
            for (index, item) in core.items.iter().enumerate() {
                table.add_row(Row::new(vec![
                    Cell::new(&format!("{:2}", index + 1)),
                    Cell::new(&item.display_name()),
                    Cell::new(&format_quantity(item.quantity)).style_spec("r"),
                    Cell::new(&format_currency(item.amount_ht)).style_spec("r"),
                ]));
            }
            totals_rows(&mut table, &core.totals);
            table.printstd();
            for diagnostic in &core.diagnostics {
                println!("warning: {}", diagnostic);
            }
        }
        JobKind::Quote => {
            let quote = build_quote(&job.document, &job.lines, &job.agency);
            let plan = DocumentPlan::for_quote(&quote);
            println!("{} ({})", plan.kind.badge(), run.file.display());
            plan_table(&plan).printstd();

            let mut table = item_table();
            for (index, row) in quote.rows.iter().enumerate() {
                let (quantity, amount) = match row {
                    QuoteRow::Group { .. } => (String::new(), String::new()),
                    QuoteRow::Item {
                        quantity,
                        amount_ht,
                        ..
                    } => (
                        quantity.map(format_quantity).unwrap_or_default(),
                        format_currency(*amount_ht),
                    ),
                    QuoteRow::Discount { amount_ht, .. } => {
                        (String::new(), format_currency(*amount_ht))
                    }
                };
                table.add_row(Row::new(vec![
                    Cell::new(&format!("{:2}", index + 1)),
                    Cell::new(&row.display_name()),
                    Cell::new(&quantity).style_spec("r"),
                    Cell::new(&amount).style_spec("r"),
                ]));
            }
            totals_rows(&mut table, &quote.totals);
            table.printstd();
            for diagnostic in &quote.diagnostics {
                println!("warning: {}", diagnostic);
            }
        }
    }
    Ok(())
}
