//! The quote model
//!
//! A quote is laid out straight from its flat list of lines, group headings
//! included, without any kind detection.

use crate::{
    builder::{
        agency_party, base_project, build_totals, client_party, non_blank, or_placeholder,
        reference, UNNAMED_ITEM,
    },
    input::{AgencyProfile, BusinessDocument, LineItem},
    model::{Diagnostic, Party, Project, Totals},
};

/// One row of the quote table
#[derive(Debug, Clone, PartialEq)]
pub enum QuoteRow {
    /// A heading for the lines below
    Group {
        /// The heading text
        name: String,
    },
    /// A priced line
    Item {
        /// The name, or a placeholder
        name: String,
        /// A longer description
        description: Option<String>,
        /// The quantity
        quantity: Option<f64>,
        /// The unit of the quantity
        unit: Option<String>,
        /// The price of one unit
        unit_price: Option<f64>,
        /// The amount before tax
        amount_ht: f64,
        /// Whether the line is optional (or not included)
        is_optional: bool,
        /// Whether the line is offered
        is_offered: bool,
    },
    /// A rebate, with a negative amount
    Discount {
        /// The name, or a placeholder
        name: String,
        /// The (negative) amount before tax
        amount_ht: f64,
        /// Whether the rebate applies
        is_included: bool,
    },
}

impl QuoteRow {
    /// The name with the `(offert)` / `(option)` suffixes
    pub fn display_name(&self) -> String {
        match self {
            Self::Group { name } => name.clone(),
            Self::Item {
                name,
                is_optional,
                is_offered,
                ..
            } => {
                let mut name = name.clone();
                if *is_offered {
                    name.push_str(" (offert)");
                }
                if *is_optional {
                    name.push_str(" (option)");
                }
                name
            }
            Self::Discount {
                name, is_included, ..
            } => {
                if *is_included {
                    name.clone()
                } else {
                    format!("{} (option)", name)
                }
            }
        }
    }
}

/// A quote, ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteModel {
    /// The quote number, or a placeholder
    pub reference: String,
    /// The issuance date, as stored
    pub date: Option<String>,
    /// How many days the offer is valid
    pub validity_days: Option<u32>,
    /// Date until which the offer is valid, as stored
    pub valid_until: Option<String>,
    /// The client
    pub client: Party,
    /// The issuer
    pub issuer: Party,
    /// The project
    pub project: Project,
    /// The table rows, in order
    pub rows: Vec<QuoteRow>,
    /// The totals, computed once
    pub totals: Totals,
    /// Free-text payment terms
    pub payment_terms: Option<String>,
    /// Problems found in the source records
    pub diagnostics: Vec<Diagnostic>,
}

fn row_name(line: &LineItem) -> String {
    or_placeholder(&line.name, UNNAMED_ITEM)
}

/// Build the quote model
pub fn build_quote(
    document: &BusinessDocument,
    lines: &[LineItem],
    agency: &AgencyProfile,
) -> QuoteModel {
    let mut diagnostics = Vec::new();
    let totals = build_totals(document, lines, &mut diagnostics);

    let mut issuer = agency_party(agency);
    issuer.siret = non_blank(&agency.siret);
    issuer.vat_number = non_blank(&agency.vat_number);

    let mut project = base_project(document);
    project.surface = document.project_surface;

    let rows = lines
        .iter()
        .map(|line| {
            if line.is_group() {
                QuoteRow::Group {
                    name: row_name(line),
                }
            } else if line.is_discount() {
                QuoteRow::Discount {
                    name: row_name(line),
                    amount_ht: -line.amount().abs(),
                    is_included: line.is_included,
                }
            } else {
                QuoteRow::Item {
                    name: row_name(line),
                    description: non_blank(&line.description),
                    quantity: line.quantity,
                    unit: non_blank(&line.unit),
                    unit_price: line.unit_price,
                    amount_ht: line.amount(),
                    is_optional: !line.is_included || line.is_optional,
                    is_offered: line.is_offered,
                }
            }
        })
        .collect();

    QuoteModel {
        reference: reference(document),
        date: non_blank(&document.created_at),
        validity_days: document.validity_days,
        valid_until: non_blank(&document.valid_until),
        client: client_party(document.client.as_ref()),
        issuer,
        project,
        rows,
        totals,
        payment_terms: non_blank(&document.payment_terms),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_quote, QuoteRow};
    use crate::input::{AgencyProfile, BusinessDocument, LineItem, LineType};

    #[test]
    fn rows_keep_their_order() {
        let lines = vec![
            LineItem {
                name: Some("Conception".to_owned()),
                line_type: LineType::Group,
                ..LineItem::default()
            },
            LineItem {
                name: Some("Logo".to_owned()),
                quantity: Some(2.0),
                unit_price: Some(400.0),
                ..LineItem::default()
            },
            LineItem {
                line_type: LineType::Discount,
                amount: Some(80.0),
                ..LineItem::default()
            },
        ];
        let document = BusinessDocument {
            vat_rate: Some(10.0),
            payment_terms: Some("30 jours fin de mois".to_owned()),
            ..BusinessDocument::default()
        };
        let quote = build_quote(&document, &lines, &AgencyProfile::default());
        assert_eq!(quote.rows.len(), 3);
        assert!(matches!(&quote.rows[0], QuoteRow::Group { name } if name == "Conception"));
        assert!(matches!(quote.rows[1], QuoteRow::Item { amount_ht, .. } if amount_ht == 800.0));
        assert!(
            matches!(&quote.rows[2], QuoteRow::Discount { name, amount_ht, .. } if name == "Sans désignation" && *amount_ht == -80.0)
        );
        assert_eq!(quote.totals.total_ht, 720.0);
        assert_eq!(quote.totals.tva_amount, 720.0 * 0.1);
        assert_eq!(quote.payment_terms.as_deref(), Some("30 jours fin de mois"));
        assert_eq!(quote.rows[1].display_name(), "Logo");
        assert_eq!(quote.reference, "BROUILLON");
    }
}
