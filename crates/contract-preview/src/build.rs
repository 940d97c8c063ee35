//! Building the node tree from the models

use contract_model::{
    builder::{agency_party, base_project, client_party, reference},
    format::{format_currency, format_date, format_percent, format_quantity},
    input::AgencyProfile,
    model::{Party, Phase, PricedItem, Project, Totals, UnifiedContract},
    plan::{
        condition_rows, insurance_rows, party_rows, project_rows, DocumentKind, DocumentPlan,
        Field, PartySide, ProjectExtra, SectionKind, ACCEPTANCE_MENTION, FALLBACK_MESSAGE,
    },
    quote::{QuoteModel, QuoteRow},
    Job,
};

use crate::{
    tree::{Card, Cell, ImageRole, Node, Row, TextStyle},
    PreviewOptions,
};

const DESCRIPTION_LINES: usize = 3;

/// The header block shown in place of the cover page
struct Header<'a> {
    kind: DocumentKind,
    reference: &'a str,
    date: Option<&'a str>,
    project_name: &'a str,
    client: &'a str,
    issuer: &'a str,
    logo_url: Option<&'a str>,
}

fn header_nodes(header: &Header) -> Vec<Node> {
    let mut nodes = Vec::new();
    match header.logo_url {
        Some(url) => nodes.push(Node::Image {
            role: ImageRole::Logo,
            url: url.to_owned(),
        }),
        None => nodes.push(Node::Heading(header.issuer.to_owned())),
    }
    nodes.push(Node::Badge(header.kind.badge()));
    nodes.push(Node::Text {
        field: None,
        text: header.project_name.to_owned(),
        style: TextStyle::Strong,
        clamp: Some(2),
    });
    let mut reference = format!("N\u{b0} {}", header.reference);
    if let Some(date) = header.date {
        reference.push_str(&format!(" \u{b7} {}", format_date(date)));
    }
    nodes.push(Node::Text {
        field: None,
        text: reference,
        style: TextStyle::Muted,
        clamp: None,
    });
    nodes.push(Node::Text {
        field: None,
        text: header.client.to_owned(),
        style: TextStyle::Body,
        clamp: None,
    });
    nodes
}

fn cards(kind: DocumentKind, first: &Party, second: &Party) -> Node {
    let [first_heading, second_heading] = kind.party_headings();
    Node::Cards(vec![
        Card {
            heading: first_heading,
            name: first.name.clone(),
            rows: party_rows(PartySide::First, first),
        },
        Card {
            heading: second_heading,
            name: second.name.clone(),
            rows: party_rows(PartySide::Second, second),
        },
    ])
}

fn project_nodes(kind: DocumentKind, project: &Project, extra: ProjectExtra) -> Vec<Node> {
    let mut nodes = vec![Node::Heading(project.name.clone())];
    for (field, value) in project_rows(kind, project, extra) {
        if field == Field::ProjectDescription {
            nodes.push(Node::Text {
                field: Some(field),
                text: value,
                style: TextStyle::Body,
                clamp: Some(DESCRIPTION_LINES),
            });
        } else {
            nodes.push(Node::LabelValue { field, value });
        }
    }
    nodes
}

fn label_values(rows: Vec<(Field, String)>) -> Vec<Node> {
    rows.into_iter()
        .map(|(field, value)| Node::LabelValue { field, value })
        .collect()
}

fn phase_table(phases: &[Phase], show_descriptions: bool) -> Node {
    let rows = phases
        .iter()
        .map(|phase| {
            let mut name = Cell::text(phase.name.clone());
            if show_descriptions {
                name.details.extend(phase.description.clone());
                name.details
                    .extend(phase.deliverables.iter().map(|d| format!("\u{2022} {}", d)));
            }
            Row::Cells(vec![
                Cell::text(phase.code.clone()),
                name,
                Cell::text(phase.inclusion_marker()),
                Cell::text(format_percent(phase.percentage)),
            ])
        })
        .collect();
    Node::Table {
        headers: vec!["Code", "Phase", "Incl.", "%"],
        rows,
    }
}

fn quantity(value: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{} {}", format_quantity(value), unit),
        None => format_quantity(value),
    }
}

fn name_cell(name: String, description: Option<&String>) -> Cell {
    Cell {
        text: name,
        details: description.cloned().into_iter().collect(),
    }
}

fn item_table(items: &[PricedItem]) -> Node {
    let rows = items
        .iter()
        .map(|item| {
            Row::Cells(vec![
                name_cell(item.display_name(), item.description.as_ref()),
                Cell::text(quantity(item.quantity, item.unit.as_deref())),
                Cell::text(format_currency(item.amount_ht)),
            ])
        })
        .collect();
    Node::Table {
        headers: vec!["Désignation", "Qté", "Montant HT"],
        rows,
    }
}

fn quote_table(rows: &[QuoteRow]) -> Node {
    let rows = rows
        .iter()
        .map(|row| match row {
            QuoteRow::Group { name } => Row::Group(name.clone()),
            QuoteRow::Item {
                description,
                quantity: qty,
                unit,
                unit_price,
                amount_ht,
                ..
            } => Row::Cells(vec![
                name_cell(row.display_name(), description.as_ref()),
                qty.map_or_else(Cell::empty, |q| Cell::text(quantity(q, unit.as_deref()))),
                unit_price.map_or_else(Cell::empty, |p| Cell::text(format_currency(p))),
                Cell::text(format_currency(*amount_ht)),
            ]),
            QuoteRow::Discount { amount_ht, .. } => Row::Cells(vec![
                Cell::text(row.display_name()),
                Cell::empty(),
                Cell::empty(),
                Cell::text(format_currency(*amount_ht)),
            ]),
        })
        .collect();
    Node::Table {
        headers: vec!["Désignation", "Qté", "PU HT", "Montant HT"],
        rows,
    }
}

fn totals(totals: &Totals) -> Node {
    Node::Totals(vec![
        ("Total HT".to_owned(), format_currency(totals.total_ht)),
        (totals.tva_label(), format_currency(totals.tva_amount)),
        ("Total TTC".to_owned(), format_currency(totals.total_ttc)),
    ])
}

fn signature(
    kind: DocumentKind,
    client: &Party,
    issuer: &Party,
    signature_url: Option<&str>,
) -> Vec<Node> {
    let [client_label, issuer_label] = kind.signatories();
    vec![
        Node::Text {
            field: None,
            text: format!("Date et signature, précédées de « {} »", ACCEPTANCE_MENTION),
            style: TextStyle::Muted,
            clamp: None,
        },
        Node::SignatureBox {
            signatory: client_label,
            name: client.name.clone(),
        },
        Node::Signed {
            signatory: issuer_label,
            name: issuer.name.clone(),
            image: signature_url.map(str::to_owned),
        },
    ]
}

fn section(kind: DocumentKind, section: SectionKind, children: Vec<Node>) -> Node {
    let title = match section {
        SectionKind::Cover | SectionKind::Fallback => None,
        section => Some(kind.section_title(section)),
    };
    Node::Section {
        kind: section,
        title,
        children,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contract_children(
    section: SectionKind,
    contract: &UnifiedContract,
    agency: &AgencyProfile,
    options: &PreviewOptions,
) -> Vec<Node> {
    let kind = DocumentKind::Contract(contract.kind());
    let core = contract.core();
    match section {
        SectionKind::Cover => header_nodes(&Header {
            kind,
            reference: &core.reference,
            date: core.date.as_deref(),
            project_name: &core.project.name,
            client: &core.first_party.name,
            issuer: &core.second_party.name,
            logo_url: non_blank(&agency.logo_url),
        }),
        SectionKind::Parties => vec![cards(kind, &core.first_party, &core.second_party)],
        SectionKind::Project => project_nodes(kind, &core.project, ProjectExtra::of(contract)),
        SectionKind::Phases => vec![phase_table(&core.phases, options.show_descriptions)],
        SectionKind::Items => vec![item_table(&core.items)],
        SectionKind::Totals => vec![totals(&core.totals)],
        SectionKind::PaymentSchedule => {
            let rows = core
                .payment_schedule
                .iter()
                .map(|stage| {
                    Row::Cells(vec![
                        Cell::text(stage.stage.clone()),
                        Cell::text(stage.phase_code.clone().unwrap_or_default()),
                        Cell::text(stage.description.clone().unwrap_or_default()),
                        Cell::text(format_percent(stage.percentage)),
                        Cell::text(format_currency(stage.amount_for(core.totals.total_ht))),
                    ])
                })
                .collect();
            vec![Node::Table {
                headers: vec!["Étape", "Phase", "Description", "%", "Montant HT"],
                rows,
            }]
        }
        SectionKind::Clauses => core
            .clauses
            .iter()
            .flat_map(|clause| {
                [
                    Node::Heading(clause.title()),
                    Node::Text {
                        field: None,
                        text: clause.text.clone(),
                        style: TextStyle::Body,
                        clamp: None,
                    },
                ]
            })
            .collect(),
        SectionKind::Insurance => label_values(insurance_rows(contract)),
        SectionKind::Signature => signature(
            kind,
            &core.first_party,
            &core.second_party,
            non_blank(&agency.signature_url),
        ),
        other => {
            log::debug!("Section {:?} is not shown for a contract", other);
            Vec::new()
        }
    }
}

fn quote_children(section: SectionKind, quote: &QuoteModel, agency: &AgencyProfile) -> Vec<Node> {
    let kind = DocumentKind::Quote;
    match section {
        SectionKind::Cover => header_nodes(&Header {
            kind,
            reference: &quote.reference,
            date: quote.date.as_deref(),
            project_name: &quote.project.name,
            client: &quote.client.name,
            issuer: &quote.issuer.name,
            logo_url: non_blank(&agency.logo_url),
        }),
        SectionKind::Parties => vec![cards(kind, &quote.client, &quote.issuer)],
        SectionKind::Project => project_nodes(kind, &quote.project, ProjectExtra::default()),
        SectionKind::QuoteLines => vec![quote_table(&quote.rows)],
        SectionKind::Totals => vec![totals(&quote.totals)],
        SectionKind::Conditions => label_values(condition_rows(quote)),
        SectionKind::Signature => signature(
            kind,
            &quote.client,
            &quote.issuer,
            non_blank(&agency.signature_url),
        ),
        other => {
            log::debug!("Section {:?} is not shown for a quote", other);
            Vec::new()
        }
    }
}

/// The nodes of a detailed contract, section by section
pub(crate) fn contract_nodes(
    plan: &DocumentPlan,
    contract: &UnifiedContract,
    agency: &AgencyProfile,
    options: &PreviewOptions,
) -> Vec<Node> {
    plan.screen_sections()
        .map(|s| section(plan.kind, s.kind, contract_children(s.kind, contract, agency, options)))
        .collect()
}

/// The nodes of a quote, section by section
pub(crate) fn quote_nodes(
    plan: &DocumentPlan,
    quote: &QuoteModel,
    agency: &AgencyProfile,
) -> Vec<Node> {
    plan.screen_sections()
        .map(|s| section(plan.kind, s.kind, quote_children(s.kind, quote, agency)))
        .collect()
}

/// The header and the notice of a contract whose kind is not recognized
pub(crate) fn fallback_nodes(plan: &DocumentPlan, job: &Job) -> Vec<Node> {
    let document = &job.document;
    let reference = reference(document);
    let project = base_project(document);
    let client = client_party(document.client.as_ref());
    let issuer = agency_party(&job.agency);
    let header = Header {
        kind: plan.kind,
        reference: &reference,
        date: non_blank(&document.created_at),
        project_name: &project.name,
        client: &client.name,
        issuer: &issuer.name,
        logo_url: non_blank(&job.agency.logo_url),
    };
    plan.screen_sections()
        .map(|s| {
            let children = match s.kind {
                SectionKind::Cover => header_nodes(&header),
                _ => vec![Node::Notice(FALLBACK_MESSAGE)],
            };
            section(plan.kind, s.kind, children)
        })
        .collect()
}
