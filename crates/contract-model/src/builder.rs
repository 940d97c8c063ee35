//! The contract data builder
//!
//! Turns a [`BusinessDocument`], its [`LineItem`]s and the [`AgencyProfile`]
//! of the issuer into a [`UnifiedContract`]. This is a pure function of its
//! inputs: nothing is cached and missing data never fails the build.

use crate::{
    input::{AgencyProfile, BusinessDocument, ClientRecord, ContractTerms, LineItem},
    kind::{detect_kind, ContractTypeClassifier},
    model::{
        ArchitectureContract, CommunicationContract, ContractCore, ContractKind, Diagnostic,
        Party, Phase, PricedItem, Project, Totals, UnifiedContract,
    },
};

/// Project name used when the document has no title
pub const UNTITLED_PROJECT: &str = "Projet sans titre";
/// Reference used when the document has no number yet
pub const DRAFT_REFERENCE: &str = "BROUILLON";
/// Name used when the client is unknown
pub const UNKNOWN_CLIENT: &str = "Client non renseigné";
/// Name used when the agency has no name
pub const UNNAMED_AGENCY: &str = "Agence";
/// Name used for a line without a name
pub const UNNAMED_ITEM: &str = "Sans désignation";

/// Amounts closer than this are considered equal
const CENT_TOLERANCE: f64 = 0.005;

pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

pub(crate) fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    non_blank(value).unwrap_or_else(|| placeholder.to_owned())
}

/// The total before tax: included priced lines minus included rebates
pub fn compute_total_ht(lines: &[LineItem]) -> f64 {
    let (sum, rebates) = lines
        .iter()
        .filter(|line| line.is_included && !line.is_group())
        .fold((0.0, 0.0), |(sum, rebates), line| {
            if line.is_discount() {
                (sum, rebates + line.amount().abs())
            } else {
                (sum + line.amount(), rebates)
            }
        });
    sum - rebates
}

/// Compute the totals from the lines, and compare against stored totals
pub fn build_totals(
    document: &BusinessDocument,
    lines: &[LineItem],
    diagnostics: &mut Vec<Diagnostic>,
) -> Totals {
    let computed = compute_total_ht(lines);
    let stored_terms = document
        .terms
        .as_ref()
        .and_then(|terms| terms.totals.as_ref())
        .and_then(|totals| totals.total_ht);
    for stored in [document.total_ht, stored_terms].into_iter().flatten() {
        if (stored - computed).abs() > CENT_TOLERANCE {
            let diagnostic = Diagnostic::StoredTotalMismatch { stored, computed };
            log::warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }
    }
    Totals::from_ht(computed, document.tva_rate())
}

/// The client as a party, with all identifiers it has
pub fn client_party(client: Option<&ClientRecord>) -> Party {
    let client = match client {
        Some(client) => client,
        None => {
            return Party {
                name: UNKNOWN_CLIENT.to_owned(),
                ..Party::default()
            }
        }
    };
    let company_name = non_blank(&client.company_name);
    let name = non_blank(&client.name)
        .or_else(|| company_name.clone())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_owned());
    Party {
        company_name: company_name.filter(|company| *company != name),
        name,
        address: non_blank(&client.address),
        postal_code: non_blank(&client.postal_code),
        city: non_blank(&client.city),
        phone: non_blank(&client.phone),
        email: non_blank(&client.email),
        registration_number: None,
        siret: non_blank(&client.siret),
        vat_number: non_blank(&client.vat_number),
    }
}

/// The issuer as a party, without kind-specific identifiers
pub fn agency_party(agency: &AgencyProfile) -> Party {
    let name = or_placeholder(&agency.name, UNNAMED_AGENCY);
    Party {
        company_name: non_blank(&agency.legal_name).filter(|company| *company != name),
        name,
        address: non_blank(&agency.address),
        postal_code: non_blank(&agency.postal_code),
        city: non_blank(&agency.city),
        phone: non_blank(&agency.phone),
        email: non_blank(&agency.email),
        registration_number: None,
        siret: None,
        vat_number: None,
    }
}

/// The project, without the kind-specific notes
pub fn base_project(document: &BusinessDocument) -> Project {
    Project {
        name: or_placeholder(&document.title, UNTITLED_PROJECT),
        description: non_blank(&document.description),
        address: non_blank(&document.project_address),
        city: non_blank(&document.project_city),
        postal_code: non_blank(&document.project_postal_code),
        surface: None,
        budget: document.project_budget,
        ..Project::default()
    }
}

/// The reference of a document
pub fn reference(document: &BusinessDocument) -> String {
    or_placeholder(&document.document_number, DRAFT_REFERENCE)
}

fn derive_phases(lines: &[LineItem]) -> Vec<Phase> {
    let phase_lines: Vec<(&LineItem, &str)> = lines
        .iter()
        .filter(|line| !line.is_group() && !line.is_discount())
        .filter_map(|line| {
            line.phase_code
                .as_deref()
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| (line, code))
        })
        .collect();
    let sum: f64 = phase_lines.iter().map(|(line, _)| line.amount()).sum();
    phase_lines
        .into_iter()
        .map(|(line, code)| Phase {
            code: code.to_owned(),
            name: or_placeholder(&line.name, UNNAMED_ITEM),
            description: non_blank(&line.description),
            deliverables: Vec::new(),
            is_included: line.is_included,
            is_optional: line.is_optional,
            percentage: if sum == 0.0 {
                0.0
            } else {
                line.amount() / sum * 100.0
            },
        })
        .collect()
}

fn phases(terms: Option<&ContractTerms>, lines: &[LineItem]) -> Vec<Phase> {
    match terms {
        Some(terms) if !terms.phases.is_empty() => terms.phases.clone(),
        _ => derive_phases(lines),
    }
}

/// The priced items: every line that is not a group heading
pub fn priced_items(lines: &[LineItem]) -> Vec<PricedItem> {
    lines
        .iter()
        .filter(|line| !line.is_group())
        .map(|line| {
            let amount = line.amount();
            PricedItem {
                name: or_placeholder(&line.name, UNNAMED_ITEM),
                description: non_blank(&line.description),
                quantity: line.quantity.unwrap_or(1.0),
                unit: non_blank(&line.unit),
                amount_ht: if line.is_discount() {
                    -amount.abs()
                } else {
                    amount
                },
                is_optional: !line.is_included || line.is_optional,
                is_offered: line.is_offered,
            }
        })
        .collect()
}

fn core(
    document: &BusinessDocument,
    lines: &[LineItem],
    first_party: Party,
    second_party: Party,
    project: Project,
) -> ContractCore {
    let terms = document.terms.as_ref();
    let mut diagnostics = Vec::new();
    let totals = build_totals(document, lines, &mut diagnostics);
    ContractCore {
        reference: reference(document),
        date: non_blank(&document.created_at),
        first_party,
        second_party,
        project,
        phases: phases(terms, lines),
        items: priced_items(lines),
        totals,
        payment_schedule: terms.map(|t| t.payment_schedule.clone()).unwrap_or_default(),
        clauses: terms
            .map(|t| {
                t.clauses
                    .iter()
                    .filter(|c| !c.text.trim().is_empty())
                    .cloned()
                    .collect()
            })
            .unwrap_or_default(),
        diagnostics,
    }
}

/// Build an architecture (MOE) contract
pub fn build_architecture(
    document: &BusinessDocument,
    lines: &[LineItem],
    agency: &AgencyProfile,
) -> ArchitectureContract {
    let terms = document.terms.clone().unwrap_or_default();

    let mut moa = client_party(document.client.as_ref());
    moa.siret = None;
    moa.vat_number = None;

    let mut moe = agency_party(agency);
    moe.registration_number = non_blank(&agency.registration_number);

    let mut project = base_project(document);
    project.surface = document.project_surface;
    project.additional_notes = non_blank(&terms.additional_notes);
    project.constraints = non_blank(&terms.constraints);
    project.requirements = non_blank(&terms.requirements);

    ArchitectureContract {
        core: core(document, lines, moa, moe, project),
        fee_calculation_method: non_blank(&terms.fee_calculation_method),
        insurance_company: non_blank(&terms.insurance_company),
        insurance_policy_number: non_blank(&terms.insurance_policy_number),
    }
}

/// Build a communication agency contract
pub fn build_communication(
    document: &BusinessDocument,
    lines: &[LineItem],
    agency: &AgencyProfile,
) -> CommunicationContract {
    let terms = document.terms.clone().unwrap_or_default();

    let client = client_party(document.client.as_ref());

    let mut issuer = agency_party(agency);
    issuer.siret = non_blank(&agency.siret);
    issuer.vat_number = non_blank(&agency.vat_number);

    let mut project = base_project(document);
    project.start_date = non_blank(&terms.start_date);
    project.end_date = non_blank(&terms.end_date);

    CommunicationContract {
        core: core(document, lines, client, issuer, project),
        daily_rate: terms.daily_rate,
    }
}

/// Build the unified model for a known kind
pub fn build(
    document: &BusinessDocument,
    lines: &[LineItem],
    agency: &AgencyProfile,
    kind: ContractKind,
) -> UnifiedContract {
    match kind {
        ContractKind::Architecture => {
            UnifiedContract::Architecture(build_architecture(document, lines, agency))
        }
        ContractKind::Communication => {
            UnifiedContract::Communication(build_communication(document, lines, agency))
        }
    }
}

/// Detect the kind and build the model, `None` for an unrecognized kind
pub fn build_contract(
    document: &BusinessDocument,
    lines: &[LineItem],
    agency: &AgencyProfile,
    classifier: &dyn ContractTypeClassifier,
    contract_type: Option<&str>,
) -> Option<UnifiedContract> {
    let kind = detect_kind(classifier, contract_type, document.project_type.as_deref())?;
    Some(build(document, lines, agency, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::{LineType, StoredTotals},
        kind::CodeClassifier,
        model::PaymentStage,
    };

    fn line(amount: f64, line_type: LineType, is_included: bool) -> LineItem {
        LineItem {
            amount: Some(amount),
            line_type,
            is_included,
            ..LineItem::default()
        }
    }

    #[test]
    fn total_formula() {
        let lines = vec![
            line(1000.0, LineType::Normal, true),
            line(500.0, LineType::Normal, false),
            line(9999.0, LineType::Group, true),
            line(-100.0, LineType::Discount, true),
            line(50.0, LineType::Discount, true),
            line(70.0, LineType::Discount, false),
        ];
        assert_eq!(compute_total_ht(&lines), 850.0);
        assert_eq!(compute_total_ht(&[]), 0.0);
    }

    #[test]
    fn placeholders() {
        let model = build(
            &BusinessDocument::default(),
            &[],
            &AgencyProfile::default(),
            ContractKind::Architecture,
        );
        let core = model.core();
        assert_eq!(core.project.name, "Projet sans titre");
        assert_eq!(core.reference, "BROUILLON");
        assert_eq!(core.first_party.name, "Client non renseigné");
        assert_eq!(core.second_party.name, "Agence");
        assert_eq!(core.totals, Totals::from_ht(0.0, 0.2));
        assert!(core.phases.is_empty());
        assert!(core.items.is_empty());
    }

    #[test]
    fn company_falls_back_to_name() {
        let client = ClientRecord {
            company_name: Some("Dupont SARL".to_owned()),
            ..ClientRecord::default()
        };
        let party = client_party(Some(&client));
        assert_eq!(party.name, "Dupont SARL");
        assert_eq!(party.company_name, None);
    }

    #[test]
    fn phases_derived_from_lines() {
        let lines = vec![
            LineItem {
                phase_code: Some("ESQ".to_owned()),
                name: Some("Esquisse".to_owned()),
                amount: Some(300.0),
                ..LineItem::default()
            },
            LineItem {
                phase_code: Some("APS".to_owned()),
                amount: Some(900.0),
                is_included: false,
                is_optional: true,
                ..LineItem::default()
            },
            LineItem {
                name: Some("Frais".to_owned()),
                amount: Some(100.0),
                ..LineItem::default()
            },
        ];
        let phases = derive_phases(&lines);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].percentage, 25.0);
        assert_eq!(phases[1].name, "Sans désignation");
        assert_eq!(phases[1].inclusion_marker(), "(option)");

        let zero = vec![LineItem {
            phase_code: Some("DET".to_owned()),
            ..LineItem::default()
        }];
        assert_eq!(derive_phases(&zero)[0].percentage, 0.0);
    }

    #[test]
    fn explicit_phases_win() {
        let document = BusinessDocument {
            terms: Some(ContractTerms {
                phases: vec![Phase {
                    code: "DCE".to_owned(),
                    percentage: 12.5,
                    ..Phase::default()
                }],
                ..ContractTerms::default()
            }),
            ..BusinessDocument::default()
        };
        let lines = vec![LineItem {
            phase_code: Some("ESQ".to_owned()),
            amount: Some(300.0),
            ..LineItem::default()
        }];
        let model = build_communication(&document, &lines, &AgencyProfile::default());
        assert_eq!(model.core.phases.len(), 1);
        assert_eq!(model.core.phases[0].code, "DCE");
    }

    #[test]
    fn rebates_are_negative_items() {
        let lines = vec![
            line(200.0, LineType::Normal, false),
            line(30.0, LineType::Discount, true),
            line(1.0, LineType::Group, true),
        ];
        let items = priced_items(&lines);
        assert_eq!(items.len(), 2);
        assert!(items[0].is_optional);
        assert_eq!(items[1].amount_ht, -30.0);
    }

    #[test]
    fn stale_totals_are_reported() {
        let document = BusinessDocument {
            total_ht: Some(999.0),
            terms: Some(ContractTerms {
                totals: Some(StoredTotals {
                    total_ht: Some(1000.001),
                    ..StoredTotals::default()
                }),
                payment_schedule: vec![PaymentStage {
                    stage: "Solde".to_owned(),
                    percentage: 100.0,
                    ..PaymentStage::default()
                }],
                ..ContractTerms::default()
            }),
            ..BusinessDocument::default()
        };
        let lines = vec![line(1000.0, LineType::Normal, true)];
        let model = build_architecture(&document, &lines, &AgencyProfile::default());
        assert_eq!(model.core.totals.total_ht, 1000.0);
        assert_eq!(
            model.core.diagnostics,
            vec![Diagnostic::StoredTotalMismatch {
                stored: 999.0,
                computed: 1000.0
            }]
        );
        let stage = &model.core.payment_schedule[0];
        assert_eq!(stage.amount_for(model.core.totals.total_ht), 1000.0);
    }

    #[test]
    fn unknown_kind_has_no_model() {
        let document = BusinessDocument {
            project_type: Some("plomberie".to_owned()),
            ..BusinessDocument::default()
        };
        let classifier = CodeClassifier::default();
        let agency = AgencyProfile::default();
        assert!(build_contract(&document, &[], &agency, &classifier, None).is_none());
        let model = build_contract(&document, &[], &agency, &classifier, Some("digital"));
        assert_eq!(
            model.map(|m| m.kind()),
            Some(ContractKind::Communication)
        );
    }
}
