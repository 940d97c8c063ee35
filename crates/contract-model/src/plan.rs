//! The section plan shared by the PDF and the preview output
//!
//! A plan lists the sections of a document in their fixed order, and for
//! each section the optional fields that carry a value. Both renderers
//! follow the plan, so they can't disagree on what a document contains.

use std::fmt;

use crate::{
    format::{format_currency, format_date, format_surface},
    model::{join_non_empty, ContractKind, Party, Project, UnifiedContract},
    quote::QuoteModel,
};

/// A section of a rendered document
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    /// The dedicated first page
    Cover,
    /// The two parties side by side
    Parties,
    /// The project description
    Project,
    /// The compact phase table
    Phases,
    /// Full text of the included phases
    PhaseDetails,
    /// Fees or services
    Items,
    /// The lines of a quote
    QuoteLines,
    /// The totals box
    Totals,
    /// The payment schedule table
    PaymentSchedule,
    /// Titled clauses
    Clauses,
    /// Insurance of the architect
    Insurance,
    /// Payment terms and validity of a quote
    Conditions,
    /// The signature block
    Signature,
    /// The message for an unrecognized contract kind
    Fallback,
}

impl SectionKind {
    /// The title of the section, where it has one
    pub fn title(self) -> &'static str {
        match self {
            Self::Cover => "Couverture",
            Self::Parties => "PARTIES",
            Self::Project => "PROJET",
            Self::Phases => "MISSIONS",
            Self::PhaseDetails => "DÉTAIL DES PHASES",
            Self::Items => "HONORAIRES",
            Self::QuoteLines => "DÉTAIL DE L'OFFRE",
            Self::Totals => "TOTAUX",
            Self::PaymentSchedule => "ÉCHÉANCIER DE PAIEMENT",
            Self::Clauses => "CONDITIONS",
            Self::Insurance => "ASSURANCES",
            Self::Conditions => "CONDITIONS DE L'OFFRE",
            Self::Signature => "SIGNATURES",
            Self::Fallback => "APERÇU",
        }
    }

    /// Whether the section only exists in the printed document
    pub fn is_print_only(self) -> bool {
        matches!(self, Self::PhaseDetails)
    }
}

/// Which side of a document a party is on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartySide {
    /// The client (MOA / client)
    First,
    /// The issuer (MOE / agency)
    Second,
}

/// An optional field of a section
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Company name distinct from the party name
    CompanyName(PartySide),
    /// Address (street, postal code, city)
    Address(PartySide),
    /// Phone
    Phone(PartySide),
    /// E-Mail
    Email(PartySide),
    /// Registration with the order of architects
    Registration(PartySide),
    /// SIRET
    Siret(PartySide),
    /// VAT number
    VatNumber(PartySide),
    /// Project description
    ProjectDescription,
    /// Project address
    ProjectAddress,
    /// Surface
    ProjectSurface,
    /// Budget
    ProjectBudget,
    /// Start date
    StartDate,
    /// End date
    EndDate,
    /// Additional notes
    AdditionalNotes,
    /// Constraints
    Constraints,
    /// Requirements
    Requirements,
    /// Fee calculation method
    FeeCalculationMethod,
    /// Daily rate
    DailyRate,
    /// Insurance company
    InsuranceCompany,
    /// Insurance policy number
    InsurancePolicy,
    /// Payment terms of a quote
    PaymentTerms,
    /// Validity of a quote
    Validity,
}

impl Field {
    /// The label shown in front of the value
    pub fn label(self) -> &'static str {
        match self {
            Self::CompanyName(_) => "Société",
            Self::Address(_) => "Adresse",
            Self::Phone(_) => "Tél.",
            Self::Email(_) => "E-mail",
            Self::Registration(_) => "N° d'inscription à l'Ordre",
            Self::Siret(_) => "SIRET",
            Self::VatNumber(_) => "N° TVA",
            Self::ProjectDescription => "Description",
            Self::ProjectAddress => "Adresse du projet",
            Self::ProjectSurface => "Surface",
            Self::ProjectBudget => "Budget travaux",
            Self::StartDate => "Date de début",
            Self::EndDate => "Date de fin",
            Self::AdditionalNotes => "Notes",
            Self::Constraints => "Contraintes",
            Self::Requirements => "Exigences",
            Self::FeeCalculationMethod => "Mode de calcul des honoraires",
            Self::DailyRate => "Taux journalier",
            Self::InsuranceCompany => "Compagnie",
            Self::InsurancePolicy => "N° de police",
            Self::PaymentTerms => "Conditions de paiement",
            Self::Validity => "Validité",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The kind of a planned document
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// A detailed contract
    Contract(ContractKind),
    /// A quote
    Quote,
    /// A contract of an unrecognized kind
    Fallback,
}

impl DocumentKind {
    /// The text of the badge on the cover page
    pub fn badge(self) -> &'static str {
        match self {
            Self::Contract(ContractKind::Architecture) => "CONTRAT DE MAÎTRISE D'ŒUVRE",
            Self::Contract(ContractKind::Communication) => "CONTRAT DE PRESTATIONS",
            Self::Quote => "DEVIS",
            Self::Fallback => "CONTRAT",
        }
    }

    /// The headings of the two party cards
    pub fn party_headings(self) -> [&'static str; 2] {
        match self {
            Self::Contract(ContractKind::Architecture) => ["MAÎTRE D'OUVRAGE", "MAÎTRE D'ŒUVRE"],
            Self::Contract(ContractKind::Communication) => ["CLIENT", "AGENCE"],
            Self::Quote | Self::Fallback => ["CLIENT", "ÉMETTEUR"],
        }
    }

    /// Who signs on each side of the signature block
    pub fn signatories(self) -> [&'static str; 2] {
        match self {
            Self::Contract(ContractKind::Architecture) => {
                ["Le Maître d'ouvrage", "Le Maître d'œuvre"]
            }
            Self::Contract(ContractKind::Communication) => ["Le Client", "L'Agence"],
            Self::Quote | Self::Fallback => ["Le Client", "L'Émetteur"],
        }
    }

    /// The title of a section in this kind of document
    pub fn section_title(self, section: SectionKind) -> &'static str {
        match (self, section) {
            (Self::Contract(ContractKind::Communication), SectionKind::Items) => "PRESTATIONS",
            (Self::Contract(ContractKind::Communication), SectionKind::Phases) => "ÉTAPES",
            _ => section.title(),
        }
    }
}

/// The mention the client writes before signing
pub const ACCEPTANCE_MENTION: &str = "Bon pour accord";

/// The message shown instead of the body of an unrecognized contract
pub const FALLBACK_MESSAGE: &str = "Aperçu détaillé non disponible pour ce type de contrat";

/// One section and the populated optional fields it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSection {
    /// The section
    pub kind: SectionKind,
    /// The populated optional fields, in display order
    pub fields: Vec<Field>,
}

impl PlannedSection {
    fn bare(kind: SectionKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }
}

/// The ordered sections of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPlan {
    /// What kind of document this is
    pub kind: DocumentKind,
    /// The sections, in order
    pub sections: Vec<PlannedSection>,
}

fn row(rows: &mut Vec<(Field, String)>, field: Field, value: Option<String>) {
    if let Some(value) = value {
        rows.push((field, value));
    }
}

/// The populated rows of a party card, in display order
pub fn party_rows(side: PartySide, party: &Party) -> Vec<(Field, String)> {
    let mut rows = Vec::new();
    row(
        &mut rows,
        Field::CompanyName(side),
        party.distinct_company().map(str::to_owned),
    );
    row(
        &mut rows,
        Field::Address(side),
        join_non_empty(&[party.address.as_deref(), party.locality().as_deref()], ", "),
    );
    row(&mut rows, Field::Phone(side), party.phone.clone());
    row(&mut rows, Field::Email(side), party.email.clone());
    row(
        &mut rows,
        Field::Registration(side),
        party.registration_number.clone(),
    );
    row(&mut rows, Field::Siret(side), party.siret.clone());
    row(&mut rows, Field::VatNumber(side), party.vat_number.clone());
    rows
}

fn parties(first: &Party, second: &Party) -> PlannedSection {
    let fields = party_rows(PartySide::First, first)
        .into_iter()
        .chain(party_rows(PartySide::Second, second))
        .map(|(field, _)| field)
        .collect();
    PlannedSection {
        kind: SectionKind::Parties,
        fields,
    }
}

/// Kind-specific values shown in the project block
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectExtra<'a> {
    /// Daily rate (communication)
    pub daily_rate: Option<f64>,
    /// How the fees are calculated (architecture)
    pub fee_calculation_method: Option<&'a str>,
}

impl<'a> ProjectExtra<'a> {
    /// Collect the extra values of a contract
    pub fn of(contract: &'a UnifiedContract) -> Self {
        match contract {
            UnifiedContract::Architecture(c) => Self {
                daily_rate: None,
                fee_calculation_method: c.fee_calculation_method.as_deref(),
            },
            UnifiedContract::Communication(c) => Self {
                daily_rate: c.daily_rate,
                fee_calculation_method: None,
            },
        }
    }
}

/// The populated rows of the project block, formatted, in display order
///
/// The description comes first; renderers show it as a paragraph rather
/// than a label/value row.
pub fn project_rows(
    kind: DocumentKind,
    project: &Project,
    extra: ProjectExtra,
) -> Vec<(Field, String)> {
    let mut rows = Vec::new();
    let text = |value: &Option<String>| value.clone();
    let date = |value: &Option<String>| value.as_deref().map(format_date);
    let budget = project.budget.map(format_currency);
    row(&mut rows, Field::ProjectDescription, text(&project.description));
    row(&mut rows, Field::ProjectAddress, project.full_address());
    match kind {
        DocumentKind::Contract(ContractKind::Communication) => {
            row(&mut rows, Field::StartDate, date(&project.start_date));
            row(&mut rows, Field::EndDate, date(&project.end_date));
            row(&mut rows, Field::ProjectBudget, budget);
            row(
                &mut rows,
                Field::DailyRate,
                extra
                    .daily_rate
                    .map(|rate| format!("{} HT / jour", format_currency(rate))),
            );
        }
        DocumentKind::Contract(ContractKind::Architecture) => {
            row(&mut rows, Field::ProjectSurface, project.surface.map(format_surface));
            row(&mut rows, Field::ProjectBudget, budget);
            row(&mut rows, Field::AdditionalNotes, text(&project.additional_notes));
            row(&mut rows, Field::Constraints, text(&project.constraints));
            row(&mut rows, Field::Requirements, text(&project.requirements));
            row(
                &mut rows,
                Field::FeeCalculationMethod,
                extra.fee_calculation_method.map(str::to_owned),
            );
        }
        DocumentKind::Quote | DocumentKind::Fallback => {
            row(&mut rows, Field::ProjectSurface, project.surface.map(format_surface));
            row(&mut rows, Field::ProjectBudget, budget);
        }
    }
    rows
}

/// The populated rows of the insurance section
pub fn insurance_rows(contract: &UnifiedContract) -> Vec<(Field, String)> {
    let mut rows = Vec::new();
    if let Some((company, policy)) = contract.insurance() {
        row(&mut rows, Field::InsuranceCompany, company.map(str::to_owned));
        row(&mut rows, Field::InsurancePolicy, policy.map(str::to_owned));
    }
    rows
}

/// The populated rows of the conditions of a quote
pub fn condition_rows(quote: &QuoteModel) -> Vec<(Field, String)> {
    let mut rows = Vec::new();
    row(&mut rows, Field::PaymentTerms, quote.payment_terms.clone());
    let validity = match (&quote.valid_until, quote.validity_days) {
        (Some(until), _) => Some(format!("Jusqu'au {}", format_date(until))),
        (None, Some(days)) => Some(format!("{} jours", days)),
        (None, None) => None,
    };
    row(&mut rows, Field::Validity, validity);
    rows
}

fn fields_of_rows(rows: Vec<(Field, String)>) -> Vec<Field> {
    rows.into_iter().map(|(field, _)| field).collect()
}

impl DocumentPlan {
    /// The plan of a detailed contract
    pub fn for_contract(contract: &UnifiedContract) -> Self {
        let core = contract.core();
        let kind = DocumentKind::Contract(contract.kind());
        let mut sections = vec![
            PlannedSection::bare(SectionKind::Cover),
            parties(&core.first_party, &core.second_party),
            PlannedSection {
                kind: SectionKind::Project,
                fields: fields_of_rows(project_rows(
                    kind,
                    &core.project,
                    ProjectExtra::of(contract),
                )),
            },
            PlannedSection::bare(SectionKind::Phases),
        ];
        if core.phases.iter().any(|p| p.is_included) {
            sections.push(PlannedSection::bare(SectionKind::PhaseDetails));
        }
        sections.push(PlannedSection::bare(SectionKind::Items));
        sections.push(PlannedSection::bare(SectionKind::Totals));
        sections.push(PlannedSection::bare(SectionKind::PaymentSchedule));
        if !core.clauses.is_empty() {
            sections.push(PlannedSection::bare(SectionKind::Clauses));
        }
        let insurance = insurance_rows(contract);
        if !insurance.is_empty() {
            sections.push(PlannedSection {
                kind: SectionKind::Insurance,
                fields: fields_of_rows(insurance),
            });
        }
        sections.push(PlannedSection::bare(SectionKind::Signature));
        Self { kind, sections }
    }

    /// The plan of a quote
    pub fn for_quote(quote: &QuoteModel) -> Self {
        let kind = DocumentKind::Quote;
        let mut sections = vec![
            PlannedSection::bare(SectionKind::Cover),
            parties(&quote.client, &quote.issuer),
            PlannedSection {
                kind: SectionKind::Project,
                fields: fields_of_rows(project_rows(
                    kind,
                    &quote.project,
                    ProjectExtra::default(),
                )),
            },
            PlannedSection::bare(SectionKind::QuoteLines),
            PlannedSection::bare(SectionKind::Totals),
        ];
        let conditions = condition_rows(quote);
        if !conditions.is_empty() {
            sections.push(PlannedSection {
                kind: SectionKind::Conditions,
                fields: fields_of_rows(conditions),
            });
        }
        sections.push(PlannedSection::bare(SectionKind::Signature));
        Self { kind, sections }
    }

    /// The plan for a contract whose kind is not recognized
    pub fn fallback() -> Self {
        Self {
            kind: DocumentKind::Fallback,
            sections: vec![
                PlannedSection::bare(SectionKind::Cover),
                PlannedSection::bare(SectionKind::Fallback),
            ],
        }
    }

    /// The plan for an optional contract model
    pub fn for_optional_contract(contract: Option<&UnifiedContract>) -> Self {
        contract.map_or_else(Self::fallback, Self::for_contract)
    }

    /// The kinds of the sections, in order
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }

    /// The sections that are shown on screen
    pub fn screen_sections(&self) -> impl Iterator<Item = &PlannedSection> {
        self.sections.iter().filter(|s| !s.kind.is_print_only())
    }

    /// Every populated field, tagged with its section, in display order
    pub fn field_trace(&self) -> Vec<(SectionKind, Field)> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter().map(move |f| (s.kind, *f)))
            .collect()
    }

    /// The populated fields of a section, if the section is planned
    pub fn fields_of(&self, kind: SectionKind) -> Option<&[Field]> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.fields.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentPlan, Field, PartySide, SectionKind};
    use crate::{
        builder::build,
        input::{AgencyProfile, BusinessDocument, ClientRecord, ContractTerms},
        model::{Clause, ContractKind},
        quote::build_quote,
    };

    #[test]
    fn architecture_order() {
        let document = BusinessDocument {
            terms: Some(ContractTerms {
                clauses: vec![Clause {
                    key: "resiliation".to_owned(),
                    text: "Trois mois de préavis.".to_owned(),
                }],
                insurance_company: Some("MAF".to_owned()),
                ..ContractTerms::default()
            }),
            ..BusinessDocument::default()
        };
        let model = build(
            &document,
            &[],
            &AgencyProfile::default(),
            ContractKind::Architecture,
        );
        let plan = DocumentPlan::for_contract(&model);
        use SectionKind::*;
        assert_eq!(
            plan.section_kinds(),
            vec![
                Cover,
                Parties,
                Project,
                Phases,
                Items,
                Totals,
                PaymentSchedule,
                Clauses,
                Insurance,
                Signature
            ]
        );
        assert_eq!(
            plan.fields_of(Insurance),
            Some(&[Field::InsuranceCompany][..])
        );
    }

    #[test]
    fn communication_has_no_insurance() {
        let document = BusinessDocument {
            client: Some(ClientRecord {
                name: Some("Mme Martin".to_owned()),
                company_name: Some("Martin & Fils".to_owned()),
                email: Some("martin@example.org".to_owned()),
                ..ClientRecord::default()
            }),
            ..BusinessDocument::default()
        };
        let model = build(
            &document,
            &[],
            &AgencyProfile::default(),
            ContractKind::Communication,
        );
        let plan = DocumentPlan::for_contract(&model);
        assert!(!plan.section_kinds().contains(&SectionKind::Insurance));
        assert_eq!(
            plan.fields_of(SectionKind::Parties),
            Some(
                &[
                    Field::CompanyName(PartySide::First),
                    Field::Email(PartySide::First)
                ][..]
            )
        );
    }

    #[test]
    fn quote_order() {
        let quote = build_quote(
            &BusinessDocument::default(),
            &[],
            &AgencyProfile::default(),
        );
        use SectionKind::*;
        assert_eq!(
            DocumentPlan::for_quote(&quote).section_kinds(),
            vec![Cover, Parties, Project, QuoteLines, Totals, Signature]
        );
        assert_eq!(
            DocumentPlan::fallback().section_kinds(),
            vec![Cover, Fallback]
        );
    }

    #[test]
    fn quote_conditions() {
        let document = BusinessDocument {
            payment_terms: Some("À réception".to_owned()),
            validity_days: Some(30),
            ..BusinessDocument::default()
        };
        let quote = build_quote(&document, &[], &AgencyProfile::default());
        let plan = DocumentPlan::for_quote(&quote);
        assert_eq!(
            plan.fields_of(SectionKind::Conditions),
            Some(&[Field::PaymentTerms, Field::Validity][..])
        );
        assert_eq!(super::condition_rows(&quote)[1].1, "30 jours");
    }
}
