//! The unified, renderable contract model

use displaydoc::Display;
use serde::Deserialize;

use crate::{
    de::deserialize_opt_string,
    format::{humanize_key, NBSP},
};

/// The two kinds of contracts that have a detailed rendering
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// A mission contract between a client (MOA) and an architect (MOE)
    Architecture,
    /// A services contract between a client and a communication agency
    Communication,
}

/// One of the two parties of a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Party {
    /// The name of the person or entity
    pub name: String,
    /// The company name, kept only if it differs from `name`
    pub company_name: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// City
    pub city: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// E-Mail address
    pub email: Option<String>,
    /// Professional registration (architecture only)
    pub registration_number: Option<String>,
    /// SIRET number (communication and quotes)
    pub siret: Option<String>,
    /// VAT number (communication and quotes)
    pub vat_number: Option<String>,
}

impl Party {
    /// The company name, if it should be displayed in addition to the name
    pub fn distinct_company(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .filter(|company| *company != self.name)
    }

    /// The postal code and the city on one line
    pub fn locality(&self) -> Option<String> {
        join_non_empty(&[self.postal_code.as_deref(), self.city.as_deref()], " ")
    }
}

/// Join the present, non-blank parts with `sep`
pub fn join_non_empty(parts: &[Option<&str>], sep: &str) -> Option<String> {
    let parts: Vec<&str> = parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    match parts.is_empty() {
        true => None,
        false => Some(parts.join(sep)),
    }
}

/// The project a document is about
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    /// The name, or a placeholder
    pub name: String,
    /// Free-text description
    pub description: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Surface in m² (architecture)
    pub surface: Option<f64>,
    /// Budget before tax
    pub budget: Option<f64>,
    /// Additional notes (architecture)
    pub additional_notes: Option<String>,
    /// Constraints (architecture)
    pub constraints: Option<String>,
    /// Requirements (architecture)
    pub requirements: Option<String>,
    /// Start date (communication)
    pub start_date: Option<String>,
    /// End date (communication)
    pub end_date: Option<String>,
}

impl Project {
    /// The full address of the project on one line
    pub fn full_address(&self) -> Option<String> {
        let locality = join_non_empty(&[self.postal_code.as_deref(), self.city.as_deref()], " ");
        join_non_empty(&[self.address.as_deref(), locality.as_deref()], ", ")
    }
}

/// A mission phase
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Phase {
    /// The short code (e.g. `APS`)
    pub code: String,
    /// The name
    pub name: String,
    /// What the phase consists of
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub description: Option<String>,
    /// What is handed over at the end of the phase
    pub deliverables: Vec<String>,
    /// Whether the phase is part of the mission
    pub is_included: bool,
    /// Whether the phase may be added by the client
    pub is_optional: bool,
    /// The share of the fees, in percent. Not normalized.
    pub percentage: f64,
}

impl Default for Phase {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: None,
            deliverables: Vec::new(),
            is_included: true,
            is_optional: false,
            percentage: 0.0,
        }
    }
}

/// The text of the inclusion cell of a phase
pub const INCLUDED_MARK: &str = "\u{2713}";
/// The text of the inclusion cell of an optional phase
pub const OPTION_MARK: &str = "(option)";
/// The text of the inclusion cell of an excluded phase
pub const EXCLUDED_MARK: &str = "\u{2014}";

impl Phase {
    /// The marker shown in the inclusion column
    pub fn inclusion_marker(&self) -> &'static str {
        match (self.is_included, self.is_optional) {
            (true, _) => INCLUDED_MARK,
            (false, true) => OPTION_MARK,
            (false, false) => EXCLUDED_MARK,
        }
    }

    /// Whether the phase has a description or deliverables
    pub fn has_details(&self) -> bool {
        self.description.as_deref().map_or(false, |d| !d.trim().is_empty())
            || !self.deliverables.is_empty()
    }
}

/// A priced line of the fees / services table
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    /// The name, or a placeholder
    pub name: String,
    /// A longer description
    pub description: Option<String>,
    /// The quantity
    pub quantity: f64,
    /// The unit of the quantity
    pub unit: Option<String>,
    /// The amount before tax, negative for rebates
    pub amount_ht: f64,
    /// Whether the item is optional (or not included)
    pub is_optional: bool,
    /// Whether the item is offered
    pub is_offered: bool,
}

impl PricedItem {
    /// The name with the `(offert)` / `(option)` suffixes
    pub fn display_name(&self) -> String {
        let mut name = self.name.clone();
        if self.is_offered {
            name.push_str(" (offert)");
        }
        if self.is_optional {
            name.push_str(" (option)");
        }
        name
    }
}

/// A stage of the payment schedule
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentStage {
    /// The label of the stage
    pub stage: String,
    /// The phase this payment is due at
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub phase_code: Option<String>,
    /// What triggers the payment
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub description: Option<String>,
    /// The share of the total, in percent
    pub percentage: f64,
}

impl PaymentStage {
    /// The amount due for this stage, always derived from the current total
    pub fn amount_for(&self, total_ht: f64) -> f64 {
        self.percentage / 100.0 * total_ht
    }
}

/// A titled clause
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Clause {
    /// The key, e.g. `conditions_resiliation`
    pub key: String,
    /// The full text
    pub text: String,
}

impl Clause {
    /// The humanized key
    pub fn title(&self) -> String {
        humanize_key(&self.key)
    }
}

/// The amounts of a document
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Totals {
    /// Total before tax
    pub total_ht: f64,
    /// VAT rate as a fraction
    pub tva_rate: f64,
    /// VAT amount
    pub tva_amount: f64,
    /// Total including tax
    pub total_ttc: f64,
}

impl Totals {
    /// Derive the tax amounts from the total before tax
    pub fn from_ht(total_ht: f64, tva_rate: f64) -> Self {
        let tva_amount = total_ht * tva_rate;
        Self {
            total_ht,
            tva_rate,
            tva_amount,
            total_ttc: total_ht + tva_amount,
        }
    }

    /// The label of the VAT row, with the rate rounded to whole percent
    pub fn tva_label(&self) -> String {
        format!("TVA ({}{}%)", (self.tva_rate * 100.0).round() as i64, NBSP)
    }
}

/// Something noteworthy found while building a model
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Diagnostic {
    /// stored total {stored:.2} differs from the total {computed:.2} computed from the lines
    StoredTotalMismatch {
        /// The stored value
        stored: f64,
        /// The value that is used
        computed: f64,
    },
}

/// Everything both kinds of contracts have in common
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCore {
    /// The document number, or a placeholder
    pub reference: String,
    /// The issuance date, as stored
    pub date: Option<String>,
    /// The client side (MOA / client)
    pub first_party: Party,
    /// The issuer side (MOE / agency)
    pub second_party: Party,
    /// The project
    pub project: Project,
    /// The phases
    pub phases: Vec<Phase>,
    /// Fees (architecture) or services (communication)
    pub items: Vec<PricedItem>,
    /// The totals, computed once
    pub totals: Totals,
    /// The payment schedule
    pub payment_schedule: Vec<PaymentStage>,
    /// The clauses in source order
    pub clauses: Vec<Clause>,
    /// Problems found in the source records
    pub diagnostics: Vec<Diagnostic>,
}

/// An architecture (MOE) contract
#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureContract {
    /// The common part
    pub core: ContractCore,
    /// How the fees are calculated
    pub fee_calculation_method: Option<String>,
    /// Insurance company
    pub insurance_company: Option<String>,
    /// Insurance policy number
    pub insurance_policy_number: Option<String>,
}

/// A communication agency contract
#[derive(Debug, Clone, PartialEq)]
pub struct CommunicationContract {
    /// The common part
    pub core: ContractCore,
    /// Daily rate before tax
    pub daily_rate: Option<f64>,
}

/// The renderable contract, tagged by its kind
#[derive(Debug, Clone, PartialEq)]
pub enum UnifiedContract {
    /// See [`ArchitectureContract`]
    Architecture(ArchitectureContract),
    /// See [`CommunicationContract`]
    Communication(CommunicationContract),
}

impl UnifiedContract {
    /// The kind tag
    pub fn kind(&self) -> ContractKind {
        match self {
            Self::Architecture(_) => ContractKind::Architecture,
            Self::Communication(_) => ContractKind::Communication,
        }
    }

    /// The common part
    pub fn core(&self) -> &ContractCore {
        match self {
            Self::Architecture(c) => &c.core,
            Self::Communication(c) => &c.core,
        }
    }

    /// The insurance details, if this is an architecture contract that has any
    pub fn insurance(&self) -> Option<(Option<&str>, Option<&str>)> {
        match self {
            Self::Architecture(c)
                if c.insurance_company.is_some() || c.insurance_policy_number.is_some() =>
            {
                Some((
                    c.insurance_company.as_deref(),
                    c.insurance_policy_number.as_deref(),
                ))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Party, PaymentStage, Phase, Totals};

    #[test]
    fn inclusion_markers() {
        let mut phase = Phase::default();
        assert_eq!(phase.inclusion_marker(), "✓");
        phase.is_included = false;
        assert_eq!(phase.inclusion_marker(), "—");
        phase.is_optional = true;
        assert_eq!(phase.inclusion_marker(), "(option)");
    }

    #[test]
    fn company_only_when_distinct() {
        let mut party = Party {
            name: "Atelier Dupont".to_owned(),
            company_name: Some("Atelier Dupont".to_owned()),
            ..Party::default()
        };
        assert_eq!(party.distinct_company(), None);
        party.company_name = Some("Dupont SARL".to_owned());
        assert_eq!(party.distinct_company(), Some("Dupont SARL"));
    }

    #[test]
    fn stage_amount_follows_total() {
        let stage = PaymentStage {
            stage: "Acompte".to_owned(),
            percentage: 30.0,
            ..PaymentStage::default()
        };
        assert_eq!(stage.amount_for(1000.0), 300.0);
        assert_eq!(stage.amount_for(2000.0), 600.0);
    }

    #[test]
    fn totals_identities() {
        let t = Totals::from_ht(1234.56, 0.2);
        assert_eq!(t.tva_amount, t.total_ht * t.tva_rate);
        assert_eq!(t.total_ttc, t.total_ht + t.tva_amount);
        assert_eq!(t.tva_label(), "TVA (20\u{a0}%)");
        assert_eq!(Totals::from_ht(10.0, 0.055).tva_label(), "TVA (6\u{a0}%)");
        assert_eq!(Totals::from_ht(10.0, 0.021).tva_label(), "TVA (2\u{a0}%)");
    }
}
