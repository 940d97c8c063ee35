//! The business records this crate consumes
//!
//! These are owned by the surrounding application. Every field besides the
//! flags is optional, absent values degrade gracefully in the builders.

use serde::Deserialize;

use crate::{
    de::{deserialize_opt_f64, deserialize_opt_string, deserialize_opt_u32},
    model::{Clause, PaymentStage, Phase},
};

/// The kind of a [`LineItem`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// A priced line
    #[default]
    Normal,
    /// A rebate, its amount is subtracted from the total
    Discount,
    /// A heading that groups the lines below it
    Group,
}

/// One line of a business document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// The code of the phase this line belongs to (e.g. `ESQ`, `APS`)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub phase_code: Option<String>,
    /// The name of the phase or item
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub name: Option<String>,
    /// A longer description
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub description: Option<String>,
    /// The quantity
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub quantity: Option<f64>,
    /// The unit of the quantity
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub unit: Option<String>,
    /// The price of one unit, before tax
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub unit_price: Option<f64>,
    /// The stored amount, before tax
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub amount: Option<f64>,
    /// Whether the line counts towards the total
    pub is_included: bool,
    /// Whether the line is an option the client may pick
    pub is_optional: bool,
    /// Whether the line is offered free of charge
    pub is_offered: bool,
    /// The kind of line
    pub line_type: LineType,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            phase_code: None,
            name: None,
            description: None,
            quantity: None,
            unit: None,
            unit_price: None,
            amount: None,
            is_included: true,
            is_optional: false,
            is_offered: false,
            line_type: LineType::Normal,
        }
    }
}

impl LineItem {
    /// The amount before tax: the stored one, else `quantity * unit_price`, else zero
    pub fn amount(&self) -> f64 {
        match (self.amount, self.quantity, self.unit_price) {
            (Some(amount), _, _) => amount,
            (None, Some(quantity), Some(price)) => quantity * price,
            _ => 0.0,
        }
    }

    /// Whether this line is a group heading
    pub fn is_group(&self) -> bool {
        self.line_type == LineType::Group
    }

    /// Whether this line is a rebate
    pub fn is_discount(&self) -> bool {
        self.line_type == LineType::Discount
    }
}

/// The client a document is addressed to
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientRecord {
    /// The name of the person or entity
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub name: Option<String>,
    /// The company name
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub company_name: Option<String>,
    /// Street address
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub address: Option<String>,
    /// Postal code
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub postal_code: Option<String>,
    /// City
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub city: Option<String>,
    /// Phone number
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub phone: Option<String>,
    /// E-Mail address
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub email: Option<String>,
    /// SIRET number
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub siret: Option<String>,
    /// Intra-community VAT number
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub vat_number: Option<String>,
}

/// Totals that were computed and stored by some earlier process
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoredTotals {
    /// Total before tax
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub total_ht: Option<f64>,
    /// VAT amount
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub tva_amount: Option<f64>,
    /// Total including tax
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub total_ttc: Option<f64>,
}

/// The contract-specific part of a document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContractTerms {
    /// Explicit mission phases
    pub phases: Vec<Phase>,
    /// Payment stages
    pub payment_schedule: Vec<PaymentStage>,
    /// Clauses, in order
    pub clauses: Vec<Clause>,
    /// How the fees are calculated (architecture)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub fee_calculation_method: Option<String>,
    /// Insurance company (architecture)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub insurance_company: Option<String>,
    /// Insurance policy number (architecture)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub insurance_policy_number: Option<String>,
    /// Daily rate before tax (communication)
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub daily_rate: Option<f64>,
    /// Start of the project (communication)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub start_date: Option<String>,
    /// End of the project (communication)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub end_date: Option<String>,
    /// Additional notes (architecture)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub additional_notes: Option<String>,
    /// Constraints of the site (architecture)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub constraints: Option<String>,
    /// Requirements of the client (architecture)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub requirements: Option<String>,
    /// Precomputed totals
    pub totals: Option<StoredTotals>,
}

/// A quote or contract record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BusinessDocument {
    /// The title, used as the project name
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub title: Option<String>,
    /// The description of the project
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub description: Option<String>,
    /// The number of the document, absent for drafts
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub document_number: Option<String>,
    /// The date of creation (`YYYY-MM-DD` or RFC 3339)
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub created_at: Option<String>,
    /// The discipline of the project, also used to detect the contract kind
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub project_type: Option<String>,
    /// The client
    pub client: Option<ClientRecord>,
    /// Street address of the project
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub project_address: Option<String>,
    /// City of the project
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub project_city: Option<String>,
    /// Postal code of the project
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub project_postal_code: Option<String>,
    /// Surface in m²
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub project_surface: Option<f64>,
    /// Budget of the works, before tax
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub project_budget: Option<f64>,
    /// VAT rate in percent
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub vat_rate: Option<f64>,
    /// Free-text payment terms
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub payment_terms: Option<String>,
    /// Number of days the offer is valid
    #[serde(deserialize_with = "deserialize_opt_u32")]
    pub validity_days: Option<u32>,
    /// Date until which the offer is valid
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub valid_until: Option<String>,
    /// The stored total before tax, possibly stale
    #[serde(deserialize_with = "deserialize_opt_f64")]
    pub total_ht: Option<f64>,
    /// The contract-specific part
    pub terms: Option<ContractTerms>,
}

/// The default VAT rate, in percent
pub const DEFAULT_VAT_RATE: f64 = 20.0;

impl BusinessDocument {
    /// The VAT rate as a fraction (e.g. `0.2`)
    pub fn tva_rate(&self) -> f64 {
        self.vat_rate.unwrap_or(DEFAULT_VAT_RATE) / 100.0
    }
}

/// The issuing agency
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgencyProfile {
    /// Trading name
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub name: Option<String>,
    /// Registered company name
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub legal_name: Option<String>,
    /// Name of the contact person
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub contact_name: Option<String>,
    /// Street address
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub address: Option<String>,
    /// Postal code
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub postal_code: Option<String>,
    /// City
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub city: Option<String>,
    /// Phone number
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub phone: Option<String>,
    /// E-Mail address
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub email: Option<String>,
    /// Website
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub website: Option<String>,
    /// SIRET number
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub siret: Option<String>,
    /// Intra-community VAT number
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub vat_number: Option<String>,
    /// Registration with the order of architects
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub registration_number: Option<String>,
    /// Location of the logo
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub logo_url: Option<String>,
    /// Location of the signature image
    #[serde(deserialize_with = "deserialize_opt_string")]
    pub signature_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{BusinessDocument, LineItem, LineType};

    #[test]
    fn line_amount_fallbacks() {
        let stored = LineItem {
            amount: Some(100.0),
            quantity: Some(3.0),
            unit_price: Some(10.0),
            ..LineItem::default()
        };
        assert_eq!(stored.amount(), 100.0);
        let computed = LineItem {
            quantity: Some(3.0),
            unit_price: Some(10.0),
            ..LineItem::default()
        };
        assert_eq!(computed.amount(), 30.0);
        assert_eq!(LineItem::default().amount(), 0.0);
    }

    #[test]
    fn lines_are_included_by_default() {
        let line: LineItem = ron::from_str("(name: \"Esquisse\", amount: 1200)").unwrap();
        assert!(line.is_included);
        assert_eq!(line.line_type, LineType::Normal);
        assert_eq!(line.name.as_deref(), Some("Esquisse"));
        assert_eq!(line.amount(), 1200.0);

        let line: LineItem = ron::from_str("(line_type: discount, amount: -50.5)").unwrap();
        assert!(line.is_discount());
    }

    #[test]
    fn default_vat_rate() {
        let doc = BusinessDocument::default();
        assert_eq!(doc.tva_rate(), 0.2);
        let doc = BusinessDocument {
            vat_rate: Some(10.0),
            ..BusinessDocument::default()
        };
        assert_eq!(doc.tva_rate(), 0.1);
    }
}
