//! Detection of the contract kind

use crate::model::ContractKind;

/// The two predicates that tell which kind of contract a type code denotes
///
/// They are independent of each other; when both match, architecture wins.
pub trait ContractTypeClassifier {
    /// Whether the code denotes an architecture (MOE) contract
    fn is_architecture(&self, code: &str) -> bool;
    /// Whether the code denotes a communication agency contract
    fn is_communication(&self, code: &str) -> bool;
}

impl<A, C> ContractTypeClassifier for (A, C)
where
    A: Fn(&str) -> bool,
    C: Fn(&str) -> bool,
{
    fn is_architecture(&self, code: &str) -> bool {
        (self.0)(code)
    }

    fn is_communication(&self, code: &str) -> bool {
        (self.1)(code)
    }
}

/// The architecture codes known by default
pub const ARCHITECTURE_CODES: &[&str] = &[
    "architecture",
    "architecte",
    "moe",
    "maitrise_oeuvre",
    "mission_complete",
    "interior_design",
    "architecture_interieure",
];

/// The communication codes known by default
pub const COMMUNICATION_CODES: &[&str] = &[
    "communication",
    "agence_communication",
    "branding",
    "graphic_design",
    "web_design",
    "digital",
    "evenementiel",
];

/// A classifier that matches against two lists of codes
///
/// Matching ignores case and surrounding whitespace. A code also matches
/// when it extends a known code with an underscore suffix (`moe_base`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeClassifier {
    architecture: Vec<String>,
    communication: Vec<String>,
}

impl Default for CodeClassifier {
    fn default() -> Self {
        Self::new(
            ARCHITECTURE_CODES.iter().copied(),
            COMMUNICATION_CODES.iter().copied(),
        )
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

fn matches_any(known: &[String], code: &str) -> bool {
    let code = normalize(code);
    !code.is_empty()
        && known.iter().any(|k| {
            code == *k
                || code
                    .strip_prefix(k.as_str())
                    .map_or(false, |rest| rest.starts_with('_'))
        })
}

impl CodeClassifier {
    /// Create a classifier from two lists of codes
    pub fn new<'a>(
        architecture: impl IntoIterator<Item = &'a str>,
        communication: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            architecture: architecture.into_iter().map(normalize).collect(),
            communication: communication.into_iter().map(normalize).collect(),
        }
    }
}

impl ContractTypeClassifier for CodeClassifier {
    fn is_architecture(&self, code: &str) -> bool {
        matches_any(&self.architecture, code)
    }

    fn is_communication(&self, code: &str) -> bool {
        matches_any(&self.communication, code)
    }
}

/// Detect the kind of contract
///
/// The explicit `contract_type` takes precedence over the `project_type`
/// of the document when it is not blank. The result is `None` when
/// neither predicate matches.
pub fn detect_kind(
    classifier: &dyn ContractTypeClassifier,
    contract_type: Option<&str>,
    project_type: Option<&str>,
) -> Option<ContractKind> {
    let code = contract_type
        .filter(|c| !c.trim().is_empty())
        .or(project_type)?;
    if classifier.is_architecture(code) {
        Some(ContractKind::Architecture)
    } else if classifier.is_communication(code) {
        Some(ContractKind::Communication)
    } else {
        log::warn!("No detailed rendering for contract type {:?}", code);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_kind, CodeClassifier, ContractTypeClassifier};
    use crate::model::ContractKind;

    #[test]
    fn default_codes() {
        let c = CodeClassifier::default();
        assert!(c.is_architecture("MOE"));
        assert!(c.is_architecture(" moe_base "));
        assert!(!c.is_architecture("moebius"));
        assert!(c.is_communication("Branding"));
        assert!(!c.is_communication(""));
    }

    #[test]
    fn override_wins() {
        let c = CodeClassifier::default();
        assert_eq!(
            detect_kind(&c, Some("branding"), Some("architecture")),
            Some(ContractKind::Communication)
        );
        assert_eq!(
            detect_kind(&c, Some("  "), Some("architecture")),
            Some(ContractKind::Architecture)
        );
        assert_eq!(detect_kind(&c, Some("plomberie"), Some("moe")), None);
        assert_eq!(detect_kind(&c, None, None), None);
    }

    #[test]
    fn closures_as_predicates() {
        let c = (|code: &str| code == "a", |code: &str| code == "c");
        assert_eq!(detect_kind(&c, Some("c"), None), Some(ContractKind::Communication));
        assert_eq!(detect_kind(&c, Some("x"), None), None);
    }
}
