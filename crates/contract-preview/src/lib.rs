#![warn(missing_docs)]
//! # contract-preview
//!
//! The on-screen view of a contract or a quote. A preview follows the same
//! [`DocumentPlan`] as the printed document, leaving out the sections that
//! only exist on paper, and shows the same optional fields in the same
//! order. It can be inspected as a tree of [`Node`]s or written as HTML.
//!
//! ```
//! use contract_model::{kind::CodeClassifier, Job};
//! use contract_preview::{preview_job, PreviewOptions};
//!
//! let job = Job::from_ron_str(r#"(document: (project_type: "moe"))"#).unwrap();
//! let preview = preview_job(&job, &CodeClassifier::default(), &PreviewOptions::default());
//! assert!(preview.to_html().unwrap().contains("MAÎTRE D&#39;OUVRAGE"));
//! ```

use std::fmt;

use contract_model::{
    builder::build_contract,
    kind::ContractTypeClassifier,
    model::UnifiedContract,
    plan::{DocumentPlan, Field, SectionKind},
    quote::{build_quote, QuoteModel},
    Job, JobKind,
};

mod build;
mod html;
pub mod tree;

pub use html::Escaped;
pub use tree::Node;

/// The smallest zoom, in percent
pub const MIN_ZOOM: u16 = 50;
/// The largest zoom, in percent
pub const MAX_ZOOM: u16 = 200;

/// Options of the preview
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Show descriptions and deliverables in the phase table
    pub show_descriptions: bool,
    /// Scale of the page in percent, between [`MIN_ZOOM`] and [`MAX_ZOOM`]
    pub zoom: u16,
    /// The kind of contract, overriding the one of the job
    pub contract_type: Option<String>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            show_descriptions: true,
            zoom: 100,
            contract_type: None,
        }
    }
}

impl PreviewOptions {
    /// The zoom, within bounds
    pub fn zoom(&self) -> u16 {
        self.zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// A document, as shown on screen
#[derive(Debug, Clone)]
pub struct Preview {
    /// The plan the preview follows
    pub plan: DocumentPlan,
    /// One [`Node::Section`] per section shown
    pub nodes: Vec<Node>,
    /// The scale of the page, in percent
    pub zoom: u16,
    title: String,
}

impl Preview {
    /// The kinds of the sections shown, in order
    pub fn section_kinds(&self) -> Vec<SectionKind> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Section { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Every optional field shown, tagged with its section, in order
    pub fn field_trace(&self) -> Vec<(SectionKind, Field)> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.collect_fields(SectionKind::Cover, &mut out);
        }
        out
    }

    /// The nodes of a section
    pub fn section(&self, kind: SectionKind) -> Option<&[Node]> {
        self.nodes.iter().find_map(|node| match node {
            Node::Section {
                kind: k, children, ..
            } if *k == kind => Some(children.as_slice()),
            _ => None,
        })
    }

    /// Write the preview as a standalone HTML page
    pub fn to_html(&self) -> Result<String, fmt::Error> {
        let mut gen = html::HtmlGen::new(&self.title, self.zoom)?;
        for node in &self.nodes {
            gen.node(node)?;
        }
        gen.finish()
    }
}

fn title(plan: &DocumentPlan, reference: &str) -> String {
    format!("{} {}", plan.kind.badge(), reference)
}

/// Preview a contract model, or the fallback when there is none
pub fn preview_contract_model(
    job: &Job,
    contract: Option<&UnifiedContract>,
    options: &PreviewOptions,
) -> Preview {
    let plan = DocumentPlan::for_optional_contract(contract);
    let (nodes, title) = match contract {
        Some(contract) => (
            build::contract_nodes(&plan, contract, &job.agency, options),
            title(&plan, &contract.core().reference),
        ),
        None => (
            build::fallback_nodes(&plan, job),
            title(&plan, &contract_model::builder::reference(&job.document)),
        ),
    };
    log::debug!("Previewing {} sections of {}", nodes.len(), title);
    Preview {
        plan,
        nodes,
        zoom: options.zoom(),
        title,
    }
}

/// Preview a quote model
pub fn preview_quote_model(quote: &QuoteModel, job: &Job, options: &PreviewOptions) -> Preview {
    let plan = DocumentPlan::for_quote(quote);
    let nodes = build::quote_nodes(&plan, quote, &job.agency);
    let title = title(&plan, &quote.reference);
    Preview {
        plan,
        nodes,
        zoom: options.zoom(),
        title,
    }
}

/// Detect the kind of contract, build it and preview it
///
/// The kind given in the options wins over the one of the job.
pub fn preview_contract(
    job: &Job,
    classifier: &dyn ContractTypeClassifier,
    options: &PreviewOptions,
) -> Preview {
    let hint = options
        .contract_type
        .as_deref()
        .or(job.contract_type.as_deref());
    let contract = build_contract(&job.document, &job.lines, &job.agency, classifier, hint);
    preview_contract_model(job, contract.as_ref(), options)
}

/// Build and preview a quote
pub fn preview_quote(job: &Job, options: &PreviewOptions) -> Preview {
    let quote = build_quote(&job.document, &job.lines, &job.agency);
    preview_quote_model(&quote, job, options)
}

/// Preview a job as a contract or a quote, depending on its kind
pub fn preview_job(
    job: &Job,
    classifier: &dyn ContractTypeClassifier,
    options: &PreviewOptions,
) -> Preview {
    match job.kind {
        JobKind::Contract => preview_contract(job, classifier, options),
        JobKind::Quote => preview_quote(job, options),
    }
}

#[cfg(test)]
mod tests;
