//! The section renderers
//!
//! Each renderer draws one block at the cursor of a [`LayoutContext`] and
//! moves the cursor below it. [`render_section`] dispatches on the planned
//! section, so the order of the sections is the order of the plan.

use contract_model::{
    model::UnifiedContract,
    plan::{condition_rows, insurance_rows, DocumentKind, PlannedSection, ProjectExtra, SectionKind},
    quote::QuoteModel,
};

use crate::{images::DocumentImages, layout::LayoutContext, RenderOptions};

mod clauses;
mod cover;
mod footer;
mod items;
mod parties;
mod phases;
mod project;
mod signature;
mod totals;

pub use clauses::{render_clauses, render_rows};
pub use cover::{render_cover, render_fallback, CoverInfo};
pub use footer::{apply_footers, page_label};
pub use items::{render_items, render_quote_lines};
pub use parties::render_parties;
pub use phases::{render_phase_details, render_phase_table};
pub use project::render_project;
pub use signature::render_signature;
pub use totals::{render_schedule, render_totals};

/// The model a document is rendered from
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// A detailed contract
    Contract(&'a UnifiedContract),
    /// A quote
    Quote(&'a QuoteModel),
    /// A contract of an unrecognized kind
    Fallback,
}

impl Source<'_> {
    /// The kind of document
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Contract(contract) => DocumentKind::Contract(contract.kind()),
            Self::Quote(_) => DocumentKind::Quote,
            Self::Fallback => DocumentKind::Fallback,
        }
    }
}

/// Render a planned section of a contract
fn render_contract_section(
    ctx: &mut LayoutContext,
    kind: SectionKind,
    contract: &UnifiedContract,
    images: &DocumentImages,
    options: &RenderOptions,
) {
    let doc_kind = DocumentKind::Contract(contract.kind());
    let core = contract.core();
    match kind {
        SectionKind::Parties => {
            render_parties(ctx, doc_kind, &core.first_party, &core.second_party)
        }
        SectionKind::Project => {
            render_project(ctx, doc_kind, &core.project, ProjectExtra::of(contract))
        }
        SectionKind::Phases => {
            render_phase_table(ctx, &core.phases, options.show_phase_descriptions)
        }
        SectionKind::PhaseDetails => render_phase_details(ctx, &core.phases),
        SectionKind::Items => render_items(ctx, &core.items),
        SectionKind::Totals => render_totals(ctx, &core.totals),
        SectionKind::PaymentSchedule => {
            render_schedule(ctx, &core.payment_schedule, core.totals.total_ht)
        }
        SectionKind::Clauses => render_clauses(ctx, &core.clauses),
        SectionKind::Insurance => render_rows(ctx, &insurance_rows(contract)),
        SectionKind::Signature => render_signature(
            ctx,
            doc_kind,
            &core.first_party,
            &core.second_party,
            images,
        ),
        SectionKind::Cover
        | SectionKind::QuoteLines
        | SectionKind::Conditions
        | SectionKind::Fallback => {
            log::debug!("Section {:?} is not part of a contract", kind)
        }
    }
}

/// Render a planned section of a quote
fn render_quote_section(
    ctx: &mut LayoutContext,
    kind: SectionKind,
    quote: &QuoteModel,
    images: &DocumentImages,
) {
    let doc_kind = DocumentKind::Quote;
    match kind {
        SectionKind::Parties => render_parties(ctx, doc_kind, &quote.client, &quote.issuer),
        SectionKind::Project => {
            render_project(ctx, doc_kind, &quote.project, ProjectExtra::default())
        }
        SectionKind::QuoteLines => render_quote_lines(ctx, &quote.rows),
        SectionKind::Totals => render_totals(ctx, &quote.totals),
        SectionKind::Conditions => render_rows(ctx, &condition_rows(quote)),
        SectionKind::Signature => {
            render_signature(ctx, doc_kind, &quote.client, &quote.issuer, images)
        }
        _ => log::debug!("Section {:?} is not part of a quote", kind),
    }
}

/// Render one planned section after the cover
pub fn render_section(
    ctx: &mut LayoutContext,
    section: &PlannedSection,
    source: Source,
    images: &DocumentImages,
    options: &RenderOptions,
) {
    let kind = section.kind;
    if kind == SectionKind::Fallback {
        ctx.begin_section(kind);
    } else {
        ctx.begin_titled_section(kind, source.kind().section_title(kind));
    }
    match source {
        Source::Contract(contract) => {
            render_contract_section(ctx, kind, contract, images, options)
        }
        Source::Quote(quote) => render_quote_section(ctx, kind, quote, images),
        Source::Fallback => render_fallback(ctx),
    }
}
