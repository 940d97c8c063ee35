#![warn(missing_docs)]
//! # contract-pdf
//!
//! Paginated A4 rendering of contracts and quotes.
//!
//! A document is laid out in two passes. The section renderers first fill
//! display lists page by page, following the [`DocumentPlan`]. Once the page
//! count is known, the footers are added and the pages are written with
//! [`pdf_base`].
//!
//! ```
//! use contract_model::{kind::CodeClassifier, Job};
//! use contract_pdf::{images::NoImages, render_contract, RenderOptions};
//!
//! let job = Job::from_ron_str(r#"(document: (project_type: "moe"))"#).unwrap();
//! let classifier = CodeClassifier::default();
//! let options = RenderOptions::default();
//! let doc = futures_lite::future::block_on(render_contract(&job, &classifier, &NoImages, &options)).unwrap();
//! assert!(doc.bytes.starts_with(b"%PDF-1.4"));
//! ```

use std::io;

use contract_model::{
    builder::build_contract,
    kind::ContractTypeClassifier,
    model::{Diagnostic, UnifiedContract},
    plan::{DocumentPlan, Field, SectionKind},
    quote::{build_quote, QuoteModel},
    Job, JobKind,
};
use displaydoc::Display;
use pdf_base::{
    chrono::{DateTime, FixedOffset},
    common::MediaBox,
    high::Metadata,
};
use thiserror::Error;

pub mod images;
pub mod layout;
mod lower;
pub mod sections;
pub mod table;
pub mod text;

use images::{DocumentImages, ImageLoader};
use layout::{Layout, LayoutContext, PageOps, SectionStart};
use sections::{apply_footers, render_cover, render_section, CoverInfo, Source};

/// Error when rendering a document
#[derive(Debug, Display, Error)]
pub enum RenderError {
    /// Failed to write the PDF: {0}
    Write(#[from] io::Error),
}

/// Options of the PDF output
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Show descriptions and deliverables in the phase table
    pub show_phase_descriptions: bool,
    /// The `/Producer` of the file
    pub producer: String,
    /// The `/CreationDate` of the file
    pub creation_date: Option<DateTime<FixedOffset>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_phase_descriptions: true,
            producer: format!("contract-pdf {}", env!("CARGO_PKG_VERSION")),
            creation_date: None,
        }
    }
}

/// A rendered document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// The PDF file
    pub bytes: Vec<u8>,
    /// The plan the document follows
    pub plan: DocumentPlan,
    /// The display list of every page
    pub pages: Vec<PageOps>,
    /// Where each section begins
    pub sections: Vec<SectionStart>,
    /// The optional fields that were rendered, in order
    pub trace: Vec<(SectionKind, Field)>,
    /// Problems found in the source records
    pub diagnostics: Vec<Diagnostic>,
}

impl RenderedDocument {
    /// The number of pages, cover included
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text fragments, in page order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(PageOps::texts)
    }

    /// Whether some fragment contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// The index of the page a section begins on
    pub fn page_of(&self, kind: SectionKind) -> Option<usize> {
        self.sections.iter().find(|s| s.kind == kind).map(|s| s.page)
    }
}

/// Lay out a document following its plan
///
/// The cover takes the first page, every other section flows from the
/// second page on. Footers are added once the page count is known.
pub fn layout_document(
    plan: &DocumentPlan,
    source: Source,
    cover: &CoverInfo,
    images: &DocumentImages,
    options: &RenderOptions,
) -> Layout {
    let mut ctx = LayoutContext::new(MediaBox::A4);
    for section in &plan.sections {
        if section.kind == SectionKind::Cover {
            ctx.begin_section(SectionKind::Cover);
            render_cover(&mut ctx, cover, images);
            ctx.new_page();
        } else {
            render_section(&mut ctx, section, source, images, options);
        }
    }
    let mut layout = ctx.finish();
    apply_footers(&mut layout.pages, MediaBox::A4, &cover.footer_line());
    log::debug!(
        "Laid out {} sections on {} pages",
        layout.starts.len(),
        layout.pages.len()
    );
    layout
}

fn metadata(cover: &CoverInfo, options: &RenderOptions) -> Metadata {
    Metadata {
        title: Some(format!("{} {}", cover.kind.badge(), cover.reference)),
        author: Some(cover.issuer.name.clone()),
        subject: Some(cover.project_name.clone()),
        keywords: Vec::new(),
        creator: Some("contract-pdf".to_owned()),
        producer: options.producer.clone(),
        creation_date: options.creation_date,
    }
}

/// Lay out and write a document whose images are already loaded
pub fn render_document(
    plan: DocumentPlan,
    source: Source,
    cover: &CoverInfo,
    images: &DocumentImages,
    options: &RenderOptions,
    diagnostics: Vec<Diagnostic>,
) -> Result<RenderedDocument, RenderError> {
    let layout = layout_document(&plan, source, cover, images, options);
    let hnd = lower::lower_layout(
        &layout,
        plan.kind,
        MediaBox::A4,
        images,
        metadata(cover, options),
    )?;
    let bytes = hnd.to_bytes()?;
    log::info!(
        "Rendered {} {} ({} pages, {} bytes)",
        plan.kind.badge(),
        cover.reference,
        layout.pages.len(),
        bytes.len()
    );
    Ok(RenderedDocument {
        bytes,
        plan,
        pages: layout.pages,
        sections: layout.starts,
        trace: layout.trace,
        diagnostics,
    })
}

/// Render a contract model, or the fallback when there is none
pub fn render_contract_model(
    job: &Job,
    contract: Option<&UnifiedContract>,
    images: &DocumentImages,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    match contract {
        Some(contract) => render_document(
            DocumentPlan::for_contract(contract),
            Source::Contract(contract),
            &CoverInfo::for_contract(contract, &job.agency),
            images,
            options,
            contract.core().diagnostics.clone(),
        ),
        None => render_document(
            DocumentPlan::fallback(),
            Source::Fallback,
            &CoverInfo::for_document(&job.document, &job.agency),
            images,
            options,
            Vec::new(),
        ),
    }
}

/// Render a quote model
pub fn render_quote_model(
    quote: &QuoteModel,
    images: &DocumentImages,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    render_document(
        DocumentPlan::for_quote(quote),
        Source::Quote(quote),
        &CoverInfo::for_quote(quote),
        images,
        options,
        quote.diagnostics.clone(),
    )
}

/// Detect the kind of contract, build it and render it
///
/// An unrecognized kind yields a cover and a short fallback page.
pub async fn render_contract<L: ImageLoader>(
    job: &Job,
    classifier: &dyn ContractTypeClassifier,
    loader: &L,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    let contract = build_contract(
        &job.document,
        &job.lines,
        &job.agency,
        classifier,
        job.contract_type.as_deref(),
    );
    let images = DocumentImages::load(loader, &job.agency).await;
    render_contract_model(job, contract.as_ref(), &images, options)
}

/// Build and render a quote
pub async fn render_quote<L: ImageLoader>(
    job: &Job,
    loader: &L,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    let quote = build_quote(&job.document, &job.lines, &job.agency);
    let images = DocumentImages::load(loader, &job.agency).await;
    render_quote_model(&quote, &images, options)
}

/// Render a job as a contract or a quote, depending on its kind
pub async fn render_job<L: ImageLoader>(
    job: &Job,
    classifier: &dyn ContractTypeClassifier,
    loader: &L,
    options: &RenderOptions,
) -> Result<RenderedDocument, RenderError> {
    match job.kind {
        JobKind::Contract => render_contract(job, classifier, loader, options).await,
        JobKind::Quote => render_quote(job, loader, options).await,
    }
}

#[cfg(test)]
mod tests;
