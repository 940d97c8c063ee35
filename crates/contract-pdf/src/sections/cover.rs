//! The cover page and the fallback message

use contract_model::{
    builder::{agency_party, base_project, client_party, reference},
    format::format_date,
    input::{AgencyProfile, BusinessDocument},
    model::{join_non_empty, Party, UnifiedContract},
    plan::{DocumentKind, FALLBACK_MESSAGE},
    quote::QuoteModel,
};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::{
    images::DocumentImages,
    layout::{line_height, ImageSlot, LayoutContext, Op, ACCENT, BODY_SIZE, MUTED, RULE, SMALL_SIZE},
    text::{truncate_lines, wrap_text},
};

const LOGO_MAX: (f32, f32) = (180.0, 80.0);
const NAME_SIZE: f32 = 22.0;
const PROJECT_SIZE: f32 = 20.0;
const BADGE_SIZE: f32 = 10.0;

/// What the cover page shows
#[derive(Debug, Clone)]
pub struct CoverInfo {
    /// The kind of document, shown as a badge
    pub kind: DocumentKind,
    /// The reference
    pub reference: String,
    /// The date, as stored
    pub date: Option<String>,
    /// The project name
    pub project_name: String,
    /// The client
    pub client: Party,
    /// The issuer
    pub issuer: Party,
    /// The SIRET of the issuer, shown even where the party doesn't list it
    pub siret: Option<String>,
}

fn agency_siret(agency: &AgencyProfile) -> Option<String> {
    agency.siret.clone().filter(|s| !s.trim().is_empty())
}

impl CoverInfo {
    /// The cover of a detailed contract
    pub fn for_contract(contract: &UnifiedContract, agency: &AgencyProfile) -> Self {
        let core = contract.core();
        Self {
            kind: DocumentKind::Contract(contract.kind()),
            reference: core.reference.clone(),
            date: core.date.clone(),
            project_name: core.project.name.clone(),
            client: core.first_party.clone(),
            issuer: core.second_party.clone(),
            siret: agency_siret(agency),
        }
    }

    /// The cover of a quote
    pub fn for_quote(quote: &QuoteModel) -> Self {
        Self {
            kind: DocumentKind::Quote,
            reference: quote.reference.clone(),
            date: quote.date.clone(),
            project_name: quote.project.name.clone(),
            client: quote.client.clone(),
            issuer: quote.issuer.clone(),
            siret: quote.issuer.siret.clone(),
        }
    }

    /// The cover of a contract whose kind is not recognized
    pub fn for_document(document: &BusinessDocument, agency: &AgencyProfile) -> Self {
        Self {
            kind: DocumentKind::Fallback,
            reference: reference(document),
            date: document.created_at.clone().filter(|s| !s.trim().is_empty()),
            project_name: base_project(document).name,
            client: client_party(document.client.as_ref()),
            issuer: agency_party(agency),
            siret: agency_siret(agency),
        }
    }

    /// The issuer line of the page footers
    pub fn footer_line(&self) -> String {
        let issuer = &self.issuer;
        match (&self.siret, &issuer.registration_number) {
            (Some(siret), _) => format!("{} \u{b7} SIRET {}", issuer.name, siret),
            (None, Some(number)) => format!("{} \u{b7} Ordre n\u{b0} {}", issuer.name, number),
            (None, None) => issuer.name.clone(),
        }
    }
}

/// Lay out the cover on the current (first) page
pub fn render_cover(ctx: &mut LayoutContext, cover: &CoverInfo, images: &DocumentImages) {
    let center = ctx.media_box().width / 2.0;
    let mut y = 110.0;

    match images.get(ImageSlot::Logo) {
        Some(logo) => {
            let (width, height) = logo.fit(LOGO_MAX.0, LOGO_MAX.1);
            ctx.push(Op::Image {
                slot: ImageSlot::Logo,
                x: center - width / 2.0,
                top: y,
                width,
                height,
            });
            y += height + 30.0;
        }
        None => {
            let font = StandardFont::HelveticaBold;
            ctx.text_centered(font, NAME_SIZE, ACCENT, center, y, &cover.issuer.name);
            y += line_height(NAME_SIZE) + 30.0;
        }
    }

    let badge = cover.kind.badge();
    let badge_width = StandardFont::HelveticaBold.text_width(badge, BADGE_SIZE) + 24.0;
    let badge_height = line_height(BADGE_SIZE) + 10.0;
    ctx.push(Op::Rect {
        x: center - badge_width / 2.0,
        top: y,
        width: badge_width,
        height: badge_height,
        fill: Some(ACCENT),
        stroke: None,
    });
    let font = StandardFont::HelveticaBold;
    ctx.text_centered(font, BADGE_SIZE, Rgb::WHITE, center, y + 5.0, badge);
    y += badge_height + 40.0;

    let width = ctx.content_width() - 40.0;
    let title = wrap_text(&cover.project_name, font, PROJECT_SIZE, width);
    for line in truncate_lines(title, 2, font, PROJECT_SIZE, width) {
        ctx.text_centered(font, PROJECT_SIZE, Rgb::BLACK, center, y, &line);
        y += line_height(PROJECT_SIZE);
    }
    y += 16.0;

    let regular = StandardFont::Helvetica;
    let reference = format!("N\u{b0} {}", cover.reference);
    ctx.text_centered(regular, 12.0, Rgb::BLACK, center, y, &reference);
    y += line_height(12.0);
    if let Some(date) = &cover.date {
        let date = format!("Date : {}", format_date(date));
        ctx.text_centered(regular, BODY_SIZE, MUTED, center, y, &date);
        y += line_height(BODY_SIZE);
    }
    y += 40.0;

    let [client_heading, _] = cover.kind.party_headings();
    ctx.text_centered(font, SMALL_SIZE, MUTED, center, y, client_heading);
    y += line_height(SMALL_SIZE) + 2.0;
    ctx.text_centered(font, 13.0, Rgb::BLACK, center, y, &cover.client.name);

    render_issuer_block(ctx, &cover.issuer, cover.siret.as_deref());
}

/// The contact details of the issuer at the foot of the cover
fn render_issuer_block(ctx: &mut LayoutContext, issuer: &Party, siret: Option<&str>) {
    let center = ctx.media_box().width / 2.0;
    let contact = join_non_empty(&[issuer.phone.as_deref(), issuer.email.as_deref()], " \u{b7} ");
    let siret = siret.map(|s| format!("SIRET {}", s));
    let lines: Vec<String> = [
        join_non_empty(&[issuer.address.as_deref(), issuer.locality().as_deref()], ", "),
        contact,
        siret,
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut y = ctx.bottom() - line_height(SMALL_SIZE) * (lines.len() + 1) as f32 - 8.0;
    ctx.push(Op::Line {
        from: (center - 120.0, y),
        to: (center + 120.0, y),
        width: 0.5,
        color: RULE,
    });
    y += 8.0;
    let bold = StandardFont::HelveticaBold;
    ctx.text_centered(bold, SMALL_SIZE, Rgb::BLACK, center, y, &issuer.name);
    y += line_height(SMALL_SIZE);
    for line in &lines {
        ctx.text_centered(StandardFont::Helvetica, SMALL_SIZE, MUTED, center, y, line);
        y += line_height(SMALL_SIZE);
    }
}

/// The message shown instead of the body of an unrecognized contract
pub fn render_fallback(ctx: &mut LayoutContext) {
    let center = ctx.media_box().width / 2.0;
    let top = ctx.media_box().height / 3.0;
    let font = StandardFont::HelveticaOblique;
    ctx.text_centered(font, 12.0, MUTED, center, top, FALLBACK_MESSAGE);
    ctx.set_y(top + line_height(12.0));
}
