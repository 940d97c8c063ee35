use contract_model::{
    builder::build,
    input::{AgencyProfile, BusinessDocument, ClientRecord, ContractTerms, LineItem},
    kind::CodeClassifier,
    model::{ContractKind, Phase},
    plan::{SectionKind, FALLBACK_MESSAGE},
    Job, JobKind,
};
use futures_lite::future::block_on;

use crate::{
    images::{tests::tiny_png, DocumentImages, ImageError, ImageLoader, NoImages},
    layout::ImageSlot,
    render_contract, render_contract_model, render_job, RenderOptions,
};

struct PngLoader;

impl ImageLoader for PngLoader {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ImageError> {
        Ok(tiny_png())
    }
}

fn phase(code: &str, included: bool) -> Phase {
    Phase {
        code: code.to_owned(),
        name: format!("Phase {}", code),
        description: Some(format!("Description de la phase {}", code)),
        deliverables: vec![format!("Plans {}", code)],
        is_included: included,
        is_optional: false,
        percentage: 10.0,
    }
}

fn architecture_job() -> Job {
    Job {
        kind: JobKind::Contract,
        document: BusinessDocument {
            title: Some("Maison Martin".to_owned()),
            document_number: Some("C-2024-012".to_owned()),
            created_at: Some("2024-03-15".to_owned()),
            project_type: Some("architecture".to_owned()),
            client: Some(ClientRecord {
                name: Some("Mme Martin".to_owned()),
                ..ClientRecord::default()
            }),
            terms: Some(ContractTerms {
                phases: vec![phase("ESQ", true), phase("APS", false)],
                insurance_company: Some("MAF".to_owned()),
                ..ContractTerms::default()
            }),
            ..BusinessDocument::default()
        },
        lines: vec![LineItem {
            name: Some("Honoraires".to_owned()),
            amount: Some(12000.0),
            ..LineItem::default()
        }],
        agency: AgencyProfile {
            name: Some("Atelier Nord".to_owned()),
            siret: Some("123 456 789 00012".to_owned()),
            logo_url: Some("logo.png".to_owned()),
            signature_url: Some("signature.png".to_owned()),
            ..AgencyProfile::default()
        },
        contract_type: None,
    }
}

#[test]
fn architecture_contract() {
    let job = architecture_job();
    let classifier = CodeClassifier::default();
    let options = RenderOptions::default();
    let doc = block_on(render_contract(&job, &classifier, &PngLoader, &options)).unwrap();

    assert!(doc.bytes.starts_with(b"%PDF-1.4"));
    assert!(doc.page_count() >= 2);
    assert_eq!(doc.page_of(SectionKind::Cover), Some(0));
    assert!(doc.page_of(SectionKind::Parties).unwrap() >= 1);
    assert_eq!(doc.trace, doc.plan.field_trace());
    assert!(doc.pages[0].has_image(ImageSlot::Logo));
    assert!(doc.pages.iter().any(|p| p.has_image(ImageSlot::Signature)));

    assert!(doc.contains_text("CONTRAT DE MAÎTRISE D'ŒUVRE"));
    assert!(doc.contains_text("MAÎTRE D'OUVRAGE"));
    assert!(doc.contains_text("15 mars 2024"));
    assert!(doc.contains_text("Total TTC"));
    assert!(doc.contains_text("14\u{202f}400,00\u{a0}€"));
    assert!(doc.contains_text("Bon pour accord"));

    // footers count the cover and skip it
    let count = doc.page_count();
    assert!(!doc.pages[0].texts().any(|t| t.ends_with(&format!("/{}", count))));
    for (i, page) in doc.pages.iter().enumerate().skip(1) {
        let counter = format!("{}/{}", i + 1, count);
        assert!(page.texts().any(|t| t == counter));
        assert!(page.texts().any(|t| t.contains("SIRET 123 456 789 00012")));
    }
}

#[test]
fn phase_descriptions_can_be_hidden() {
    let job = architecture_job();
    let classifier = CodeClassifier::default();
    let hidden = RenderOptions {
        show_phase_descriptions: false,
        ..RenderOptions::default()
    };
    let doc = block_on(render_contract(&job, &classifier, &NoImages, &hidden)).unwrap();
    // the details section still shows the included phase
    assert_eq!(
        doc.texts()
            .filter(|t| *t == "Description de la phase ESQ")
            .count(),
        1
    );
    assert!(!doc.contains_text("Description de la phase APS"));

    let shown = RenderOptions::default();
    let doc = block_on(render_contract(&job, &classifier, &NoImages, &shown)).unwrap();
    assert_eq!(
        doc.texts()
            .filter(|t| *t == "Description de la phase ESQ")
            .count(),
        2
    );
    assert!(doc.contains_text("Description de la phase APS"));
}

#[test]
fn unknown_kind_falls_back() {
    let mut job = architecture_job();
    job.contract_type = Some("promotion_immobiliere".to_owned());
    let classifier = CodeClassifier::default();
    let doc = block_on(render_contract(&job, &classifier, &NoImages, &RenderOptions::default()))
        .unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(
        doc.plan.section_kinds(),
        vec![SectionKind::Cover, SectionKind::Fallback]
    );
    assert!(doc.contains_text(FALLBACK_MESSAGE));
    assert!(doc.contains_text("C-2024-012"));
    assert!(doc.trace.is_empty());
}

#[test]
fn empty_contract_still_renders() {
    let job = Job::default();
    let contract = build(
        &job.document,
        &job.lines,
        &job.agency,
        ContractKind::Communication,
    );
    let doc = render_contract_model(
        &job,
        Some(&contract),
        &DocumentImages::default(),
        &RenderOptions::default(),
    )
    .unwrap();
    assert!(doc.contains_text("Projet sans titre"));
    assert!(doc.contains_text("BROUILLON"));
    assert!(doc.contains_text("Client non renseigné"));
    assert!(doc.contains_text("0,00\u{a0}€"));
    assert!(doc.contains_text("PRESTATIONS"));
    // tables without rows keep their header
    assert!(doc.texts().any(|t| t == "Désignation"));
    assert!(!doc.pages.iter().any(|p| p.has_image(ImageSlot::Logo)));
}

#[test]
fn quote_job() {
    let job = Job::from_ron_str(
        r#"(
            kind: quote,
            document: (title: "Identité visuelle", validity_days: 30, payment_terms: "À réception"),
            lines: [
                (name: "Création", line_type: group),
                (name: "Logo", quantity: 2, unit_price: 400.0),
                (name: "Remise fidélité", line_type: discount, amount: 80.0),
            ],
            agency: (name: "Studio Sud"),
        )"#,
    )
    .unwrap();
    let classifier = CodeClassifier::default();
    let doc = block_on(render_job(&job, &classifier, &NoImages, &RenderOptions::default())).unwrap();
    assert!(doc.contains_text("DEVIS"));
    assert!(doc.contains_text("Création"));
    assert!(doc.contains_text("-80,00\u{a0}€"));
    assert!(doc.contains_text("720,00\u{a0}€"));
    assert!(doc.contains_text("30 jours"));
    assert_eq!(doc.trace, doc.plan.field_trace());
}
