use contract_model::{
    kind::CodeClassifier,
    plan::{SectionKind, FALLBACK_MESSAGE},
};
use contract_pdf::{images::NoImages, render_contract, RenderOptions};
use contract_preview::{preview_contract, PreviewOptions};
use contract_tests::load_demo;
use futures_lite::future::block_on;

#[test]
fn unknown_type_renders_a_notice() {
    let mut job = load_demo("architecture");
    job.document.project_type = Some("promotion_immobiliere".to_owned());
    let classifier = CodeClassifier::default();

    let pdf = block_on(render_contract(&job, &classifier, &NoImages, &RenderOptions::default()))
        .unwrap();
    assert_eq!(pdf.page_count(), 2);
    assert!(pdf.contains_text(FALLBACK_MESSAGE));
    assert!(pdf.contains_text("MOE-2024-012"));
    assert!(pdf.trace.is_empty());

    let preview = preview_contract(&job, &classifier, &PreviewOptions::default());
    assert_eq!(
        preview.section_kinds(),
        vec![SectionKind::Cover, SectionKind::Fallback]
    );
    let html = preview.to_html().unwrap();
    assert!(html.contains(FALLBACK_MESSAGE));
    assert!(!html.contains("MAÎTRE D"));
}

#[test]
fn explicit_type_wins() {
    let mut job = load_demo("communication");
    job.contract_type = Some("moe".to_owned());
    let classifier = CodeClassifier::default();

    let pdf = block_on(render_contract(&job, &classifier, &NoImages, &RenderOptions::default()))
        .unwrap();
    assert!(pdf.contains_text("CONTRAT DE MAÎTRISE D'ŒUVRE"));

    // an unknown explicit type does not fall back to the project type
    let options = PreviewOptions {
        contract_type: Some("inconnu".to_owned()),
        ..PreviewOptions::default()
    };
    let preview = preview_contract(&job, &classifier, &options);
    assert_eq!(
        preview.section_kinds(),
        vec![SectionKind::Cover, SectionKind::Fallback]
    );
}

#[test]
fn custom_codes() {
    let mut job = load_demo("architecture");
    job.document.project_type = Some("promotion_immobiliere".to_owned());
    let classifier = CodeClassifier::new(["promotion"], ["branding"]);
    let preview = preview_contract(&job, &classifier, &PreviewOptions::default());
    assert!(preview.section_kinds().contains(&SectionKind::Phases));
}
