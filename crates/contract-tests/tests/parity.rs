use contract_model::{
    kind::CodeClassifier,
    plan::{Field, PartySide, SectionKind},
};
use contract_pdf::{images::NoImages, render_job, RenderOptions};
use contract_preview::{preview_job, PreviewOptions};
use contract_tests::{load_demo, DEMOS};
use futures_lite::future::block_on;

#[test]
fn pdf_and_preview_show_the_same_fields() {
    let classifier = CodeClassifier::default();
    for name in DEMOS {
        let job = load_demo(name);
        let pdf = block_on(render_job(&job, &classifier, &NoImages, &RenderOptions::default()))
            .unwrap();
        let preview = preview_job(&job, &classifier, &PreviewOptions::default());

        assert!(!pdf.trace.is_empty(), "{}", name);
        assert_eq!(pdf.trace, preview.field_trace(), "{}", name);
        assert_eq!(pdf.trace, pdf.plan.field_trace(), "{}", name);

        let on_screen: Vec<_> = pdf
            .plan
            .section_kinds()
            .into_iter()
            .filter(|kind| !kind.is_print_only())
            .collect();
        assert_eq!(preview.section_kinds(), on_screen, "{}", name);

        let printed: Vec<_> = pdf.sections.iter().map(|s| s.kind).collect();
        assert_eq!(printed, pdf.plan.section_kinds(), "{}", name);
    }
}

#[test]
fn architecture_fields() {
    let job = load_demo("architecture");
    let classifier = CodeClassifier::default();
    let pdf = block_on(render_job(&job, &classifier, &NoImages, &RenderOptions::default()))
        .unwrap();
    for expected in [
        (SectionKind::Parties, Field::Email(PartySide::First)),
        (SectionKind::Project, Field::ProjectDescription),
        (SectionKind::Project, Field::ProjectSurface),
        (SectionKind::Project, Field::Constraints),
        (SectionKind::Project, Field::FeeCalculationMethod),
        (SectionKind::Insurance, Field::InsuranceCompany),
    ] {
        assert!(pdf.trace.contains(&expected), "{:?}", expected);
    }
    assert!(!pdf
        .trace
        .contains(&(SectionKind::Project, Field::Requirements)));
    assert!(pdf.contains_text("13\u{202f}500,00\u{a0}€"));
    assert!(pdf.contains_text("DÉTAIL DES PHASES"));
    assert!(pdf.page_of(SectionKind::PhaseDetails).is_some());
}

#[test]
fn communication_fields() {
    let job = load_demo("communication");
    let classifier = CodeClassifier::default();
    let preview = preview_job(&job, &classifier, &PreviewOptions::default());
    let trace = preview.field_trace();
    for field in [Field::StartDate, Field::EndDate, Field::DailyRate] {
        assert!(trace.contains(&(SectionKind::Project, field)), "{:?}", field);
    }
    let html = preview.to_html().unwrap();
    assert!(html.contains("CONTRAT DE PRESTATIONS"));
    assert!(html.contains("AGENCE"));
    assert!(html.contains("650,00\u{a0}€ HT / jour"));
    assert!(html.contains("1 juin 2024"));
    assert!(html.contains("Déclinaisons (option)"));
    assert!(html.contains("Dupont &amp; Fils SAS"));
}
