use contract_model::{
    kind::CodeClassifier,
    plan::{Field, PartySide, SectionKind, FALLBACK_MESSAGE},
    Job,
};

use crate::{
    preview_job,
    tree::{Node, Row},
    Escaped, PreviewOptions,
};

const JOB: &str = r#"(
    document: (
        title: "Maison <Martin>",
        document_number: "C-2024-012",
        created_at: "2024-03-15",
        project_type: "architecture",
        description: "Extension d'une maison de ville",
        client: (name: "Mme Martin", email: "martin@example.com"),
        terms: (
            phases: [
                (code: "ESQ", name: "Esquisse", description: "Premières intentions", is_included: true, percentage: 10.0),
                (code: "APS", name: "Avant-projet sommaire", is_included: false, percentage: 15.0),
            ],
        ),
    ),
    lines: [(name: "Honoraires", amount: 12000.0)],
    agency: (name: "Atelier Nord", logo_url: "https://cdn.example.com/logo.png"),
)"#;

fn job() -> Job {
    Job::from_ron_str(JOB).unwrap()
}

#[test]
fn follows_the_plan_on_screen() {
    let preview = preview_job(&job(), &CodeClassifier::default(), &PreviewOptions::default());
    let expected: Vec<_> = preview
        .plan
        .section_kinds()
        .into_iter()
        .filter(|k| !k.is_print_only())
        .collect();
    assert_eq!(preview.section_kinds(), expected);
    assert!(!preview.section_kinds().contains(&SectionKind::PhaseDetails));
    assert_eq!(preview.field_trace(), preview.plan.field_trace());
    assert!(preview
        .field_trace()
        .contains(&(SectionKind::Parties, Field::Email(PartySide::First))));
}

#[test]
fn hides_phase_descriptions() {
    let hidden = PreviewOptions {
        show_descriptions: false,
        ..PreviewOptions::default()
    };
    let preview = preview_job(&job(), &CodeClassifier::default(), &hidden);
    let phases = preview.section(SectionKind::Phases).unwrap();
    match &phases[0] {
        Node::Table { rows, .. } => match &rows[0] {
            Row::Cells(cells) => assert!(cells[1].details.is_empty()),
            row => panic!("unexpected row {:?}", row),
        },
        node => panic!("unexpected node {:?}", node),
    }
    let html = preview.to_html().unwrap();
    assert!(!html.contains("Premières intentions"));

    let shown = preview_job(&job(), &CodeClassifier::default(), &PreviewOptions::default());
    assert!(shown.to_html().unwrap().contains("Premières intentions"));
}

#[test]
fn html_is_escaped_and_scaled() {
    let options = PreviewOptions {
        zoom: 500,
        ..PreviewOptions::default()
    };
    let preview = preview_job(&job(), &CodeClassifier::default(), &options);
    assert_eq!(preview.zoom, 200);
    let html = preview.to_html().unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("transform: scale(2);"));
    assert!(html.contains("Maison &lt;Martin&gt;"));
    assert!(!html.contains("<Martin>"));
    assert!(html.contains("src=\"https://cdn.example.com/logo.png\""));
    assert!(html.contains("14\u{202f}400,00\u{a0}€"));
    assert!(html.contains("« Bon pour accord »"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn unknown_kind_shows_notice() {
    let options = PreviewOptions {
        contract_type: Some("promotion_immobiliere".to_owned()),
        ..PreviewOptions::default()
    };
    let preview = preview_job(&job(), &CodeClassifier::default(), &options);
    assert_eq!(
        preview.section_kinds(),
        vec![SectionKind::Cover, SectionKind::Fallback]
    );
    assert_eq!(
        preview.section(SectionKind::Fallback),
        Some(&[Node::Notice(FALLBACK_MESSAGE)][..])
    );
    assert!(preview.field_trace().is_empty());
    assert!(preview.to_html().unwrap().contains("C-2024-012"));
}

#[test]
fn escapes_special_characters() {
    assert_eq!(
        Escaped("a < b & \"c\" 'd'").to_string(),
        "a &lt; b &amp; &quot;c&quot; &#39;d&#39;"
    );
}
