use contract_model::{
    kind::CodeClassifier,
    model::{Phase, EXCLUDED_MARK, INCLUDED_MARK, OPTION_MARK},
    plan::SectionKind,
};
use contract_pdf::{images::NoImages, layout::Op, render_contract, RenderOptions};
use contract_preview::{
    preview_contract,
    tree::{Node, Row},
    PreviewOptions,
};
use contract_tests::load_demo;
use futures_lite::future::block_on;
use pdf_base::font::StandardFont;

fn job() -> contract_model::Job {
    let mut job = load_demo("architecture");
    if let Some(terms) = job.document.terms.as_mut() {
        terms.phases.push(Phase {
            code: "AOR".to_owned(),
            name: "Assistance aux opérations de réception".to_owned(),
            is_included: false,
            ..Phase::default()
        });
    }
    job
}

#[test]
fn phase_markers() {
    let job = job();
    let classifier = CodeClassifier::default();
    let expected = [INCLUDED_MARK, INCLUDED_MARK, OPTION_MARK, EXCLUDED_MARK];

    let preview = preview_contract(&job, &classifier, &PreviewOptions::default());
    let markers: Vec<_> = match preview.section(SectionKind::Phases) {
        Some([Node::Table { rows, .. }]) => rows
            .iter()
            .filter_map(|row| match row {
                Row::Cells(cells) => Some(cells[2].text.clone()),
                Row::Group(_) => None,
            })
            .collect(),
        other => panic!("unexpected phase section {:?}", other),
    };
    assert_eq!(markers, expected);

    let pdf = block_on(render_contract(&job, &classifier, &NoImages, &RenderOptions::default()))
        .unwrap();
    let dingbats = pdf
        .pages
        .iter()
        .flat_map(|page| &page.ops)
        .filter(|op| {
            matches!(op, Op::Text { font: StandardFont::ZapfDingbats, text, .. } if text == INCLUDED_MARK)
        })
        .count();
    assert_eq!(dingbats, 2);
    assert!(pdf.texts().any(|t| t == OPTION_MARK));
    assert!(pdf.texts().any(|t| t == EXCLUDED_MARK));
}

#[test]
fn details_cover_included_phases_only() {
    let job = job();
    let classifier = CodeClassifier::default();
    let options = RenderOptions {
        show_phase_descriptions: false,
        ..RenderOptions::default()
    };
    let pdf = block_on(render_contract(&job, &classifier, &NoImages, &options)).unwrap();
    assert!(pdf.contains_text("ESQ \u{2013} Esquisse"));
    assert!(pdf.contains_text("APS \u{2013} Avant-projet sommaire"));
    assert!(!pdf.contains_text("AOR \u{2013}"));
    assert!(!pdf.contains_text("DET \u{2013}"));
}
