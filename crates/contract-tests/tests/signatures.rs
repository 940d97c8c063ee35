use contract_model::{
    builder::build,
    input::LineItem,
    model::ContractKind,
    plan::{SectionKind, ACCEPTANCE_MENTION},
    Job,
};
use contract_pdf::{
    images::DocumentImages,
    layout::{ImageSlot, Op},
    render_contract_model, render_job, RenderOptions, RenderedDocument,
};
use contract_preview::{preview_contract_model, preview_job, Node, PreviewOptions};
use contract_tests::{load_demo, SolidImages};
use futures_lite::future::block_on;

const SIGNATURE_BOX: f32 = 80.0;

/// The left edges of the signature boxes drawn in the signature section
fn signature_boxes(pdf: &RenderedDocument) -> Vec<f32> {
    let start = pdf
        .sections
        .iter()
        .find(|s| s.kind == SectionKind::Signature)
        .unwrap();
    pdf.pages[start.page..]
        .iter()
        .enumerate()
        .flat_map(|(offset, page)| {
            page.ops.iter().filter_map(move |op| match op {
                Op::Rect {
                    x, top, height, ..
                } if *height == SIGNATURE_BOX && (offset > 0 || *top >= start.top) => Some(*x),
                _ => None,
            })
        })
        .collect()
}

fn signature_nodes(nodes: &[Node]) -> (usize, Vec<Option<String>>) {
    let boxes = nodes
        .iter()
        .filter(|n| matches!(n, Node::SignatureBox { .. }))
        .count();
    let signed = nodes
        .iter()
        .filter_map(|n| match n {
            Node::Signed { image, .. } => Some(image.clone()),
            _ => None,
        })
        .collect();
    (boxes, signed)
}

#[test]
fn issuer_column_is_blank_without_signature() {
    let job = Job::default();
    let contract = build(&job.document, &job.lines, &job.agency, ContractKind::Architecture);

    let pdf = render_contract_model(
        &job,
        Some(&contract),
        &DocumentImages::default(),
        &RenderOptions::default(),
    )
    .unwrap();
    let boxes = signature_boxes(&pdf);
    assert_eq!(boxes.len(), 1);
    // the box sits below the client's name
    let client_left = pdf
        .pages
        .iter()
        .flat_map(|p| &p.ops)
        .find_map(|op| match op {
            Op::Text { x, text, .. } if text == "Le Maître d'ouvrage" => Some(*x),
            _ => None,
        })
        .unwrap();
    assert_eq!(boxes[0], client_left);
    let mentions = pdf.texts().filter(|t| t.contains(ACCEPTANCE_MENTION)).count();
    assert_eq!(mentions, 1);
    assert!(!pdf.pages.iter().any(|p| p.has_image(ImageSlot::Signature)));

    let preview = preview_contract_model(&job, Some(&contract), &PreviewOptions::default());
    let section = preview.section(SectionKind::Signature).unwrap();
    assert_eq!(signature_nodes(section), (1, vec![None]));
    let html = preview.to_html().unwrap();
    assert_eq!(html.matches("class=\"signature-box\"").count(), 1);
    assert_eq!(html.matches(ACCEPTANCE_MENTION).count(), 1);
}

#[test]
fn issuer_signature_has_no_box() {
    let job = load_demo("architecture");
    let classifier = contract_model::kind::CodeClassifier::default();

    let pdf = block_on(render_job(&job, &classifier, &SolidImages, &RenderOptions::default()))
        .unwrap();
    assert_eq!(signature_boxes(&pdf).len(), 1);
    assert!(pdf.pages.iter().any(|p| p.has_image(ImageSlot::Signature)));

    let preview = preview_job(&job, &classifier, &PreviewOptions::default());
    let section = preview.section(SectionKind::Signature).unwrap();
    let (boxes, signed) = signature_nodes(section);
    assert_eq!(boxes, 1);
    assert_eq!(signed.len(), 1);
    assert!(signed[0].is_some());
    let html = preview.to_html().unwrap();
    assert_eq!(html.matches("class=\"signature-box\"").count(), 1);
    assert!(html.contains("alt=\"Signature\""));
}

#[test]
fn vat_label_uses_whole_percent() {
    let mut job = Job::default();
    job.document.vat_rate = Some(5.5);
    job.lines.push(LineItem {
        name: Some("Rénovation".to_owned()),
        amount: Some(1000.0),
        ..LineItem::default()
    });
    let contract = build(&job.document, &job.lines, &job.agency, ContractKind::Communication);

    let pdf = render_contract_model(
        &job,
        Some(&contract),
        &DocumentImages::default(),
        &RenderOptions::default(),
    )
    .unwrap();
    let html = preview_contract_model(&job, Some(&contract), &PreviewOptions::default())
        .to_html()
        .unwrap();
    assert!(pdf.contains_text("TVA (6\u{a0}%)"));
    assert!(html.contains("TVA (6\u{a0}%)"));
    assert!(!pdf.contains_text("TVA (5,5"));
    assert!(pdf.contains_text("55,00\u{a0}€"));
}
