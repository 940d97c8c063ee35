use contract_model::{
    builder::build,
    model::ContractKind,
    quote::build_quote,
    Job,
};
use contract_pdf::{
    images::DocumentImages, render_contract_model, render_quote_model, RenderOptions,
};
use contract_preview::{preview_contract_model, preview_quote_model, PreviewOptions};

const PLACEHOLDERS: [&str; 3] = ["Projet sans titre", "BROUILLON", "Client non renseigné"];

#[test]
fn empty_contracts_render_with_placeholders() {
    let job = Job::default();
    for kind in [ContractKind::Architecture, ContractKind::Communication] {
        let contract = build(&job.document, &job.lines, &job.agency, kind);
        assert_eq!(contract.core().totals.total_ttc, 0.0);

        let pdf = render_contract_model(
            &job,
            Some(&contract),
            &DocumentImages::default(),
            &RenderOptions::default(),
        )
        .unwrap();
        let preview = preview_contract_model(&job, Some(&contract), &PreviewOptions::default());
        let html = preview.to_html().unwrap();

        for placeholder in PLACEHOLDERS {
            assert!(pdf.contains_text(placeholder), "{:?} {}", kind, placeholder);
            assert!(html.contains(placeholder), "{:?} {}", kind, placeholder);
        }
        assert!(pdf.contains_text("0,00\u{a0}€"));
        assert!(html.contains("0,00\u{a0}€"));
        assert_eq!(pdf.trace, preview.field_trace());
        assert!(pdf.diagnostics.is_empty());
    }
}

#[test]
fn empty_quote_renders() {
    let job = Job::default();
    let quote = build_quote(&job.document, &job.lines, &job.agency);
    let pdf = render_quote_model(&quote, &DocumentImages::default(), &RenderOptions::default())
        .unwrap();
    let preview = preview_quote_model(&quote, &job, &PreviewOptions::default());
    assert!(pdf.contains_text("DEVIS"));
    assert!(pdf.texts().any(|t| t == "PU HT"));
    assert!(preview.to_html().unwrap().contains("<th>PU HT</th>"));
    assert_eq!(pdf.trace, preview.field_trace());
}

#[test]
fn stored_totals_are_checked() {
    let mut job = contract_tests::load_demo("architecture");
    job.document.total_ht = Some(10000.0);
    let contract = build(&job.document, &job.lines, &job.agency, ContractKind::Architecture);
    let pdf = render_contract_model(
        &job,
        Some(&contract),
        &DocumentImages::default(),
        &RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(pdf.diagnostics.len(), 1);
    assert!(pdf.contains_text("11\u{202f}250,00\u{a0}€"));
}
