use contract_model::kind::CodeClassifier;
use contract_pdf::{
    images::NoImages,
    layout::ImageSlot,
    render_job, RenderOptions,
};
use contract_tests::{load_demo, BrokenImages, SolidImages};
use futures_lite::future::block_on;

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn images_are_embedded_once() {
    let job = load_demo("architecture");
    let classifier = CodeClassifier::default();
    let pdf = block_on(render_job(&job, &classifier, &SolidImages, &RenderOptions::default()))
        .unwrap();
    assert!(pdf.pages[0].has_image(ImageSlot::Logo));
    assert!(pdf.pages.iter().any(|p| p.has_image(ImageSlot::Signature)));
    assert!(contains(&pdf.bytes, b"/Subtype/Image"));
    assert!(contains(&pdf.bytes, b"/ImageC"));
}

#[test]
fn broken_images_are_left_out() {
    let job = load_demo("architecture");
    let classifier = CodeClassifier::default();
    for pdf in [
        block_on(render_job(&job, &classifier, &BrokenImages, &RenderOptions::default())),
        block_on(render_job(&job, &classifier, &NoImages, &RenderOptions::default())),
    ] {
        let pdf = pdf.unwrap();
        assert!(!pdf.pages.iter().any(|p| p.has_image(ImageSlot::Logo)));
        assert!(!pdf.pages.iter().any(|p| p.has_image(ImageSlot::Signature)));
        // the issuer name stands in for the logo
        assert!(pdf.pages[0].texts().any(|t| t == "Atelier Nord"));
        assert!(!contains(&pdf.bytes, b"/ImageC"));
    }
}
