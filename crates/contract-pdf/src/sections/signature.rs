use contract_model::{
    model::Party,
    plan::{DocumentKind, ACCEPTANCE_MENTION},
};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::{
    images::DocumentImages,
    layout::{line_height, ImageSlot, LayoutContext, Op, BODY_SIZE, MUTED, RULE, SMALL_SIZE},
};

const GAP: f32 = 20.0;
const SIGNATURE_BOX: f32 = 80.0;

/// Two signature columns
///
/// The client signs in a blank box below the acceptance mention. The issuer
/// column carries its scanned signature, or nothing at all.
pub fn render_signature(
    ctx: &mut LayoutContext,
    kind: DocumentKind,
    client: &Party,
    issuer: &Party,
    images: &DocumentImages,
) {
    let [client_label, issuer_label] = kind.signatories();
    let height = 3.0 * line_height(BODY_SIZE) + line_height(SMALL_SIZE) + SIGNATURE_BOX + 6.0;
    ctx.ensure(height);

    let top = ctx.y();
    let column = (ctx.content_width() - GAP) / 2.0;
    let columns = [
        (ctx.left(), client_label, client),
        (ctx.left() + column + GAP, issuer_label, issuer),
    ];
    let bold = StandardFont::HelveticaBold;
    let regular = StandardFont::Helvetica;
    for (index, (x, label, party)) in columns.into_iter().enumerate() {
        let mut y = top;
        ctx.text_at(bold, BODY_SIZE, Rgb::BLACK, x, y, label);
        y += line_height(BODY_SIZE);
        ctx.text_at(regular, BODY_SIZE, Rgb::BLACK, x, y, &party.name);
        y += line_height(BODY_SIZE);
        if index == 0 {
            let mention = format!("Date et signature, précédées de « {} »", ACCEPTANCE_MENTION);
            ctx.text_at(regular, SMALL_SIZE, MUTED, x, y, &mention);
        }
        y += line_height(SMALL_SIZE) + 4.0;
        if index == 0 {
            ctx.push(Op::Rect {
                x,
                top: y,
                width: column,
                height: SIGNATURE_BOX,
                fill: None,
                stroke: Some(RULE),
            });
        } else if let Some(signature) = images.get(ImageSlot::Signature) {
            let (width, height) = signature.fit(column - 8.0, SIGNATURE_BOX - 8.0);
            ctx.push(Op::Image {
                slot: ImageSlot::Signature,
                x: x + 4.0,
                top: y + 4.0,
                width,
                height,
            });
        }
    }
    ctx.advance(height);
}
