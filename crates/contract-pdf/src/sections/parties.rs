//! The two party cards

use contract_model::{
    model::Party,
    plan::{party_rows, DocumentKind, PartySide},
};
use pdf_base::{content::Rgb, font::StandardFont};

use crate::{
    layout::{line_height, LayoutContext, Op, ACCENT, BODY_SIZE, MUTED, RULE, SMALL_SIZE},
    text::wrap_text,
};

const GAP: f32 = 14.0;
const PAD: f32 = 8.0;

struct CardLine {
    font: StandardFont,
    size: f32,
    color: Rgb,
    text: String,
}

fn card_lines(heading: &str, side: PartySide, party: &Party, width: f32) -> Vec<CardLine> {
    let mut lines = vec![CardLine {
        font: StandardFont::HelveticaBold,
        size: SMALL_SIZE,
        color: ACCENT,
        text: heading.to_owned(),
    }];
    let bold = StandardFont::HelveticaBold;
    for text in wrap_text(&party.name, bold, BODY_SIZE, width) {
        lines.push(CardLine {
            font: bold,
            size: BODY_SIZE,
            color: Rgb::BLACK,
            text,
        });
    }
    for (field, value) in party_rows(side, party) {
        let row = format!("{} : {}", field.label(), value);
        for text in wrap_text(&row, StandardFont::Helvetica, SMALL_SIZE, width) {
            lines.push(CardLine {
                font: StandardFont::Helvetica,
                size: SMALL_SIZE,
                color: MUTED,
                text,
            });
        }
    }
    lines
}

fn height_of(lines: &[CardLine]) -> f32 {
    lines.iter().map(|l| line_height(l.size)).sum::<f32>() + 2.0 * PAD
}

/// Lay out both parties side by side
pub fn render_parties(ctx: &mut LayoutContext, kind: DocumentKind, first: &Party, second: &Party) {
    let [first_heading, second_heading] = kind.party_headings();
    let card_width = (ctx.content_width() - GAP) / 2.0;
    let inner = card_width - 2.0 * PAD;
    let cards = [
        (PartySide::First, card_lines(first_heading, PartySide::First, first, inner)),
        (PartySide::Second, card_lines(second_heading, PartySide::Second, second, inner)),
    ];
    let height = cards
        .iter()
        .map(|(_, lines)| height_of(lines))
        .fold(0.0, f32::max);

    ctx.ensure(height);
    let top = ctx.y();
    for (index, (side, lines)) in cards.iter().enumerate() {
        let x = ctx.left() + index as f32 * (card_width + GAP);
        ctx.push(Op::Rect {
            x,
            top,
            width: card_width,
            height,
            fill: None,
            stroke: Some(RULE),
        });
        let mut y = top + PAD;
        for line in lines {
            ctx.text_at(line.font, line.size, line.color, x + PAD, y, &line.text);
            y += line_height(line.size);
        }
        let party = match side {
            PartySide::First => first,
            PartySide::Second => second,
        };
        for (field, _) in party_rows(*side, party) {
            ctx.record(field);
        }
    }
    ctx.advance(height);
}
