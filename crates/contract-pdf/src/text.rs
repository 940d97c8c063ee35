//! Line breaking with the metrics of the standard fonts

use pdf_base::font::StandardFont;

/// Appended to the last kept line when text is cut off
pub const ELLIPSIS: &str = "\u{2026}";

/// Break `text` into lines that are at most `max_width` points wide
///
/// Explicit line breaks are kept. Words are never split unless a single
/// word is wider than the line, in which case it is broken between
/// characters.
pub fn wrap_text(text: &str, font: StandardFont, size: f32, max_width: f32) -> Vec<String> {
    let fits = |s: &str| font.text_width(s, size) <= max_width;
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() {
                let candidate = format!("{} {}", current, word);
                if fits(&candidate) {
                    current = candidate;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current.push_str(word);
                continue;
            }
            for chr in word.chars() {
                current.push(chr);
                if !fits(&current) && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(chr);
                }
            }
        }
        lines.push(current);
    }
    while lines.last().map_or(false, String::is_empty) {
        lines.pop();
    }
    lines
}

/// Keep at most `max_lines` lines, marking the cut with an ellipsis
pub fn truncate_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    font: StandardFont,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let mut text = last.trim_end().to_owned();
        while !text.is_empty()
            && font.text_width(&format!("{}{}", text, ELLIPSIS), size) > max_width
        {
            text.pop();
        }
        text.push_str(ELLIPSIS);
        *last = text;
    }
    lines
}
