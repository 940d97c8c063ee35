//! HTML output of a preview

use std::fmt::{self, Write};

use crate::tree::{Card, Cell, ImageRole, Node, Row};

/// Text with the HTML special characters escaped
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

pub(crate) struct HtmlGen {
    out: String,
}

impl HtmlGen {
    pub fn new(title: &str, zoom: u16) -> Result<Self, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"fr\">")?;
        writeln!(out, "  <head>")?;
        writeln!(out, "    <meta charset=\"utf-8\">")?;
        writeln!(out, "    <title>{}</title>", Escaped(title))?;
        writeln!(out, "    <style>")?;
        writeln!(out, "      body {{")?;
        writeln!(out, "        font-family: Helvetica, Arial, sans-serif;")?;
        writeln!(out, "        font-size: 13px;")?;
        writeln!(out, "        background: #eee;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      .preview {{")?;
        writeln!(out, "        width: 794px;")?;
        writeln!(out, "        margin: 0 auto;")?;
        writeln!(out, "        padding: 56px;")?;
        writeln!(out, "        box-sizing: border-box;")?;
        writeln!(out, "        background: white;")?;
        writeln!(out, "        transform: scale({});", f32::from(zoom) / 100.0)?;
        writeln!(out, "        transform-origin: top center;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      h2 {{")?;
        writeln!(out, "        color: #1f4e79;")?;
        writeln!(out, "        font-size: 15px;")?;
        writeln!(out, "        border-bottom: 1px solid #c8c8c8;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      .badge {{")?;
        writeln!(out, "        display: inline-block;")?;
        writeln!(out, "        padding: 4px 12px;")?;
        writeln!(out, "        color: white;")?;
        writeln!(out, "        background: #1f4e79;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      .strong {{ font-weight: bold; }}")?;
        writeln!(out, "      .muted {{ color: #6e6e6e; }}")?;
        writeln!(out, "      .clamp {{")?;
        writeln!(out, "        display: -webkit-box;")?;
        writeln!(out, "        -webkit-box-orient: vertical;")?;
        writeln!(out, "        overflow: hidden;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      .cards {{ display: flex; gap: 16px; }}")?;
        writeln!(out, "      .card {{")?;
        writeln!(out, "        flex: 1;")?;
        writeln!(out, "        border: 1px solid #c8c8c8;")?;
        writeln!(out, "        padding: 8px;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      table {{ width: 100%; border-collapse: collapse; }}")?;
        writeln!(out, "      th {{ text-align: left; background: #f0f3f7; }}")?;
        writeln!(out, "      td, th {{ padding: 3px 6px; border-bottom: 1px solid #c8c8c8; }}")?;
        writeln!(out, "      .group td {{ font-weight: bold; }}")?;
        writeln!(out, "      .totals {{ margin-left: auto; width: 300px; }}")?;
        writeln!(out, "      .signatures {{ display: flex; gap: 20px; }}")?;
        writeln!(out, "      .signatory {{ flex: 1; }}")?;
        writeln!(out, "      .signature-box {{")?;
        writeln!(out, "        height: 110px;")?;
        writeln!(out, "        border: 1px solid #c8c8c8;")?;
        writeln!(out, "      }}")?;
        writeln!(out, "      .notice {{ text-align: center; font-style: italic; }}")?;
        writeln!(out, "    </style>")?;
        writeln!(out, "  </head>")?;
        writeln!(out, "  <body>")?;
        writeln!(out, "    <main class=\"preview\">")?;
        Ok(Self { out })
    }

    fn cell(&mut self, tag: &str, cell: &Cell) -> fmt::Result {
        write!(self.out, "<{}>{}", tag, Escaped(&cell.text))?;
        for detail in &cell.details {
            write!(self.out, "<br><span class=\"muted\">{}</span>", Escaped(detail))?;
        }
        write!(self.out, "</{}>", tag)
    }

    fn card(&mut self, card: &Card) -> fmt::Result {
        writeln!(self.out, "<div class=\"card\">")?;
        writeln!(self.out, "<div class=\"muted\">{}</div>", Escaped(card.heading))?;
        writeln!(self.out, "<div class=\"strong\">{}</div>", Escaped(&card.name))?;
        for (field, value) in &card.rows {
            writeln!(
                self.out,
                "<div><span class=\"muted\">{}\u{a0}:</span> {}</div>",
                Escaped(field.label()),
                Escaped(value)
            )?;
        }
        writeln!(self.out, "</div>")
    }

    fn signatory(&mut self, signatory: &str, name: &str) -> fmt::Result {
        writeln!(self.out, "<div class=\"signatory\">")?;
        writeln!(self.out, "<div class=\"strong\">{}</div>", Escaped(signatory))?;
        writeln!(self.out, "<div>{}</div>", Escaped(name))
    }

    pub fn node(&mut self, node: &Node) -> fmt::Result {
        match node {
            Node::Section {
                kind,
                title,
                children,
            } => {
                writeln!(self.out, "<section data-section=\"{:?}\">", kind)?;
                if let Some(title) = title {
                    writeln!(self.out, "<h2>{}</h2>", Escaped(title))?;
                }
                let mut signatures = false;
                for child in children {
                    let is_signature =
                        matches!(child, Node::SignatureBox { .. } | Node::Signed { .. });
                    if is_signature && !signatures {
                        writeln!(self.out, "<div class=\"signatures\">")?;
                    } else if !is_signature && signatures {
                        writeln!(self.out, "</div>")?;
                    }
                    signatures = is_signature;
                    self.node(child)?;
                }
                if signatures {
                    writeln!(self.out, "</div>")?;
                }
                writeln!(self.out, "</section>")?;
            }
            Node::Badge(text) => {
                writeln!(self.out, "<div class=\"badge\">{}</div>", Escaped(text))?;
            }
            Node::Heading(text) => writeln!(self.out, "<h3>{}</h3>", Escaped(text))?,
            Node::Text {
                text, style, clamp, ..
            } => match clamp {
                Some(lines) => writeln!(
                    self.out,
                    "<p class=\"{} clamp\" style=\"-webkit-line-clamp: {}\">{}</p>",
                    style.class(),
                    lines,
                    Escaped(text)
                )?,
                None => writeln!(self.out, "<p class=\"{}\">{}</p>", style.class(), Escaped(text))?,
            },
            Node::LabelValue { field, value } => writeln!(
                self.out,
                "<p><span class=\"strong\">{}\u{a0}:</span> {}</p>",
                Escaped(field.label()),
                Escaped(value)
            )?,
            Node::Cards(cards) => {
                writeln!(self.out, "<div class=\"cards\">")?;
                for card in cards {
                    self.card(card)?;
                }
                writeln!(self.out, "</div>")?;
            }
            Node::Table { headers, rows } => {
                writeln!(self.out, "<table>")?;
                write!(self.out, "<tr>")?;
                for header in headers {
                    write!(self.out, "<th>{}</th>", Escaped(header))?;
                }
                writeln!(self.out, "</tr>")?;
                for row in rows {
                    match row {
                        Row::Cells(cells) => {
                            write!(self.out, "<tr>")?;
                            for cell in cells {
                                self.cell("td", cell)?;
                            }
                            writeln!(self.out, "</tr>")?;
                        }
                        Row::Group(name) => writeln!(
                            self.out,
                            "<tr class=\"group\"><td colspan=\"{}\">{}</td></tr>",
                            headers.len(),
                            Escaped(name)
                        )?,
                    }
                }
                writeln!(self.out, "</table>")?;
            }
            Node::Totals(rows) => {
                writeln!(self.out, "<table class=\"totals\">")?;
                let last = rows.len().saturating_sub(1);
                for (index, (label, amount)) in rows.iter().enumerate() {
                    let class = if index == last { " class=\"strong\"" } else { "" };
                    writeln!(
                        self.out,
                        "<tr{}><td>{}</td><td>{}</td></tr>",
                        class,
                        Escaped(label),
                        Escaped(amount)
                    )?;
                }
                writeln!(self.out, "</table>")?;
            }
            Node::Image { role, url } => {
                let alt = match role {
                    ImageRole::Logo => "Logo",
                    ImageRole::Signature => "Signature",
                };
                writeln!(
                    self.out,
                    "<img src=\"{}\" alt=\"{}\" style=\"max-height: 80px\">",
                    Escaped(url),
                    alt
                )?;
            }
            Node::SignatureBox { signatory, name } => {
                self.signatory(signatory, name)?;
                writeln!(self.out, "<div class=\"signature-box\"></div>")?;
                writeln!(self.out, "</div>")?;
            }
            Node::Signed {
                signatory,
                name,
                image,
            } => {
                self.signatory(signatory, name)?;
                if let Some(url) = image {
                    writeln!(
                        self.out,
                        "<img src=\"{}\" alt=\"Signature\" style=\"max-height: 100px\">",
                        Escaped(url)
                    )?;
                }
                writeln!(self.out, "</div>")?;
            }
            Node::Notice(text) => {
                writeln!(self.out, "<p class=\"notice\">{}</p>", Escaped(text))?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<String, fmt::Error> {
        writeln!(self.out, "    </main>")?;
        writeln!(self.out, "  </body>")?;
        writeln!(self.out, "</html>")?;
        Ok(self.out)
    }
}
