//! Builder for page content streams
//!
//! Positions are given from the top-left corner of the page, like on a
//! screen, and flipped into PDF user space when the operators are written.

use std::io::{self, Write};

use crate::{font::StandardFont, write::write_string, write::Num};

/// An RGB color with 8 bits per component
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// White
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    fn components(self) -> [Num; 3] {
        let c = |v: u8| Num(f32::from(v) / 255.0);
        [c(self.0), c(self.1), c(self.2)]
    }
}

/// The `Contents` stream of a page
pub struct Contents {
    height: f32,
    inner: Vec<u8>,
}

impl Contents {
    /// Create a new stream for a page of the given height
    pub fn new(height: f32) -> Self {
        Self {
            height,
            inner: Vec::new(),
        }
    }

    fn y(&self, top: f32) -> Num {
        Num(self.height - top)
    }

    /// Set the fill color
    pub fn fill_color(&mut self, color: Rgb) -> io::Result<()> {
        let [r, g, b] = color.components();
        writeln!(self.inner, "{} {} {} rg", r, g, b)
    }

    /// Set the stroke color
    pub fn stroke_color(&mut self, color: Rgb) -> io::Result<()> {
        let [r, g, b] = color.components();
        writeln!(self.inner, "{} {} {} RG", r, g, b)
    }

    /// Fill a rectangle with its upper left corner at (`x`, `top`)
    pub fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32) -> io::Result<()> {
        let bottom = self.y(top + height);
        writeln!(
            self.inner,
            "{} {} {} {} re f",
            Num(x),
            bottom,
            Num(width),
            Num(height)
        )
    }

    /// Stroke the outline of a rectangle
    pub fn stroke_rect(
        &mut self,
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        line_width: f32,
    ) -> io::Result<()> {
        let bottom = self.y(top + height);
        writeln!(
            self.inner,
            "{} w {} {} {} {} re S",
            Num(line_width),
            Num(x),
            bottom,
            Num(width),
            Num(height)
        )
    }

    /// Draw a straight line
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32) -> io::Result<()> {
        writeln!(
            self.inner,
            "{} w {} {} m {} {} l S",
            Num(line_width),
            Num(from.0),
            self.y(from.1),
            Num(to.0),
            self.y(to.1)
        )
    }

    /// Show a line of text with its baseline at `baseline`
    pub fn text(
        &mut self,
        font: StandardFont,
        size: f32,
        x: f32,
        baseline: f32,
        text: &str,
    ) -> io::Result<()> {
        let bytes = font.encode(text);
        if bytes.is_empty() {
            return Ok(());
        }
        write!(
            self.inner,
            "BT /{} {} Tf {} {} Td ",
            font.resource_key(),
            Num(size),
            Num(x),
            self.y(baseline)
        )?;
        write_string(&bytes, &mut self.inner)?;
        writeln!(self.inner, " Tj ET")
    }

    /// Paint the image XObject `key` into the given box
    pub fn image(&mut self, key: &str, x: f32, top: f32, width: f32, height: f32) -> io::Result<()> {
        writeln!(self.inner, "q")?;
        writeln!(
            self.inner,
            "{} 0 0 {} {} {} cm",
            Num(width),
            Num(height),
            Num(x),
            self.y(top + height)
        )?;
        writeln!(self.inner, "/{} Do", key)?;
        writeln!(self.inner, "Q")?;
        Ok(())
    }

    /// Return the finished stream
    pub fn finish(self) -> Vec<u8> {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::{Contents, Rgb};
    use crate::font::StandardFont;

    #[test]
    fn coordinates_are_flipped() {
        let mut c = Contents::new(800.0);
        c.fill_color(Rgb(255, 0, 0)).unwrap();
        c.fill_rect(10.0, 20.0, 100.0, 30.0).unwrap();
        c.text(StandardFont::HelveticaBold, 12.0, 40.0, 100.0, "Total (HT)")
            .unwrap();
        c.image("Im0", 0.0, 0.0, 50.0, 25.0).unwrap();
        let text = String::from_utf8(c.finish()).unwrap();
        assert_eq!(
            text,
            "1 0 0 rg\n\
             10 750 100 30 re f\n\
             BT /F2 12 Tf 40 700 Td (Total \\(HT\\)) Tj ET\n\
             q\n50 0 0 25 0 775 cm\n/Im0 Do\nQ\n"
        );
    }

    #[test]
    fn empty_text_is_skipped() {
        let mut c = Contents::new(800.0);
        c.text(StandardFont::Helvetica, 10.0, 0.0, 0.0, "").unwrap();
        assert!(c.finish().is_empty());
    }
}
