//! Methods to produce a binary file

use std::io::{self, Write};

use chrono::{DateTime, FixedOffset};

use crate::{common::ObjRef, common::PdfString, util::ByteCounter};

/// API to serialize a dict
#[must_use]
pub struct PdfDict<'a, 'b> {
    first: bool,
    f: &'b mut Formatter<'a>,
}

impl PdfDict<'_, '_> {
    fn check_first(&mut self) -> io::Result<()> {
        if self.first {
            if self.f.indent > 0 {
                writeln!(self.f.inner)?;
            }
            self.f.indent()?;
            writeln!(self.f.inner, "<<")?;
            self.first = false;
        }
        Ok(())
    }

    /// Write a field
    pub fn field(&mut self, name: &str, value: &dyn Serialize) -> io::Result<&mut Self> {
        self.check_first()?;
        self.f.indent += 2;
        self.f.indent()?;
        self.f.needs_space = write_name(name, &mut self.f.inner)?;
        value.write(self.f)?;
        writeln!(self.f.inner)?;
        self.f.indent -= 2;
        Ok(self)
    }

    /// Write flattened
    pub fn embed<X: ToDict>(&mut self, embed: &X) -> io::Result<&mut Self> {
        embed.write(self)?;
        Ok(self)
    }

    /// Write an optional field, if it is not `None`
    pub fn opt_field<X: Serialize>(
        &mut self,
        name: &str,
        field: &Option<X>,
    ) -> io::Result<&mut Self> {
        match field {
            Some(value) => self.field(name, value),
            None => Ok(self),
        }
    }

    /// Write a slice-valued field
    pub fn arr_field<X: Serialize>(&mut self, name: &str, array: &[X]) -> io::Result<&mut Self> {
        self.check_first()?;
        self.f.indent += 2;
        self.f.indent()?;
        write_name(name, &mut self.f.inner)?;
        self.f.pdf_arr().entries(array)?.finish()?;
        writeln!(self.f.inner)?;
        self.f.indent -= 2;
        Ok(self)
    }

    /// Close the dict
    pub fn finish(&mut self) -> io::Result<()> {
        if self.first {
            write!(self.f.inner, "<< >>")?;
            self.f.needs_space = false;
        } else {
            self.f.indent()?;
            write!(self.f.inner, ">>")?;
            if self.f.indent == 0 {
                writeln!(self.f.inner)?;
            }
        }
        Ok(())
    }
}

/// API to serialize a type into the fields of an enclosing dict
pub trait ToDict {
    /// Add the keys to the dict
    fn write(&self, dict: &mut PdfDict<'_, '_>) -> io::Result<()>;
}

/// API to serialize an array
#[must_use]
pub struct PdfArr<'a, 'b> {
    first: bool,
    f: &'b mut Formatter<'a>,
}

impl PdfArr<'_, '_> {
    fn check_first(&mut self) -> io::Result<()> {
        if self.first {
            write!(self.f.inner, "[")?;
            self.first = false;
            self.f.needs_space = false;
        }
        Ok(())
    }

    /// Write the next entry
    pub fn entry<S: Serialize + ?Sized>(&mut self, value: &S) -> io::Result<&mut Self> {
        self.check_first()?;
        value.write(self.f)?;
        Ok(self)
    }

    /// Write entries from an iterator
    pub fn entries<X: Serialize>(
        &mut self,
        i: impl IntoIterator<Item = X>,
    ) -> io::Result<&mut Self> {
        for entry in i {
            self.entry(&entry)?;
        }
        Ok(self)
    }

    /// Close the array
    pub fn finish(&mut self) -> io::Result<()> {
        if self.first {
            write!(self.f.inner, "[]")?;
        } else {
            write!(self.f.inner, "]")?;
        }
        self.f.needs_space = false;
        Ok(())
    }
}

/// Formatter for a PDF document
pub struct Formatter<'a> {
    pub(crate) inner: ByteCounter<&'a mut dyn Write>,
    indent: usize,
    needs_space: bool,
    pub(crate) xref: Vec<Option<(usize, u16, bool)>>,
}

impl<'a> Formatter<'a> {
    /// Create a new formatter
    pub fn new(w: &'a mut dyn Write) -> Self {
        Self {
            inner: ByteCounter::new(w),
            indent: 0,
            needs_space: false,
            xref: vec![Some((0, 65535, true))],
        }
    }

    /// Start writing a PDF dict
    pub fn pdf_dict(&mut self) -> PdfDict<'a, '_> {
        PdfDict {
            first: true,
            f: self,
        }
    }

    /// Start writing a PDF array
    pub fn pdf_arr(&mut self) -> PdfArr<'a, '_> {
        PdfArr {
            first: true,
            f: self,
        }
    }

    /// Write the body of a stream (after its dict)
    pub fn pdf_stream(&mut self, data: &[u8]) -> io::Result<()> {
        writeln!(self.inner, "stream")?;
        self.inner.write_all(data)?;
        if !data.ends_with(&[0x0a]) {
            writeln!(self.inner)?;
        }
        writeln!(self.inner, "endstream")?;
        Ok(())
    }

    /// Write an indirect object and remember its offset
    pub fn obj(&mut self, r#ref: ObjRef, obj: &dyn Serialize) -> io::Result<()> {
        let offset = self.inner.bytes_written();
        writeln!(self.inner, "{} {} obj", r#ref.id, r#ref.gen)?;
        obj.write(self)?;
        writeln!(self.inner, "endobj")?;

        while self.xref.len() <= (r#ref.id as usize) {
            self.xref.push(None);
        }
        self.xref[r#ref.id as usize] = Some((offset, r#ref.gen, false));
        Ok(())
    }

    /// Write a classic xref section, returns its offset
    pub fn xref(&mut self) -> io::Result<usize> {
        let offset = self.inner.bytes_written();
        writeln!(self.inner, "xref")?;

        let mut rest = &self.xref[..];
        let mut index = 0;
        while let Some(pos) = rest.iter().position(Option::is_some) {
            rest = &rest[pos..];
            index += pos;
            let mid = rest.iter().position(Option::is_none).unwrap_or(rest.len());
            let (section, tail) = rest.split_at(mid);

            writeln!(self.inner, "{} {}", index, mid)?;
            for (offset, gen, free) in section.iter().flatten() {
                let mark = if *free { 'f' } else { 'n' };
                // NOTE: each entry must be exactly 20 bytes, so the EOL is SP LF
                writeln!(self.inner, "{:010} {:05} {} ", offset, gen, mark)?;
            }

            rest = tail;
            index += mid;
        }

        Ok(offset)
    }

    /// Number of bytes written so far
    pub fn bytes_written(&self) -> usize {
        self.inner.bytes_written()
    }

    fn indent(&mut self) -> io::Result<()> {
        write!(self.inner, "{:indent$}", "", indent = self.indent)?;
        Ok(())
    }
}

/// Trait to serialize some PDF object
pub trait Serialize {
    /// Write the object to a stream
    fn write(&self, f: &mut Formatter) -> io::Result<()>;
}

impl<X: Serialize + ?Sized> Serialize for &'_ X {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        (*self).write(f)
    }
}

impl Serialize for PdfString {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.needs_space = write_string(self.as_bytes(), &mut f.inner)?;
        Ok(())
    }
}

impl Serialize for md5::Digest {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.needs_space = false;
        write!(f.inner, "<{:x}>", self)
    }
}

macro_rules! serialize_display_impl {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn write(&self, f: &mut Formatter) -> io::Result<()> {
                if f.needs_space {
                    write!(f.inner, " ")?;
                }
                write!(f.inner, "{}", self)?;
                f.needs_space = true;
                Ok(())
            }
        }
    };
}

serialize_display_impl!(u8);
serialize_display_impl!(usize);
serialize_display_impl!(u32);
serialize_display_impl!(i32);
serialize_display_impl!(bool);

impl Serialize for f32 {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        if f.needs_space {
            write!(f.inner, " ")?;
        }
        write!(f.inner, "{}", Num(*self))?;
        f.needs_space = true;
        Ok(())
    }
}

impl<X: Serialize> Serialize for Vec<X> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        self.as_slice().write(f)
    }
}

impl<X: Serialize> Serialize for [X] {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.pdf_arr().entries(self)?.finish()
    }
}

impl Serialize for ObjRef {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        if f.needs_space {
            write!(f.inner, " ")?;
        }
        f.needs_space = write_ref(*self, &mut f.inner)?;
        Ok(())
    }
}

/// A borrowed PDF name (e.g. `/Info`)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PdfName<'a>(pub &'a str);

impl Serialize for PdfName<'_> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        f.needs_space = write_name(self.0, &mut f.inner)?;
        Ok(())
    }
}

impl Serialize for DateTime<FixedOffset> {
    fn write(&self, f: &mut Formatter) -> io::Result<()> {
        let off_sec = self.offset().local_minus_utc();
        let (off_sec, mark) = if off_sec < 0 {
            (-off_sec, '-')
        } else {
            (off_sec, '+')
        };
        let off_min = off_sec / 60;
        let (off_min, off_hour) = (off_min % 60, off_min / 60);
        let date_time = format!(
            "D:{}{}{:02}'{:02}",
            self.format("%Y%m%d%H%M%S"),
            mark,
            off_hour,
            off_min
        );
        f.needs_space = write_string(date_time.as_bytes(), &mut f.inner)?;
        Ok(())
    }
}

/// A number as it appears in a PDF file: fixed point, no exponent,
/// trailing zeros stripped.
#[derive(Debug, Copy, Clone)]
pub struct Num(pub f32);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = if self.0.is_finite() { self.0 } else { 0.0 };
        let text = format!("{:.3}", value);
        let text = text.trim_end_matches('0').trim_end_matches('.');
        match text {
            "" | "-0" => f.write_str("0"),
            text => f.write_str(text),
        }
    }
}

/// Writes a complete literal string to a writer
///
/// Returns whether the next token needs a separating space (never).
pub fn write_string<W: Write>(bytes: &[u8], w: &mut W) -> io::Result<bool> {
    write!(w, "(")?;
    for byte in bytes.iter().copied() {
        match byte {
            b'\\' => write!(w, "\\\\")?,
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            0..=31 | 127..=255 => write!(w, "\\{:03o}", byte)?,
            _ => w.write_all(&[byte])?,
        }
    }
    write!(w, ")")?;
    Ok(false)
}

/// Write a borrowed string as a PDF name
pub fn write_name<W: Write>(name: &str, w: &mut W) -> io::Result<bool> {
    write!(w, "/")?;
    for byte in name.bytes() {
        match byte {
            b'!'..=b'~' if !b"()<>[]{}/%#".contains(&byte) => w.write_all(&[byte])?,
            _ => write!(w, "#{:02X}", byte)?,
        }
    }
    Ok(true)
}

/// Write a plain reference
pub fn write_ref<W: Write>(plain_ref: ObjRef, w: &mut W) -> io::Result<bool> {
    write!(w, "{} {} R", plain_ref.id, plain_ref.gen)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{write_name, write_string, Num};

    #[test]
    fn numbers_have_no_exponent() {
        assert_eq!(Num(12.0).to_string(), "12");
        assert_eq!(Num(0.5).to_string(), "0.5");
        assert_eq!(Num(-0.0001).to_string(), "0");
        assert_eq!(Num(841.889).to_string(), "841.889");
        assert_eq!(Num(f32::NAN).to_string(), "0");
    }

    #[test]
    fn strings_are_escaped() {
        let mut out = Vec::new();
        write_string(b"a(b)\\c\n\xe9", &mut out).unwrap();
        assert_eq!(out, b"(a\\(b\\)\\\\c\\012\\351)".to_vec());
    }

    #[test]
    fn names_escape_delimiters() {
        let mut out = Vec::new();
        write_name("F1 Bold", &mut out).unwrap();
        assert_eq!(out, b"/F1#20Bold".to_vec());
    }
}
