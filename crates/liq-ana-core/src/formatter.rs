use std::io;

use serde_json::ser::{Formatter, PrettyFormatter};

const INDENT: &[u8] = b"  ";
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Pretty printer with a two-space indent.
///
/// With `ensure_ascii` every character outside printable ASCII is written as a `\uXXXX`
/// escape (a surrogate pair above the BMP), so the saved files are plain ASCII.
pub struct AnalysisFormatter {
    pretty: PrettyFormatter<'static>,
    ensure_ascii: bool,
}

impl AnalysisFormatter {
    pub fn new(ensure_ascii: bool) -> Self {
        AnalysisFormatter { pretty: PrettyFormatter::with_indent(INDENT), ensure_ascii }
    }
}

impl Formatter for AnalysisFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.ensure_ascii {
            return writer.write_all(fragment.as_bytes());
        }
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..idx].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write_unicode_escape(writer, *unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn write_unicode_escape<W: ?Sized + io::Write>(writer: &mut W, unit: u16) -> io::Result<()> {
    let buf = [
        b'\\',
        b'u',
        HEX_DIGITS[(unit >> 12) as usize & 0xF],
        HEX_DIGITS[(unit >> 8) as usize & 0xF],
        HEX_DIGITS[(unit >> 4) as usize & 0xF],
        HEX_DIGITS[unit as usize & 0xF],
    ];
    writer.write_all(&buf)
}
