//! Standard (base-14) fonts: metrics used for measuring text and the WinAnsi
//! encoding used when placing it.

/// The fonts the writer registers on every page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 2] = [StandardFont::Helvetica, StandardFont::HelveticaBold];

    pub fn for_weight(bold: bool) -> Self {
        if bold {
            StandardFont::HelveticaBold
        } else {
            StandardFont::Helvetica
        }
    }

    /// PostScript name written as the font's BaseFont.
    pub fn base_font(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"F1",
            StandardFont::HelveticaBold => b"F2",
        }
    }

    /// Ascender as a fraction of the font size.
    pub fn ascender_ratio(self) -> f32 {
        0.718
    }

    /// Width of a single character in 1000-units.
    pub fn char_width_1000(self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte < 32 {
            return 0.0;
        }
        match self {
            StandardFont::Helvetica => helvetica_width(byte),
            StandardFont::HelveticaBold => helvetica_bold_width(byte),
        }
    }

    pub fn word_width(self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub fn space_width(self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi bytes.
fn helvetica_width(b: u8) -> f32 {
    match b {
        32 => 278.0,                          // space
        33..=47 => 333.0,                     // punctuation
        48..=57 => 556.0,                     // digits
        58..=64 => 333.0,                     // more punctuation
        73 | 74 => 278.0,                     // I J (narrow uppercase)
        77 => 833.0,                          // M (wide)
        65..=90 => 667.0,                     // uppercase A-Z (average)
        91..=96 => 333.0,                     // brackets etc.
        102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
        109 | 119 => 833.0,                   // m w (wide)
        97..=122 => 556.0,                    // lowercase a-z (average)
        _ => 556.0,
    }
}

fn helvetica_bold_width(b: u8) -> f32 {
    match b {
        32 => 278.0,
        33..=47 => 333.0,
        48..=57 => 556.0,
        58..=64 => 333.0,
        73 => 278.0,
        74 => 556.0,
        77 => 833.0,
        65..=90 => 722.0,
        91..=96 => 333.0,
        105 | 106 | 108 => 278.0,
        102 | 116 => 333.0,
        109 => 889.0,
        119 => 778.0,
        97..=122 => 611.0,
        _ => 611.0,
    }
}

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b >= 32)
        .collect()
}
