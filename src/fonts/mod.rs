//! Font data model.
//!
//! A [`FontDescription`] is the structured form of a text font description:
//! header metadata plus one [`Glyph`] for each of the 256 character codes.
//! The FNT encoder consumes it; the introspector works on the encoded
//! result ([`EncodedFnt`]).

pub mod fnt_header;
pub mod fnt_inspect;
mod glyph;

pub use fnt_header::{EncodedFnt, FntMetrics};
pub use glyph::{parse_row, row_len, Glyph};

use bitflags::bitflags;

/// Number of character codes in a font.
pub const GLYPH_COUNT: usize = 256;

/// Longest copyright notice that fits the header field with its terminator.
pub const MAX_COPYRIGHT_LEN: usize = 59;

/// Default font weight (normal).
pub const DEFAULT_WEIGHT: u16 = 400;

bitflags! {
    /// Style attributes stored as individual header bytes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FontStyle: u8 {
        /// Slanted glyphs
        const ITALIC = 1 << 0;
        /// Underlined glyphs
        const UNDERLINE = 1 << 1;
        /// Struck-out glyphs
        const STRIKEOUT = 1 << 2;
    }
}

/// A complete bitmap font ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescription {
    /// Copyright notice, at most 59 ASCII bytes
    pub copyright: String,
    /// Face name written after the bitmaps
    pub face_name: String,
    /// Nominal point size
    pub point_size: u16,
    /// Cell height in pixels; every glyph has this many rows
    pub height: u16,
    /// Distance from the top of the cell to the baseline
    pub ascent: u16,
    /// Weight on the 1..=1000 scale; 400 is normal
    pub weight: u16,
    /// Character set identifier
    pub charset: u8,
    /// Italic / underline / strikeout
    pub style: FontStyle,
    /// One slot per character code; all must be filled before encoding
    pub glyphs: Vec<Option<Glyph>>,
}

impl FontDescription {
    /// Create a description with no glyphs. The point size starts out equal
    /// to the height.
    pub fn new(face_name: impl Into<String>, height: u16, ascent: u16) -> Self {
        Self {
            copyright: String::new(),
            face_name: face_name.into(),
            point_size: height,
            height,
            ascent,
            weight: DEFAULT_WEIGHT,
            charset: 0,
            style: FontStyle::empty(),
            glyphs: vec![None; GLYPH_COUNT],
        }
    }

    /// Set the copyright notice.
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = copyright.into();
        self
    }

    /// Set the style flags.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Fill every character slot with a clone of `glyph`.
    pub fn fill_glyphs(mut self, glyph: &Glyph) -> Self {
        self.glyphs = vec![Some(glyph.clone()); GLYPH_COUNT];
        self
    }

    /// Put `glyph` at character `code`, returning whatever was there.
    pub fn set_glyph(&mut self, code: u8, glyph: Glyph) -> Option<Glyph> {
        self.glyphs[usize::from(code)].replace(glyph)
    }

    /// Glyph at character `code`, if defined.
    pub fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.glyphs.get(usize::from(code)).and_then(Option::as_ref)
    }

    /// First character code without a glyph.
    pub fn first_missing_glyph(&self) -> Option<usize> {
        (0..GLYPH_COUNT).find(|&i| self.glyphs.get(i).map_or(true, Option::is_none))
    }
}
