//! FNT resource encoder.
//!
//! Serializes a [`FontDescription`] into a version 3.0 raster font:
//!
//! ```text
//! +-----------------------------+ 0x00
//! | header (0x94 bytes)         |  dfSize, dfFace, dfBitsOffset patched last
//! +-----------------------------+ 0x94
//! | char table: 257 x (u16 width, u32 offset)
//! +-----------------------------+ dfBitsOffset
//! | bitmaps, column-major       |
//! +-----------------------------+ dfFace
//! | face name, NUL-terminated   |
//! +-----------------------------+ dfSize
//! ```

use super::byte_writer::{to_u32, ByteWriter};
use crate::config::FntOptions;
use crate::error::{Error, Result};
use crate::fonts::fnt_header::{layout, EncodedFnt, FntMetrics, FNT_VERSION};
use crate::fonts::{FontDescription, FontStyle, Glyph, GLYPH_COUNT, MAX_COPYRIGHT_LEN};

/// Character whose width Windows takes as the average width.
const AVERAGE_WIDTH_CHAR: u8 = b'X';

/// FNT encoder.
#[derive(Debug, Clone, Default)]
pub struct FntEncoder {
    options: FntOptions,
}

impl FntEncoder {
    /// Create an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with custom options.
    pub fn with_options(options: FntOptions) -> Self {
        Self { options }
    }

    /// Encode a font.
    ///
    /// Fails if any precondition of the format is violated: a missing
    /// glyph, an oversized copyright notice, a glyph with more rows than the
    /// font height, or a value that does not fit its header field.
    pub fn encode(&self, font: &FontDescription) -> Result<EncodedFnt> {
        let glyphs = validate(font)?;
        let widths: Vec<u16> = glyphs.iter().map(|g| g.width).collect();
        let avg_width = glyphs[usize::from(AVERAGE_WIDTH_CHAR)].width;
        let metrics = FntMetrics::from_widths(&widths, avg_width);

        let height = usize::from(font.height);
        let glyph_len = usize::from(metrics.width_bytes) * height;
        let table_len = layout::CHAR_ENTRIES * layout::CHAR_ENTRY_LEN;
        let total = layout::HEADER_LEN
            + table_len
            + layout::CHAR_ENTRIES * glyph_len
            + font.face_name.len()
            + 1;

        log::debug!(
            "Encoding FNT '{}': height {}, max width {}, {} bytes per row, {}",
            font.face_name,
            font.height,
            metrics.max_width,
            metrics.width_bytes,
            if metrics.fixed_pitch { "fixed pitch" } else { "proportional" }
        );

        let mut w = ByteWriter::with_capacity(total);

        w.put_u16(FNT_VERSION);
        let size = w.placeholder_u32("dfSize");
        w.put_padded("dfCopyright", font.copyright.as_bytes(), layout::COPYRIGHT_LEN)?;
        w.put_u16(0); // dfType: raster, bits in file
        w.put_u16(font.point_size);
        w.put_u16(self.options.vertical_resolution);
        w.put_u16(self.options.horizontal_resolution);
        w.put_u16(font.ascent);
        w.put_u16(0); // dfInternalLeading
        w.put_u16(0); // dfExternalLeading
        w.put_u8(u8::from(font.style.contains(FontStyle::ITALIC)));
        w.put_u8(u8::from(font.style.contains(FontStyle::UNDERLINE)));
        w.put_u8(u8::from(font.style.contains(FontStyle::STRIKEOUT)));
        w.put_u16(font.weight);
        w.put_u8(font.charset);
        w.put_u16(metrics.pixel_width());
        w.put_u16(font.height);
        w.put_u8(metrics.pitch_and_family());
        w.put_u16(metrics.avg_width);
        w.put_u16(metrics.max_width);
        w.put_u8(0); // dfFirstChar
        w.put_u8(u8::MAX); // dfLastChar
        w.put_u8(self.options.default_char);
        w.put_u8(self.options.break_char);
        w.put_u16(metrics.width_bytes);
        debug_assert_eq!(w.position(), layout::DEVICE);
        w.put_u32(0); // dfDevice
        let face = w.placeholder_u32("dfFace");
        w.put_u32(0); // dfBitsPointer, filled in at load time
        let bits = w.placeholder_u32("dfBitsOffset");
        w.put_u8(0); // dfReserved
        w.put_u32(metrics.flags());
        w.put_u16(0); // dfAspace
        w.put_u16(0); // dfBspace
        w.put_u16(0); // dfCspace
        w.put_u32(0); // dfColorPointer
        w.put_zeros(16); // dfReserved1
        debug_assert_eq!(w.position(), layout::HEADER_LEN);

        let bitmaps_start = w.position() + table_len;
        w.patch(bits, bitmaps_start)?;

        for i in 0..layout::CHAR_ENTRIES {
            let width = glyphs.get(i).map_or(metrics.avg_width, |g| g.width);
            w.put_u16(width);
            w.put_u32(to_u32("character offset", bitmaps_start + i * glyph_len)?);
        }
        debug_assert_eq!(w.position(), bitmaps_start);

        for i in 0..layout::CHAR_ENTRIES {
            match glyphs.get(i) {
                Some(glyph) => pack_glyph(&mut w, glyph, metrics.width_bytes, height),
                None => w.put_zeros(glyph_len),
            }
        }

        w.patch(face, w.position())?;
        w.put_asciz(&font.face_name);
        w.patch(size, w.position())?;
        debug_assert_eq!(w.position(), total);

        Ok(EncodedFnt::new(w.into_inner(), metrics, font.face_name.clone()))
    }
}

/// Encode a font with default options.
pub fn encode_fnt(font: &FontDescription) -> Result<EncodedFnt> {
    FntEncoder::new().encode(font)
}

/// Emit one glyph bitmap.
///
/// Rows are already left-justified bytes. All rows of the leftmost byte
/// column come first, then all rows of the next column, out to
/// `width_bytes` columns.
fn pack_glyph(w: &mut ByteWriter, glyph: &Glyph, width_bytes: u16, height: usize) {
    for column in 0..usize::from(width_bytes) {
        for y in 0..height {
            w.put_u8(glyph.row_byte(y, column));
        }
    }
}

/// Check every encoder precondition and return the glyph table.
fn validate(font: &FontDescription) -> Result<Vec<&Glyph>> {
    if font.copyright.len() > MAX_COPYRIGHT_LEN {
        return Err(Error::CopyrightTooLong(font.copyright.len()));
    }
    if !font.copyright.is_ascii() {
        return Err(Error::InvalidFont("copyright notice is not ASCII".to_string()));
    }
    if font.height == 0 {
        return Err(Error::MissingField("height"));
    }
    if font.face_name.is_empty() {
        return Err(Error::MissingField("face name"));
    }
    if !font.face_name.is_ascii() || font.face_name.contains('\0') {
        return Err(Error::InvalidFont(format!(
            "face name '{}' must be ASCII without NUL bytes",
            font.face_name.escape_default()
        )));
    }
    if !(1..=1000).contains(&font.weight) {
        return Err(Error::InvalidFont(format!(
            "weight {} is outside 1..=1000",
            font.weight
        )));
    }

    if let Some(code) = font.first_missing_glyph() {
        return Err(Error::MissingGlyph(code));
    }
    let glyphs: Vec<&Glyph> = font.glyphs.iter().take(GLYPH_COUNT).flatten().collect();
    for (code, glyph) in glyphs.iter().enumerate() {
        if glyph.rows.len() > usize::from(font.height) {
            return Err(Error::InvalidFont(format!(
                "character {} has {} rows but the font height is {}",
                code,
                glyph.rows.len(),
                font.height
            )));
        }
    }
    Ok(glyphs)
}
