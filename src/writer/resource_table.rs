//! NE resource table, name tables and resource data layout.
//!
//! Offsets and lengths in the resource table are stored in units of
//! `1 << ALIGN_SHIFT` bytes. Every resource is padded to that unit so the
//! stored values are exact; a misaligned value is an error, never rounded.

use super::byte_writer::{to_u16, ByteWriter, Fixup};
use crate::error::{Error, Result};
use crate::fonts::EncodedFnt;

/// Resource alignment shift count.
pub const ALIGN_SHIFT: u16 = 4;

/// Resource alignment in bytes.
pub const ALIGN: usize = 1 << ALIGN_SHIFT;

/// RT_FONTDIR with the integer-id bit set.
const RT_FONTDIR: u16 = 0x8007;
/// RT_FONT with the integer-id bit set.
const RT_FONT: u16 = 0x8008;
/// Resource flags for the font directory: movable, shareable, preload.
const FONTDIR_FLAGS: u16 = 0x0C50;
/// Resource flags for fonts: movable, shareable, discardable.
const FONT_FLAGS: u16 = 0x1C30;
/// Integer resource ids have the high bit set.
const INTEGER_ID: u16 = 0x8000;
/// Length-prefixed name of the font directory resource.
const FONTDIR_NAME: &[u8] = b"\x07FONTDIR";

/// Where one resource sits inside the resource data region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Offset from the start of the region
    pub offset: usize,
    /// Length including padding
    pub len: usize,
}

/// Resource data region: the font directory followed by every font, each
/// padded to [`ALIGN`].
#[derive(Debug, Clone)]
pub struct ResourceData {
    bytes: Vec<u8>,
    fontdir: Placement,
    fonts: Vec<Placement>,
}

impl ResourceData {
    /// Lay out the directory and fonts.
    pub fn new(fontdir: &[u8], fonts: &[EncodedFnt]) -> Self {
        let mut w = ByteWriter::new();
        let fontdir = place(&mut w, fontdir);
        let fonts = fonts.iter().map(|f| place(&mut w, f.as_bytes())).collect();
        Self {
            bytes: w.into_inner(),
            fontdir,
            fonts,
        }
    }

    /// The laid-out bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Placement of the font directory.
    pub fn fontdir(&self) -> Placement {
        self.fontdir
    }

    /// Placements of the fonts, in order.
    pub fn fonts(&self) -> &[Placement] {
        &self.fonts
    }
}

fn place(w: &mut ByteWriter, item: &[u8]) -> Placement {
    let offset = w.position();
    w.put_bytes(item);
    w.pad_to(ALIGN);
    Placement {
        offset,
        len: w.position() - offset,
    }
}

/// Resource offsets waiting for the absolute start of the data region.
#[must_use = "resource offsets must be resolved"]
#[derive(Debug)]
pub struct PendingOffsets {
    slots: Vec<(Fixup, usize)>,
}

impl PendingOffsets {
    /// Patch every offset now that the data region starts at `data_start`.
    pub fn resolve(self, w: &mut ByteWriter, data_start: usize) -> Result<()> {
        for (fixup, offset) in self.slots {
            let units = to_units("resource offset", data_start + offset)?;
            w.patch(fixup, usize::from(units))?;
        }
        Ok(())
    }
}

/// Convert a byte count to alignment units.
pub fn to_units(field: &'static str, value: usize) -> Result<u16> {
    if value % ALIGN != 0 {
        return Err(Error::Misaligned {
            field,
            value,
            align: ALIGN,
        });
    }
    to_u16(field, value >> ALIGN_SHIFT)
}

/// Build the FONTDIR resource: a font count, then for each font its ordinal
/// and directory entry.
pub fn font_directory(fonts: &[EncodedFnt]) -> Result<Vec<u8>> {
    let mut w = ByteWriter::new();
    w.put_u16_checked("font count", fonts.len())?;
    for (i, font) in fonts.iter().enumerate() {
        w.put_u16_checked("font ordinal", i + 1)?;
        w.put_bytes(&font.dir_entry()?);
    }
    Ok(w.into_inner())
}

/// Unpadded resource table length for `font_count` fonts.
pub fn resource_table_len(font_count: usize) -> usize {
    // shift count + FONTDIR TYPEINFO/NAMEINFO + FONT TYPEINFO
    // + NAMEINFO per font + end marker + FONTDIR name
    2 + (8 + 12) + 8 + 12 * font_count + 2 + FONTDIR_NAME.len()
}

/// Write the resource table, padded to [`ALIGN`].
///
/// Resource offsets cannot be known until the tables that follow have been
/// written, so they are returned for [`PendingOffsets::resolve`].
pub fn write_resource_table(w: &mut ByteWriter, data: &ResourceData) -> Result<PendingOffsets> {
    let table_start = w.position();
    let mut slots = Vec::with_capacity(1 + data.fonts().len());

    w.put_u16(ALIGN_SHIFT);

    w.put_u16(RT_FONTDIR);
    w.put_u16(1);
    w.put_u32(0);
    let fontdir = data.fontdir();
    slots.push((w.placeholder_u16("FONTDIR offset"), fontdir.offset));
    w.put_u16(to_units("FONTDIR length", fontdir.len)?);
    w.put_u16(FONTDIR_FLAGS);
    let name_ref = w.placeholder_u16("FONTDIR name");
    w.put_u32(0);

    w.put_u16(RT_FONT);
    w.put_u16_checked("font count", data.fonts().len())?;
    w.put_u32(0);
    for (i, font) in data.fonts().iter().enumerate() {
        slots.push((w.placeholder_u16("font offset"), font.offset));
        w.put_u16(to_units("font length", font.len)?);
        w.put_u16(FONT_FLAGS);
        w.put_u16(INTEGER_ID | to_u16("font id", i + 1)?);
        w.put_u32(0);
    }
    w.put_u16(0);

    w.patch(name_ref, w.position() - table_start)?;
    w.put_bytes(FONTDIR_NAME);
    debug_assert_eq!(w.position() - table_start, resource_table_len(data.fonts().len()));
    w.pad_to(ALIGN);

    Ok(PendingOffsets { slots })
}

/// Module name for the resident name table: the library name reduced to
/// ASCII letters and digits.
pub fn module_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}
