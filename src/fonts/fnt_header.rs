//! FNT header layout and the encoded font blob.
//!
//! Version 3.0 raster font resources start with a 0x94-byte little-endian
//! header. The constants below name the offset of every field the encoder
//! or the introspector has to address directly.

use crate::error::{Error, Result};
use crate::writer::byte_writer::{read_u16, read_u32};

use super::fnt_inspect;

/// Header field offsets.
pub mod layout {
    /// dfVersion (u16)
    pub const VERSION: usize = 0x00;
    /// dfSize: total file size (u32)
    pub const SIZE: usize = 0x02;
    /// dfCopyright: 60 bytes, zero padded
    pub const COPYRIGHT: usize = 0x06;
    /// Length of the copyright field
    pub const COPYRIGHT_LEN: usize = 60;
    /// dfPoints (u16)
    pub const POINTS: usize = 0x44;
    /// dfAscent (u16)
    pub const ASCENT: usize = 0x4A;
    /// dfItalic (u8)
    pub const ITALIC: usize = 0x50;
    /// dfWeight (u16)
    pub const WEIGHT: usize = 0x53;
    /// dfCharSet (u8)
    pub const CHARSET: usize = 0x55;
    /// dfPixWidth: 0 for proportional fonts (u16)
    pub const PIX_WIDTH: usize = 0x56;
    /// dfPixHeight (u16)
    pub const PIX_HEIGHT: usize = 0x58;
    /// dfPitchAndFamily (u8)
    pub const PITCH_AND_FAMILY: usize = 0x5A;
    /// dfAvgWidth (u16)
    pub const AVG_WIDTH: usize = 0x5B;
    /// dfMaxWidth (u16)
    pub const MAX_WIDTH: usize = 0x5D;
    /// dfFirstChar (u8)
    pub const FIRST_CHAR: usize = 0x5F;
    /// dfWidthBytes (u16)
    pub const WIDTH_BYTES: usize = 0x63;
    /// dfDevice: offset of the device name, 0 if none (u32)
    pub const DEVICE: usize = 0x65;
    /// dfFace: offset of the face name (u32)
    pub const FACE: usize = 0x69;
    /// dfBitsOffset: offset of the bitmap region (u32)
    pub const BITS_OFFSET: usize = 0x71;
    /// dfFlags (u32)
    pub const FLAGS: usize = 0x76;
    /// End of the header; the character table starts here
    pub const HEADER_LEN: usize = 0x94;
    /// Header prefix copied into a font directory entry
    pub const DIRENTRY_LEN: usize = 0x71;
    /// Bytes per character table entry: u16 width, u32 bitmap offset
    pub const CHAR_ENTRY_LEN: usize = 6;
    /// Character table entries: 256 glyphs plus the sentinel
    pub const CHAR_ENTRIES: usize = 257;
}

/// dfVersion value written by the encoder.
pub const FNT_VERSION: u16 = 0x0300;

/// dfFlags bit: fixed pitch.
pub const DFF_FIXED: u32 = 0x0001;

/// dfFlags bit: proportional.
pub const DFF_PROPORTIONAL: u32 = 0x0002;

/// Values derived from the glyph table and frozen into the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FntMetrics {
    /// Width of 'X'
    pub avg_width: u16,
    /// Widest glyph
    pub max_width: u16,
    /// Every glyph is `avg_width` wide
    pub fixed_pitch: bool,
    /// Bytes per bitmap row: whole 8-pixel columns, rounded up to even
    pub width_bytes: u16,
}

impl FntMetrics {
    /// Derive metrics from the glyph widths of all 256 characters.
    pub fn from_widths(widths: &[u16], avg_width: u16) -> Self {
        let max_width = widths.iter().copied().max().unwrap_or(0);
        let fixed_pitch = widths.iter().all(|&w| w == avg_width);
        Self {
            avg_width,
            max_width,
            fixed_pitch,
            width_bytes: width_bytes_for(max_width),
        }
    }

    /// dfPixWidth: the common width, or 0 for proportional fonts.
    pub fn pixel_width(&self) -> u16 {
        if self.fixed_pitch {
            self.avg_width
        } else {
            0
        }
    }

    /// dfPitchAndFamily: 0 for fixed pitch, 1 for variable.
    pub fn pitch_and_family(&self) -> u8 {
        if self.fixed_pitch {
            0
        } else {
            1
        }
    }

    /// dfFlags.
    pub fn flags(&self) -> u32 {
        if self.fixed_pitch {
            DFF_FIXED
        } else {
            DFF_PROPORTIONAL
        }
    }
}

/// Bytes per row for a font whose widest glyph is `max_width` pixels.
pub fn width_bytes_for(max_width: u16) -> u16 {
    let columns = max_width.div_ceil(8);
    (columns + 1) & !1
}

/// A raster font resource in its on-disk form.
///
/// Produced by the FNT encoder or loaded from an existing file. The bytes
/// are never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFnt {
    data: Vec<u8>,
    metrics: FntMetrics,
    face_name: String,
}

impl EncodedFnt {
    /// Wrap bytes the encoder has just produced.
    pub(crate) fn new(data: Vec<u8>, metrics: FntMetrics, face_name: String) -> Self {
        Self {
            data,
            metrics,
            face_name,
        }
    }

    /// Adopt an already-encoded FNT blob.
    ///
    /// The face name must be reachable through the header and the metrics
    /// are read back from their header fields.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if data.len() < layout::DIRENTRY_LEN {
            return Err(Error::MalformedFnt(format!(
                "{} bytes is shorter than the {}-byte header",
                data.len(),
                layout::DIRENTRY_LEN
            )));
        }
        let face_name = fnt_inspect::face_name(&data)?;
        let metrics = FntMetrics {
            avg_width: read_u16(&data, layout::AVG_WIDTH)?,
            max_width: read_u16(&data, layout::MAX_WIDTH)?,
            fixed_pitch: read_u16(&data, layout::PIX_WIDTH)? != 0,
            width_bytes: read_u16(&data, layout::WIDTH_BYTES)?,
        };
        log::debug!(
            "Loaded FNT '{}' ({} bytes, version {:#06x})",
            face_name,
            data.len(),
            read_u16(&data, layout::VERSION)?
        );
        let font = Self::new(data, metrics, face_name);

        let bits = font.bits_offset()? as usize;
        if bits > font.len() {
            return Err(Error::MalformedFnt(format!(
                "bitmap offset {:#x} is beyond the end of the font ({} bytes)",
                bits,
                font.len()
            )));
        }
        let declared = font.declared_size()? as usize;
        if declared != font.len() {
            log::warn!(
                "FNT '{}' declares {} bytes but is {} bytes long",
                font.face_name(),
                declared,
                font.len()
            );
        }
        Ok(font)
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Encoded length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob is empty (never true for a valid font).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Derived header metrics.
    pub fn metrics(&self) -> FntMetrics {
        self.metrics
    }

    /// Face name stored in the font.
    pub fn face_name(&self) -> &str {
        &self.face_name
    }

    /// dfSize as stored in the header.
    pub fn declared_size(&self) -> Result<u32> {
        read_u32(&self.data, layout::SIZE)
    }

    /// dfBitsOffset as stored in the header.
    pub fn bits_offset(&self) -> Result<u32> {
        read_u32(&self.data, layout::BITS_OFFSET)
    }

    /// The font directory entry for this font.
    pub fn dir_entry(&self) -> Result<Vec<u8>> {
        fnt_inspect::dir_entry(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_bytes_rounding() {
        assert_eq!(width_bytes_for(0), 0);
        assert_eq!(width_bytes_for(1), 2);
        assert_eq!(width_bytes_for(8), 2);
        assert_eq!(width_bytes_for(16), 2);
        assert_eq!(width_bytes_for(17), 4);
        assert_eq!(width_bytes_for(24), 4);
        assert_eq!(width_bytes_for(33), 6);
    }

    #[test]
    fn test_metrics_fixed_pitch() {
        let widths = [8u16; 256];
        let m = FntMetrics::from_widths(&widths, 8);
        assert!(m.fixed_pitch);
        assert_eq!(m.pixel_width(), 8);
        assert_eq!(m.pitch_and_family(), 0);
        assert_eq!(m.flags(), DFF_FIXED);
        assert_eq!(m.width_bytes, 2);
    }

    #[test]
    fn test_metrics_proportional() {
        let mut widths = [6u16; 256];
        widths[b'W' as usize] = 11;
        let m = FntMetrics::from_widths(&widths, 6);
        assert!(!m.fixed_pitch);
        assert_eq!(m.max_width, 11);
        assert_eq!(m.pixel_width(), 0);
        assert_eq!(m.pitch_and_family(), 1);
        assert_eq!(m.flags(), DFF_PROPORTIONAL);
    }

    #[test]
    fn test_layout_is_consistent() {
        assert_eq!(layout::COPYRIGHT + layout::COPYRIGHT_LEN + 2, layout::POINTS);
        assert_eq!(layout::FACE + 4 + 4, layout::BITS_OFFSET);
        assert_eq!(layout::BITS_OFFSET, layout::DIRENTRY_LEN);
    }

    fn encoded() -> Vec<u8> {
        let font = crate::fonts::FontDescription::new("Blob", 8, 7)
            .with_copyright("c")
            .fill_glyphs(&crate::fonts::Glyph::new(8));
        crate::writer::encode_fnt(&font).unwrap().into_bytes()
    }

    #[test]
    fn test_from_bytes_rejects_bits_past_end() {
        let mut data = encoded();
        let past = (data.len() + 1) as u32;
        data[layout::BITS_OFFSET..layout::BITS_OFFSET + 4].copy_from_slice(&past.to_le_bytes());
        let err = EncodedFnt::from_bytes(data).unwrap_err();
        assert!(matches!(err, Error::MalformedFnt(_)));
    }

    #[test]
    fn test_from_bytes_tolerates_wrong_size_field() {
        let mut data = encoded();
        let len = data.len();
        data[layout::SIZE..layout::SIZE + 4].copy_from_slice(&0u32.to_le_bytes());
        let font = EncodedFnt::from_bytes(data).unwrap();
        assert_eq!(font.declared_size().unwrap(), 0);
        assert_eq!(font.len(), len);
        assert_eq!(font.bits_offset().unwrap() as usize, 0x94 + 257 * 6);
    }

    #[test]
    fn test_from_bytes_rejects_short_blob() {
        let err = EncodedFnt::from_bytes(vec![0; 0x40]).unwrap_err();
        assert!(matches!(err, Error::MalformedFnt(_)));
    }
}
