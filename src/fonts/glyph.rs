//! Monochrome glyph bitmaps.

/// A single character cell: an advance width and one bit pattern per row.
///
/// Rows are stored left-justified, eight pixels per byte, most significant
/// bit first: pixel `x` of a row is bit `7 - x % 8` of byte `x / 8`. Bits
/// beyond the width are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Advance width in pixels
    pub width: u16,
    /// Bit patterns, top row first. Rows beyond the end are blank.
    pub rows: Vec<Vec<u8>>,
}

impl Glyph {
    /// Create a glyph with no rows set.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// Create a glyph from packed rows.
    pub fn with_rows(width: u16, rows: Vec<Vec<u8>>) -> Self {
        Self { width, rows }
    }

    /// Create a glyph from rows of binary digits, adjusted to `width` as
    /// [`parse_row`] does.
    pub fn from_digits(width: u16, rows: &[&str]) -> Option<Self> {
        let rows = rows
            .iter()
            .map(|digits| parse_row(digits, width))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { width, rows })
    }

    /// Byte `column` of row `y`, with pixels beyond the width cleared.
    pub fn row_byte(&self, y: usize, column: usize) -> u8 {
        let width = usize::from(self.width);
        let start = column * 8;
        if start >= width {
            return 0;
        }
        let byte = self
            .rows
            .get(y)
            .and_then(|row| row.get(column))
            .copied()
            .unwrap_or(0);
        match width - start {
            n if n >= 8 => byte,
            n => byte & !(0xFF >> n),
        }
    }

    /// Append a row given as a string of binary digits.
    ///
    /// Strings shorter than the width are padded on the right with blank
    /// pixels; longer ones lose their rightmost pixels. Returns `None` if
    /// `digits` contains anything other than `0` and `1`.
    pub fn push_row_digits(&mut self, digits: &str) -> Option<()> {
        let row = parse_row(digits, self.width)?;
        self.rows.push(row);
        Some(())
    }

    /// Whether pixel (`x`, `y`) is set.
    pub fn pixel(&self, x: u16, y: usize) -> bool {
        if x >= self.width {
            return false;
        }
        let x = usize::from(x);
        self.row_byte(y, x / 8) & (0x80 >> (x % 8)) != 0
    }
}

/// Bytes needed for one left-justified row of `width` pixels.
pub fn row_len(width: u16) -> usize {
    usize::from(width).div_ceil(8)
}

/// Interpret a binary digit string as a row of `width` pixels.
pub fn parse_row(digits: &str, width: u16) -> Option<Vec<u8>> {
    if !digits.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }
    let mut row = vec![0u8; row_len(width)];
    for (x, b) in digits.bytes().take(usize::from(width)).enumerate() {
        if b == b'1' {
            row[x / 8] |= 0x80 >> (x % 8);
        }
    }
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_exact() {
        assert_eq!(parse_row("10110", 5), Some(vec![0b1011_0000]));
    }

    #[test]
    fn test_parse_row_short_pads_right() {
        assert_eq!(parse_row("11", 4), Some(vec![0b1100_0000]));
    }

    #[test]
    fn test_parse_row_long_truncates_right() {
        assert_eq!(parse_row("101111", 3), Some(vec![0b1010_0000]));
    }

    #[test]
    fn test_parse_row_zero_width() {
        assert_eq!(parse_row("1111", 0), Some(vec![]));
    }

    #[test]
    fn test_parse_row_rejects_non_binary() {
        assert_eq!(parse_row("10a1", 4), None);
        assert_eq!(parse_row("12", 2), None);
    }

    #[test]
    fn test_parse_row_spans_bytes() {
        assert_eq!(parse_row("100000001", 9), Some(vec![0x80, 0x80]));
        assert_eq!(row_len(9), 2);
        assert_eq!(row_len(16), 2);
        assert_eq!(row_len(0), 0);
    }

    #[test]
    fn test_row_byte_masks_to_width() {
        let g = Glyph::with_rows(3, vec![vec![0xFF, 0xFF]]);
        assert_eq!(g.row_byte(0, 0), 0b1110_0000);
        assert_eq!(g.row_byte(0, 1), 0);
        assert_eq!(g.row_byte(5, 0), 0);
    }

    #[test]
    fn test_pixels() {
        let mut g = Glyph::new(4);
        g.push_row_digits("1001").unwrap();
        assert!(g.pixel(0, 0));
        assert!(!g.pixel(1, 0));
        assert!(g.pixel(3, 0));
        assert!(!g.pixel(4, 0));
        assert!(!g.pixel(0, 1));
    }

    #[test]
    fn test_wide_row() {
        let mut digits = "1".repeat(72);
        digits.replace_range(8..16, "00000000");
        let g = Glyph::from_digits(72, &[&digits]).unwrap();
        assert_eq!(g.rows[0].len(), 9);
        assert_eq!(g.row_byte(0, 0), 0xFF);
        assert_eq!(g.row_byte(0, 1), 0x00);
        assert_eq!(g.row_byte(0, 8), 0xFF);
        assert!(g.pixel(71, 0));
        assert!(!g.pixel(72, 0));
    }
}
