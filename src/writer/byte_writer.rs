//! Little-endian byte buffer with forward-reference fixups.
//!
//! Both binary formats contain header fields that refer to sections emitted
//! later (file size, bitmap offset, face name offset, table offsets). The
//! writer hands out a [`Fixup`] for each such field when its placeholder is
//! emitted; the field is filled in by [`ByteWriter::patch`] once the value is
//! known. A `Fixup` is consumed by patching, so a field cannot be patched
//! twice, and dropping one unpatched is flagged by `#[must_use]`.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Width of a patchable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldWidth {
    Word,
    Dword,
}

/// A placeholder field awaiting its final value.
#[must_use = "a placeholder must be patched before the buffer is finished"]
#[derive(Debug)]
pub struct Fixup {
    pos: usize,
    width: FieldWidth,
    field: &'static str,
}

impl Fixup {
    /// Buffer position of the placeholder.
    #[cfg(test)]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}

/// Growable little-endian output buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Current length, i.e. the offset the next byte will be written at.
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append zeroed space and return its start.
    fn grow(&mut self, n: usize) -> usize {
        let pos = self.buf.len();
        self.buf.resize(pos + n, 0);
        pos
    }

    /// Append one byte.
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a little-endian word.
    pub fn put_u16(&mut self, value: u16) {
        let pos = self.grow(2);
        LittleEndian::write_u16(&mut self.buf[pos..], value);
    }

    /// Append a little-endian dword.
    pub fn put_u32(&mut self, value: u32) {
        let pos = self.grow(4);
        LittleEndian::write_u32(&mut self.buf[pos..], value);
    }

    /// Append a word that must fit in 16 bits.
    pub fn put_u16_checked(&mut self, field: &'static str, value: usize) -> Result<()> {
        self.put_u16(to_u16(field, value)?);
        Ok(())
    }

    /// Append raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append `n` zero bytes.
    pub fn put_zeros(&mut self, n: usize) {
        self.grow(n);
    }

    /// Append `bytes` zero-padded to exactly `len` bytes.
    ///
    /// Fails rather than truncating when `bytes` is longer than `len`.
    pub fn put_padded(&mut self, field: &'static str, bytes: &[u8], len: usize) -> Result<()> {
        if bytes.len() > len {
            return Err(Error::FieldOverflow {
                field,
                value: bytes.len(),
            });
        }
        self.put_bytes(bytes);
        self.put_zeros(len - bytes.len());
        Ok(())
    }

    /// Append a NUL-terminated string.
    pub fn put_asciz(&mut self, s: &str) {
        self.put_bytes(s.as_bytes());
        self.put_u8(0);
    }

    /// Append a length-prefixed, NUL-terminated name table entry: a length
    /// byte, the name, a zero ordinal word and the table terminator.
    pub fn put_name_table(&mut self, name: &str) -> Result<()> {
        let len = name.len();
        let prefix = u8::try_from(len).map_err(|_| Error::NameTooLong {
            name: name.to_string(),
            len,
        })?;
        self.put_u8(prefix);
        self.put_bytes(name.as_bytes());
        self.put_u16(0);
        self.put_u8(0);
        Ok(())
    }

    /// Zero-pad up to the next multiple of `align` (a power of two).
    pub fn pad_to(&mut self, align: usize) {
        let target = align_up(self.buf.len(), align);
        self.buf.resize(target, 0);
    }

    /// Emit a zero word to be patched later.
    pub fn placeholder_u16(&mut self, field: &'static str) -> Fixup {
        let pos = self.grow(2);
        Fixup {
            pos,
            width: FieldWidth::Word,
            field,
        }
    }

    /// Emit a zero dword to be patched later.
    pub fn placeholder_u32(&mut self, field: &'static str) -> Fixup {
        let pos = self.grow(4);
        Fixup {
            pos,
            width: FieldWidth::Dword,
            field,
        }
    }

    /// Write the final value of a placeholder.
    pub fn patch(&mut self, fixup: Fixup, value: usize) -> Result<()> {
        let slot = &mut self.buf[fixup.pos..];
        match fixup.width {
            FieldWidth::Word => LittleEndian::write_u16(slot, to_u16(fixup.field, value)?),
            FieldWidth::Dword => LittleEndian::write_u32(slot, to_u32(fixup.field, value)?),
        }
        Ok(())
    }

    /// Finish writing and take the buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Round `n` up to a multiple of `align` (a power of two).
pub fn align_up(n: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (n + align - 1) & !(align - 1)
}

/// Narrow a value to a 16-bit field.
pub fn to_u16(field: &'static str, value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| Error::FieldOverflow { field, value })
}

/// Narrow a value to a 32-bit field.
pub fn to_u32(field: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::FieldOverflow { field, value })
}

/// Read a little-endian word at `pos`.
pub fn read_u16(data: &[u8], pos: usize) -> Result<u16> {
    data.get(pos..pos + 2)
        .map(LittleEndian::read_u16)
        .ok_or_else(|| Error::MalformedFnt(format!("truncated before offset {:#x}", pos + 2)))
}

/// Read a little-endian dword at `pos`.
pub fn read_u32(data: &[u8], pos: usize) -> Result<u32> {
    data.get(pos..pos + 4)
        .map(LittleEndian::read_u32)
        .ok_or_else(|| Error::MalformedFnt(format!("truncated before offset {:#x}", pos + 4)))
}
