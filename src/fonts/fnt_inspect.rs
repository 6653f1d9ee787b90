//! Minimal FNT introspection.
//!
//! Only what is needed to re-wrap an encoded font into a library: the face
//! and device names, and the font directory entry built from them.

use crate::error::{Error, Result};
use crate::writer::byte_writer::read_u32;

use super::fnt_header::layout;

/// Read the NUL-terminated ASCII string starting at `offset`.
fn asciz_at(data: &[u8], offset: usize, what: &str) -> Result<String> {
    let tail = data.get(offset..).ok_or_else(|| {
        Error::MalformedFnt(format!(
            "{} offset {:#x} is beyond the end of the font ({} bytes)",
            what,
            offset,
            data.len()
        ))
    })?;
    let len = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::MalformedFnt(format!("{} is not NUL-terminated", what)))?;
    let bytes = &tail[..len];
    if !bytes.is_ascii() {
        return Err(Error::MalformedFnt(format!("{} is not ASCII", what)));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Face name referenced by dfFace.
pub fn face_name(data: &[u8]) -> Result<String> {
    let offset = read_u32(data, layout::FACE)? as usize;
    asciz_at(data, offset, "face name")
}

/// Device name referenced by dfDevice; `None` when the pointer is zero.
pub fn device_name(data: &[u8]) -> Result<Option<String>> {
    match read_u32(data, layout::DEVICE)? {
        0 => Ok(None),
        offset => asciz_at(data, offset as usize, "device name").map(Some),
    }
}

/// The FONTDIRENTRY for a font: the first 0x71 header bytes, then the
/// device name and the face name, each NUL-terminated.
pub fn dir_entry(data: &[u8]) -> Result<Vec<u8>> {
    let header = data.get(..layout::DIRENTRY_LEN).ok_or_else(|| {
        Error::MalformedFnt(format!("{} bytes is too short for a directory entry", data.len()))
    })?;
    let device = device_name(data)?.unwrap_or_default();
    let face = face_name(data)?;

    let mut entry = Vec::with_capacity(header.len() + device.len() + face.len() + 2);
    entry.extend_from_slice(header);
    entry.extend_from_slice(device.as_bytes());
    entry.push(0);
    entry.extend_from_slice(face.as_bytes());
    entry.push(0);
    Ok(entry)
}
