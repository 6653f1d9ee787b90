//! DOS stub executable.
//!
//! A font library is a New Executable, so it starts with a real-mode MZ
//! program. The stub prints a message through DOS function 09h (which
//! expects a `$`-terminated string) and exits with status 1. Its length is
//! a multiple of 16 and is recorded at 0x3C as the offset of the NE header.

use super::byte_writer::ByteWriter;
use crate::error::{Error, Result};

/// Size of the MZ header.
pub const MZ_HEADER_LEN: usize = 0x40;

/// Offset of e_lfanew, the pointer to the NE header.
pub const NE_OFFSET_FIELD: usize = 0x3C;

/// Stub lengths are multiples of this.
pub const STUB_ALIGN: usize = 16;

/// Terminator expected by DOS function 09h.
const DOS_STRING_TERMINATOR: u8 = b'$';

/// Page size used by the e_cblp / e_cp fields.
const MZ_PAGE: usize = 512;

/// Stub program; the message follows immediately.
const STUB_CODE: [u8; 14] = [
    0xBA, 0x0E, 0x00, // mov dx,0x000e  ; message follows the code
    0x0E, //             push cs
    0x1F, //             pop ds
    0xB4, 0x09, //       mov ah,0x09    ; print string
    0xCD, 0x21, //       int 0x21
    0xB8, 0x01, 0x4C, // mov ax,0x4c01  ; exit(1)
    0xCD, 0x21, //       int 0x21
];

/// Build the stub executable.
pub fn build_stub(message: &str) -> Result<Vec<u8>> {
    if !message.is_ascii() || message.bytes().any(|b| b == DOS_STRING_TERMINATOR) {
        return Err(Error::InvalidConfig(format!(
            "stub message must be ASCII without '{}'",
            DOS_STRING_TERMINATOR as char
        )));
    }

    let mut w = ByteWriter::with_capacity(MZ_HEADER_LEN + STUB_CODE.len() + message.len() + 16);
    w.put_bytes(b"MZ");
    let last_page = w.placeholder_u16("e_cblp");
    let pages = w.placeholder_u16("e_cp");
    w.put_u16(0); // e_crlc: no relocations
    w.put_u16((MZ_HEADER_LEN / 16) as u16); // e_cparhdr
    w.put_u16(0x10); // e_minalloc: 16 paragraphs of stack
    w.put_u16(0xFFFF); // e_maxalloc
    w.put_u16(0); // e_ss
    w.put_u16(0x100); // e_sp
    w.put_u16(0); // e_csum
    w.put_u16(0); // e_ip
    w.put_u16(0); // e_cs
    w.put_u16(MZ_HEADER_LEN as u16); // e_lfarlc
    w.put_u16(0); // e_ovno
    w.put_zeros(4 * 2); // e_res
    w.put_u16(0); // e_oemid
    w.put_u16(0); // e_oeminfo
    w.put_zeros(10 * 2); // e_res2
    debug_assert_eq!(w.position(), NE_OFFSET_FIELD);
    let ne_offset = w.placeholder_u32("e_lfanew");
    debug_assert_eq!(w.position(), MZ_HEADER_LEN);

    w.put_bytes(&STUB_CODE);
    w.put_bytes(message.as_bytes());
    w.put_u8(DOS_STRING_TERMINATOR);

    let image_len = w.position();
    let page_count = image_len.div_ceil(MZ_PAGE);
    w.patch(last_page, image_len - (page_count - 1) * MZ_PAGE)?;
    w.patch(pages, page_count)?;

    w.pad_to(STUB_ALIGN);
    w.patch(ne_offset, w.position())?;

    log::debug!("Built {}-byte DOS stub", w.position());
    Ok(w.into_inner())
}
