//! FON font library encoder.
//!
//! A font library is a resource-only New Executable:
//!
//! ```text
//! MZ stub                      (multiple of 16 bytes)
//! NE header                    0x40 bytes
//! resource table               FONTDIR + FONT entries, padded
//! resident name table          module name
//! module-ref / import / entry  one shared zero word
//! non-resident name table      "FONTRES a,x,y : name", padded
//! resource data                FONTDIR, then each font, each padded
//! ```
//!
//! Table offsets in the NE header are relative to the NE header, except the
//! non-resident name table which is absolute.

use super::byte_writer::ByteWriter;
use super::mz_stub::build_stub;
use super::resource_table::{
    font_directory, module_name, write_resource_table, ResourceData, ALIGN, ALIGN_SHIFT,
};
use crate::config::FonOptions;
use crate::error::{Error, Result};
use crate::fonts::EncodedFnt;

/// Size of the NE header.
pub const NE_HEADER_LEN: usize = 0x40;

/// Program flags: library module, protected-mode only.
const NE_FLAGS: u16 = 0x8308;
/// Target operating system: Windows.
const TARGET_WINDOWS: u8 = 2;
/// Additional OS flags.
const OS_FLAGS: u8 = 0x08;
/// Expected Windows version 3.0.
const EXPECTED_WIN_VERSION: u16 = 0x0300;

/// An ordered set of encoded fonts packaged under one library name.
#[derive(Debug, Clone)]
pub struct FonLibrary {
    name: String,
    fonts: Vec<EncodedFnt>,
}

impl FonLibrary {
    /// Assemble a library.
    ///
    /// Without an explicit `name`, the fonts must all share one face name,
    /// which becomes the library name.
    pub fn new(fonts: Vec<EncodedFnt>, name: Option<&str>) -> Result<Self> {
        if fonts.is_empty() {
            return Err(Error::NoFonts);
        }
        let name = match name {
            Some(name) => name.to_string(),
            None => common_face_name(&fonts)
                .ok_or(Error::FaceNameConflict)?
                .to_string(),
        };
        if !name.is_ascii() || name.contains('\0') {
            return Err(Error::InvalidConfig(format!(
                "library name '{}' must be ASCII without NUL bytes",
                name.escape_default()
            )));
        }
        Ok(Self { name, fonts })
    }

    /// Library name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fonts in resource order.
    pub fn fonts(&self) -> &[EncodedFnt] {
        &self.fonts
    }

    /// Encode with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        FonEncoder::new().encode(self)
    }
}

/// The face name shared by every font, if there is one.
pub fn common_face_name(fonts: &[EncodedFnt]) -> Option<&str> {
    let (first, rest) = fonts.split_first()?;
    let name = first.face_name();
    rest.iter().all(|f| f.face_name() == name).then_some(name)
}

/// FON library encoder.
#[derive(Debug, Clone, Default)]
pub struct FonEncoder {
    options: FonOptions,
}

impl FonEncoder {
    /// Create an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with custom options.
    pub fn with_options(options: FonOptions) -> Self {
        Self { options }
    }

    /// Encode a library.
    pub fn encode(&self, library: &FonLibrary) -> Result<Vec<u8>> {
        let stub = build_stub(&self.options.stub_message)?;
        let fontdir = font_directory(library.fonts())?;
        let resources = ResourceData::new(&fontdir, library.fonts());
        let resident = module_name(library.name());
        let descriptor = self.options.fontres_descriptor(library.name());

        log::debug!(
            "Encoding FON '{}': {} font(s), module name '{}'",
            library.name(),
            library.fonts().len(),
            resident
        );

        let mut w = ByteWriter::with_capacity(stub.len() + 0x200 + resources.as_bytes().len());
        w.put_bytes(&stub);

        let ne_start = w.position();
        w.put_bytes(b"NE");
        w.put_u8(5); // linker version
        w.put_u8(10); // linker revision
        let entry_offset = w.placeholder_u16("entry table offset");
        let entry_len = w.placeholder_u16("entry table length");
        w.put_u32(0); // CRC
        w.put_u16(NE_FLAGS);
        w.put_u16(0); // automatic data segment
        w.put_u16(0); // heap
        w.put_u16(0); // stack
        w.put_u32(0); // CS:IP
        w.put_u32(0); // SS:SP
        w.put_u16(0); // segment table entries
        w.put_u16(0); // module reference entries
        let nonres_len = w.placeholder_u16("non-resident name table length");
        let segment_offset = w.placeholder_u16("segment table offset");
        let resource_offset = w.placeholder_u16("resource table offset");
        let resident_offset = w.placeholder_u16("resident name table offset");
        let modref_offset = w.placeholder_u16("module reference table offset");
        let import_offset = w.placeholder_u16("imported names table offset");
        let nonres_offset = w.placeholder_u32("non-resident name table offset");
        w.put_u16(0); // movable entry points
        w.put_u16(ALIGN_SHIFT);
        w.put_u16(0); // resource segments
        w.put_u8(TARGET_WINDOWS);
        w.put_u8(OS_FLAGS);
        w.put_u16(0); // fast-load area offset
        w.put_u16(0); // fast-load area length
        w.put_u16(0); // minimum code swap area
        w.put_u16(EXPECTED_WIN_VERSION);
        debug_assert_eq!(w.position() - ne_start, NE_HEADER_LEN);

        // No segments, so the empty segment table coincides with the
        // resource table.
        let table = w.position() - ne_start;
        w.patch(segment_offset, table)?;
        w.patch(resource_offset, table)?;
        let pending = write_resource_table(&mut w, &resources)?;

        w.patch(resident_offset, w.position() - ne_start)?;
        w.put_name_table(&resident)?;

        // Module references, imported names and entry points are all empty;
        // one zero word serves as each table.
        let empty = w.position() - ne_start;
        w.patch(modref_offset, empty)?;
        w.patch(import_offset, empty)?;
        w.patch(entry_offset, empty)?;
        w.put_u16(0);
        w.patch(entry_len, w.position() - ne_start - empty)?;

        let nonres_start = w.position();
        w.patch(nonres_offset, nonres_start)?;
        w.put_name_table(&descriptor)?;
        w.patch(nonres_len, w.position() - nonres_start)?;

        w.pad_to(ALIGN);
        let data_start = w.position();
        log::debug!("Resource data starts at {:#x}", data_start);
        pending.resolve(&mut w, data_start)?;
        w.put_bytes(resources.as_bytes());

        Ok(w.into_inner())
    }
}

/// Package fonts into a library with default options.
pub fn encode_fon(fonts: Vec<EncodedFnt>, name: Option<&str>) -> Result<Vec<u8>> {
    FonLibrary::new(fonts, name)?.to_bytes()
}
