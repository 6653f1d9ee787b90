//! Font file writing.
//!
//! ## Architecture
//!
//! ```text
//! FontDescription
//!     ↓
//! [FntEncoder] (header, character table, column-major bitmaps, face name)
//!     ↓
//! EncodedFnt ──────────────┐
//!     ↓                    │ (raw .FNT output)
//! [FonLibrary] (name + ordered fonts)
//!     ↓
//! [FonEncoder] (MZ stub, NE header, resource/name tables, resource data)
//!     ↓
//! .FON bytes
//! ```
//!
//! Every table is emitted through [`ByteWriter`]. Fields whose values are
//! only known after later tables are written are reserved as placeholders
//! and patched in place, so no sizes are precomputed.
//!
//! ```ignore
//! use fon_oxide::writer::{FntEncoder, FonEncoder, FonLibrary};
//!
//! let fnt = FntEncoder::new().encode(&font)?;
//! let library = FonLibrary::new(vec![fnt], Some("System"))?;
//! let bytes = FonEncoder::new().encode(&library)?;
//! ```

pub mod byte_writer;
pub mod fnt_writer;
pub mod fon_writer;
pub mod mz_stub;
pub mod resource_table;

pub use byte_writer::{ByteWriter, Fixup};
pub use fnt_writer::{encode_fnt, FntEncoder};
pub use fon_writer::{encode_fon, FonEncoder, FonLibrary};
