// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # FON Oxide
//!
//! Compile plain-text bitmap font descriptions into Windows 3.x raster fonts.
//!
//! ## Core Features
//!
//! - **Description Parser**: line-oriented text format, one directive or
//!   bitmap row per line, with file:line diagnostics
//! - **FNT Encoder**: version 0x0300 font resources with column-major glyph
//!   bitmaps and a derived fixed/proportional pitch
//! - **FON Packager**: resource-only New Executable libraries holding a font
//!   directory and any number of FNT resources
//! - **Re-packaging**: wrap already-encoded FNT files into a new library
//!
//! ## Quick Start
//!
//! ```ignore
//! use fon_oxide::{encode_fnt, encode_fon, load_description};
//!
//! let font = load_description("fixed8.fd")?;
//! let fnt = encode_fnt(&font)?;
//! let fon = encode_fon(vec![fnt], None)?;
//! std::fs::write("fixed8.fon", fon)?;
//! # Ok::<(), fon_oxide::Error>(())
//! ```
//!
//! ## Command Line
//!
//! ```text
//! fon_oxide [-fnt | -fon | -fnt2fon] -o OUTFILE [-facename NAME] [--] FILES...
//! ```
//!
//! Set `RUST_LOG=debug` to trace the layout decisions of the encoders.

#![warn(missing_docs)]

// Error handling
pub mod error;

/// Encoder configuration options
pub mod config;

// Font data model
pub mod fonts;

// Text description parsing
pub mod description;

// FNT / FON encoding
pub mod writer;

// Command-line front end
pub mod cli;

// Re-exports
pub use config::{FntOptions, FonOptions};
pub use description::{load_description, parse_description};
pub use error::{Error, Result};
pub use fonts::{EncodedFnt, FntMetrics, FontDescription, FontStyle, Glyph};
pub use writer::{encode_fnt, encode_fon, FntEncoder, FonEncoder, FonLibrary};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
