//! Error types for the font compiler.
//!
//! This module defines all error types that can occur while parsing font
//! descriptions, encoding FNT resources and assembling FON libraries.

use std::path::Path;

/// Result type alias for font compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during font compilation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A description line starts with a word that is neither a known
    /// keyword nor a string of binary digits
    #[error("{file}:{line}: unknown keyword '{keyword}'")]
    UnknownKeyword {
        /// Name of the description being parsed
        file: String,
        /// 1-based line number
        line: usize,
        /// The offending word
        keyword: String,
    },

    /// A directive argument could not be interpreted
    #[error("{file}:{line}: invalid value '{value}' for '{directive}'")]
    InvalidValue {
        /// Name of the description being parsed
        file: String,
        /// 1-based line number
        line: usize,
        /// Directive keyword
        directive: &'static str,
        /// Raw argument text
        value: String,
    },

    /// A well-formed line appears where the description does not allow it
    #[error("{file}:{line}: {message}")]
    Syntax {
        /// Name of the description being parsed
        file: String,
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A required font attribute was never given
    #[error("No font {0} specified")]
    MissingField(&'static str),

    /// One of the 256 character slots has no glyph
    #[error("No character at position {0}")]
    MissingGlyph(usize),

    /// Copyright notice does not fit the 60-byte header field
    #[error("Copyright too long: {0} bytes (maximum 59)")]
    CopyrightTooLong(usize),

    /// Font description violates an encoder precondition
    #[error("Invalid font: {0}")]
    InvalidFont(String),

    /// An existing FNT blob could not be introspected
    #[error("Malformed FNT data: {0}")]
    MalformedFnt(String),

    /// A value does not fit the on-disk field that has to hold it
    #[error("Value {value} does not fit in field '{field}'")]
    FieldOverflow {
        /// Field being written
        field: &'static str,
        /// Value that overflowed
        value: usize,
    },

    /// An aligned table field was handed a value that is not a whole number
    /// of alignment units
    #[error("Value {value:#x} for field '{field}' is not {align}-byte aligned")]
    Misaligned {
        /// Field being written
        field: &'static str,
        /// Byte value that should have been aligned
        value: usize,
        /// Required alignment in bytes
        align: usize,
    },

    /// A font library needs at least one font
    #[error("Font library contains no fonts")]
    NoFonts,

    /// Fonts packaged together disagree on the face name and no library
    /// name was supplied
    #[error("Fonts disagree on face name; specify one with -facename")]
    FaceNameConflict,

    /// A name table entry is longer than its length prefix allows
    #[error("Name '{name}' is {len} bytes long (maximum 255)")]
    NameTooLong {
        /// The name being written
        name: String,
        /// Its length in bytes
        len: usize,
    },

    /// Encoder options cannot be represented in the output
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Bad command line
    #[error("{0}")]
    Usage(String),

    /// An input file could not be read, parsed or encoded
    #[error("{path}: {source}")]
    Input {
        /// The file being processed
        path: String,
        /// What went wrong with it
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attach the name of the input file being processed.
    ///
    /// Description errors that already carry a file:line location are
    /// returned unchanged.
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            Error::UnknownKeyword { .. }
            | Error::InvalidValue { .. }
            | Error::Syntax { .. }
            | Error::Input { .. } => self,
            other => Error::Input {
                path: path.display().to_string(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keyword_error() {
        let err = Error::UnknownKeyword {
            file: "test.fd".to_string(),
            line: 12,
            keyword: "colour".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("test.fd:12"));
        assert!(msg.contains("colour"));
    }

    #[test]
    fn test_invalid_value_error() {
        let err = Error::InvalidValue {
            file: "a.fd".to_string(),
            line: 3,
            directive: "height",
            value: "tall".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("height"));
        assert!(msg.contains("tall"));
    }

    #[test]
    fn test_missing_field_error() {
        let err = Error::MissingField("ascent");
        assert_eq!(format!("{}", err), "No font ascent specified");
    }

    #[test]
    fn test_missing_glyph_error() {
        let err = Error::MissingGlyph(65);
        assert_eq!(format!("{}", err), "No character at position 65");
    }

    #[test]
    fn test_field_overflow_error() {
        let err = Error::FieldOverflow {
            field: "resource offset",
            value: 70000,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("70000"));
        assert!(msg.contains("resource offset"));
    }

    #[test]
    fn test_face_name_conflict_mentions_option() {
        let msg = format!("{}", Error::FaceNameConflict);
        assert!(msg.contains("-facename"));
    }

    #[test]
    fn test_in_file_names_the_file() {
        let err = Error::MissingGlyph(7).in_file(Path::new("fonts/sys.fd"));
        assert_eq!(err.to_string(), "fonts/sys.fd: No character at position 7");
        assert!(std::error::Error::source(&err).is_some());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let msg = Error::from(io).in_file(Path::new("a.fnt")).to_string();
        assert!(msg.starts_with("a.fnt: IO error"));
    }

    #[test]
    fn test_in_file_keeps_located_errors() {
        let err = Error::Syntax {
            file: "a.fd".to_string(),
            line: 2,
            message: "stray row".to_string(),
        }
        .in_file(Path::new("a.fd"));
        assert_eq!(err.to_string(), "a.fd:2: stray row");

        let twice = Error::NoFonts
            .in_file(Path::new("a.fd"))
            .in_file(Path::new("a.fd"));
        assert_eq!(twice.to_string(), "a.fd: Font library contains no fonts");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let msg = format!("{}", err);
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }
}
