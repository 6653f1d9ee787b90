//! Command-line front end.
//!
//! Arguments are scanned by hand, the same way for every binary in the
//! crate. Nothing is written until every input has been read and encoded.

use std::fs;
use std::path::{Path, PathBuf};

use crate::description::load_description;
use crate::error::{Error, Result};
use crate::fonts::EncodedFnt;
use crate::writer::{FntEncoder, FonEncoder, FonLibrary};

/// One-line usage summary.
pub const USAGE: &str =
    "usage: fon_oxide [-fnt | -fon | -fnt2fon] -o OUTFILE [-facename NAME] [--] FILES...";

/// What to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compile one description into a raw FNT resource
    Fnt,
    /// Compile descriptions into a FON library
    #[default]
    Fon,
    /// Package existing FNT files into a FON library
    FntToFon,
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    /// Output kind
    pub mode: Mode,
    /// Destination file
    pub output: PathBuf,
    /// Face name override for compiled fonts, and the library name
    pub face_name: Option<String>,
    /// Input files in order
    pub inputs: Vec<PathBuf>,
}

impl CliOptions {
    /// Parse arguments, excluding the program name.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let mut mode = Mode::default();
        let mut output = None;
        let mut face_name = None;
        let mut inputs = Vec::new();
        let mut options = true;

        while let Some(arg) = args.next() {
            if !options || !arg.starts_with('-') {
                inputs.push(PathBuf::from(arg));
                continue;
            }
            match arg.as_str() {
                "--" => options = false,
                "-o" => output = Some(PathBuf::from(required(&mut args, "-o")?)),
                "-facename" => face_name = Some(required(&mut args, "-facename")?),
                "-fnt" => mode = Mode::Fnt,
                "-fon" => mode = Mode::Fon,
                "-fnt2fon" => mode = Mode::FntToFon,
                _ => return Err(Error::Usage(format!("unrecognised option {}", arg))),
            }
        }

        let output = output.ok_or_else(|| Error::Usage("no output file specified".into()))?;
        if inputs.is_empty() {
            return Err(Error::Usage("no input files specified".into()));
        }
        if mode == Mode::Fnt && inputs.len() > 1 {
            return Err(Error::Usage("FNT mode can only process one font".into()));
        }

        Ok(Self {
            mode,
            output,
            face_name,
            inputs,
        })
    }
}

fn required(args: &mut impl Iterator<Item = String>, option: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::Usage(format!("option {} requires an argument", option)))
}

/// Compile one description, applying the face name override.
fn compile(options: &CliOptions, encoder: &FntEncoder, path: &Path) -> Result<EncodedFnt> {
    let mut font = load_description(path)?;
    if let Some(name) = &options.face_name {
        font.face_name = name.clone();
    }
    let fnt = encoder.encode(&font)?;
    log::info!("Compiled {} (face '{}')", path.display(), font.face_name);
    Ok(fnt)
}

/// Read an already encoded FNT file.
fn load_fnt(path: &Path) -> Result<EncodedFnt> {
    let font = EncodedFnt::from_bytes(fs::read(path)?)?;
    log::info!("Loaded {} (face '{}')", path.display(), font.face_name());
    Ok(font)
}

/// Produce the output bytes without touching the output file.
pub fn build(options: &CliOptions) -> Result<Vec<u8>> {
    let encoder = FntEncoder::new();
    let fonts = options
        .inputs
        .iter()
        .map(|path| {
            match options.mode {
                Mode::FntToFon => load_fnt(path),
                Mode::Fnt | Mode::Fon => compile(options, &encoder, path),
            }
            .map_err(|e| e.in_file(path))
        })
        .collect::<Result<Vec<_>>>()?;

    match options.mode {
        Mode::Fnt => {
            let font = fonts
                .into_iter()
                .next()
                .ok_or_else(|| Error::Usage("no input files specified".into()))?;
            Ok(font.into_bytes())
        },
        Mode::Fon | Mode::FntToFon => {
            let library = FonLibrary::new(fonts, options.face_name.as_deref())?;
            FonEncoder::new().encode(&library)
        },
    }
}

/// Run the command: encode everything, then write the output in one go.
pub fn run(options: &CliOptions) -> Result<()> {
    let bytes = build(options)?;
    fs::write(&options.output, &bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), options.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::from_args(args.iter().copied())
    }

    #[test]
    fn test_defaults_to_fon() {
        let opts = parse(&["-o", "out.fon", "a.fd", "b.fd"]).unwrap();
        assert_eq!(opts.mode, Mode::Fon);
        assert_eq!(opts.output, PathBuf::from("out.fon"));
        assert_eq!(opts.inputs.len(), 2);
        assert_eq!(opts.face_name, None);
    }

    #[test]
    fn test_modes_last_wins() {
        assert_eq!(parse(&["-fnt", "-o", "x", "a"]).unwrap().mode, Mode::Fnt);
        assert_eq!(parse(&["-fnt", "-fnt2fon", "-o", "x", "a"]).unwrap().mode, Mode::FntToFon);
    }

    #[test]
    fn test_facename_and_double_dash() {
        let opts = parse(&["-facename", "Sys", "-o", "x", "--", "-odd.fd"]).unwrap();
        assert_eq!(opts.face_name.as_deref(), Some("Sys"));
        assert_eq!(opts.inputs, vec![PathBuf::from("-odd.fd")]);
    }

    #[test]
    fn test_usage_errors() {
        assert!(matches!(parse(&["a.fd"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["-o", "x"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["-o"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["-o", "x", "-facename"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["-x", "-o", "x", "a"]), Err(Error::Usage(_))));
        assert!(matches!(parse(&["-fnt", "-o", "x", "a", "b"]), Err(Error::Usage(_))));
    }

    #[test]
    fn test_missing_argument_message() {
        let err = parse(&["-facename"]).unwrap_err();
        assert_eq!(err.to_string(), "option -facename requires an argument");
    }
}
