//! Text font descriptions.
//!
//! A description is a line-oriented file of header directives followed by
//! 256 glyph definitions:
//!
//! ```text
//! # comments and blank lines are ignored
//! copyright Public domain
//! height 8
//! ascent 7
//! facename Tiny
//! char 65
//! width 5
//! 01110
//! 10001
//! 11111
//! ...
//! ```
//!
//! Parsing runs a two-state machine over the lexed lines: outside a glyph
//! only directives are accepted; after `char N` bitmap rows are appended to
//! glyph N until the next `char`.

pub mod lexer;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fonts::{
    FontDescription, FontStyle, Glyph, DEFAULT_WEIGHT, GLYPH_COUNT, MAX_COPYRIGHT_LEN,
};
use lexer::{lex_line, Keyword, Line};

/// Parser position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// No glyph open yet
    ExpectDirective,
    /// Glyph `code` is open and its next row is `row`
    ExpectGlyphRow { code: u8, row: usize },
}

/// Attributes collected so far.
struct DescriptionBuilder<'a> {
    file: &'a str,
    line: usize,
    copyright: Option<String>,
    face_name: Option<String>,
    height: Option<u16>,
    ascent: Option<u16>,
    point_size: Option<u16>,
    weight: u16,
    charset: u8,
    style: FontStyle,
    glyphs: Vec<Option<Glyph>>,
}

impl<'a> DescriptionBuilder<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            line: 0,
            copyright: None,
            face_name: None,
            height: None,
            ascent: None,
            point_size: None,
            weight: DEFAULT_WEIGHT,
            charset: 0,
            style: FontStyle::empty(),
            glyphs: vec![None; GLYPH_COUNT],
        }
    }

    fn syntax(&self, message: impl Into<String>) -> Error {
        Error::Syntax {
            file: self.file.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    fn number<T: TryFrom<i64>>(&self, keyword: Keyword, argument: &str) -> Result<T> {
        argument
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| T::try_from(n).ok())
            .ok_or_else(|| Error::InvalidValue {
                file: self.file.to_string(),
                line: self.line,
                directive: keyword.as_str(),
                value: argument.to_string(),
            })
    }

    fn set_style(&mut self, flag: FontStyle, argument: &str) {
        self.style.set(flag, argument.trim() == "yes");
    }

    /// Apply a header directive.
    fn apply(&mut self, keyword: Keyword, argument: &str) -> Result<()> {
        match keyword {
            Keyword::Copyright => {
                if argument.len() > MAX_COPYRIGHT_LEN {
                    return Err(Error::CopyrightTooLong(argument.len()));
                }
                self.copyright = Some(argument.to_string());
            },
            Keyword::Height => self.height = Some(self.number(keyword, argument)?),
            Keyword::FaceName => self.face_name = Some(argument.to_string()),
            Keyword::Ascent => self.ascent = Some(self.number(keyword, argument)?),
            Keyword::PointSize => self.point_size = Some(self.number(keyword, argument)?),
            Keyword::Weight => self.weight = self.number(keyword, argument)?,
            Keyword::Charset => self.charset = self.number(keyword, argument)?,
            Keyword::Italic => self.set_style(FontStyle::ITALIC, argument),
            Keyword::Underline => self.set_style(FontStyle::UNDERLINE, argument),
            Keyword::Strikeout => self.set_style(FontStyle::STRIKEOUT, argument),
            Keyword::Char | Keyword::Width => {
                return Err(self.syntax(format!("unexpected '{}'", keyword.as_str())));
            },
        }
        Ok(())
    }

    /// Open glyph `argument`.
    fn open_glyph(&mut self, argument: &str) -> Result<u8> {
        if self.height.is_none() {
            return Err(self.syntax("'char' before 'height'"));
        }
        let index: i64 = self.number(Keyword::Char, argument)?;
        let code = u8::try_from(index)
            .map_err(|_| self.syntax(format!("character {} is outside 0..=255", index)))?;
        if self.glyphs[usize::from(code)].is_some() {
            return Err(self.syntax(format!("character {} defined twice", code)));
        }
        self.glyphs[usize::from(code)] = Some(Glyph::new(0));
        Ok(code)
    }

    fn glyph_mut(&mut self, code: u8) -> &mut Glyph {
        self.glyphs[usize::from(code)].get_or_insert_with(Glyph::default)
    }

    /// Check the required attributes and produce the description.
    fn finish(self) -> Result<FontDescription> {
        let copyright = self.copyright.ok_or(Error::MissingField("copyright"))?;
        let height = self.height.ok_or(Error::MissingField("height"))?;
        let ascent = self.ascent.ok_or(Error::MissingField("ascent"))?;
        let face_name = self.face_name.ok_or(Error::MissingField("face name"))?;
        if let Some(code) = self.glyphs.iter().position(Option::is_none) {
            return Err(Error::MissingGlyph(code));
        }
        let short = self
            .glyphs
            .iter()
            .flatten()
            .filter(|g| !g.rows.is_empty() && g.rows.len() < usize::from(height))
            .count();
        if short > 0 {
            log::warn!(
                "{}: {} character(s) have fewer than {} rows; the rest are blank",
                self.file,
                short,
                height
            );
        }

        Ok(FontDescription {
            copyright,
            face_name,
            point_size: self.point_size.unwrap_or(height),
            height,
            ascent,
            weight: self.weight,
            charset: self.charset,
            style: self.style,
            glyphs: self.glyphs,
        })
    }
}

impl ParseState {
    /// Consume one line.
    fn next(self, line: Line<'_>, b: &mut DescriptionBuilder<'_>) -> Result<ParseState> {
        match (self, line) {
            (_, Line::Blank) => Ok(self),
            (_, Line::Unknown(word)) => Err(Error::UnknownKeyword {
                file: b.file.to_string(),
                line: b.line,
                keyword: word.to_string(),
            }),
            (
                _,
                Line::Directive {
                    keyword: Keyword::Char,
                    argument,
                },
            ) => {
                let code = b.open_glyph(argument)?;
                Ok(ParseState::ExpectGlyphRow { code, row: 0 })
            },
            (
                ParseState::ExpectGlyphRow { code, .. },
                Line::Directive {
                    keyword: Keyword::Width,
                    argument,
                },
            ) => {
                let width = b.number(Keyword::Width, argument)?;
                b.glyph_mut(code).width = width;
                Ok(self)
            },
            (
                ParseState::ExpectDirective,
                Line::Directive {
                    keyword: Keyword::Width,
                    ..
                },
            ) => Err(b.syntax("'width' outside a character definition")),
            (_, Line::Directive { keyword, argument }) => {
                b.apply(keyword, argument)?;
                Ok(self)
            },
            (ParseState::ExpectGlyphRow { code, row }, Line::Row(digits)) => {
                let height = usize::from(b.height.unwrap_or(0));
                if row >= height {
                    return Err(b.syntax(format!(
                        "character {} has more than {} rows",
                        code, height
                    )));
                }
                let glyph = b.glyph_mut(code);
                if glyph.push_row_digits(digits).is_none() {
                    return Err(b.syntax(format!("'{}' is not a bitmap row", digits)));
                }
                Ok(ParseState::ExpectGlyphRow { code, row: row + 1 })
            },
            (ParseState::ExpectDirective, Line::Row(_)) => {
                Err(b.syntax("bitmap row outside a character definition"))
            },
        }
    }
}

/// Parse a description held in memory. `file` names it in error messages.
pub fn parse_description(source: &str, file: &str) -> Result<FontDescription> {
    let mut builder = DescriptionBuilder::new(file);
    let mut state = ParseState::ExpectDirective;
    for (index, text) in source.lines().enumerate() {
        builder.line = index + 1;
        state = state.next(lex_line(text), &mut builder)?;
    }
    let font = builder.finish()?;
    log::debug!(
        "Parsed font description '{}': face '{}', height {}",
        file,
        font.face_name,
        font.height
    );
    Ok(font)
}

/// Read and parse a description file.
pub fn load_description(path: impl AsRef<Path>) -> Result<FontDescription> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    parse_description(&source, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Header plus all 256 glyphs at the given width, no rows.
    fn description(header: &str, width: u16) -> String {
        let mut s = String::from(header);
        for code in 0..256 {
            s.push_str(&format!("char {}\nwidth {}\n", code, width));
        }
        s
    }

    const HEADER: &str = "copyright Test\nheight 8\nascent 7\nfacename Test\n";

    #[test]
    fn test_minimal_description() {
        let font = parse_description(&description(HEADER, 8), "t").unwrap();
        assert_eq!(font.copyright, "Test");
        assert_eq!(font.face_name, "Test");
        assert_eq!(font.height, 8);
        assert_eq!(font.ascent, 7);
        assert_eq!(font.point_size, 8);
        assert_eq!(font.weight, 400);
        assert_eq!(font.first_missing_glyph(), None);
    }

    #[test]
    fn test_rows_and_width_adjustment() {
        let mut src = String::from(HEADER);
        src.push_str("char 0\nwidth 4\n1\n111111\n0110\n");
        src.push_str(&description("", 4).replacen("char 0\nwidth 4\n", "", 1));
        let font = parse_description(&src, "t").unwrap();
        let g = font.glyph(0).unwrap();
        assert_eq!(g.rows, vec![vec![0b1000_0000], vec![0b1111_0000], vec![0b0110_0000]]);
    }

    #[test]
    fn test_style_and_metadata() {
        let header = "copyright C\nheight 10\nascent 8\nfacename F\npointsize 9\n\
                      weight 700\ncharset 255\nitalic yes\nunderline no\nstrikeout yes\n";
        let font = parse_description(&description(header, 6), "t").unwrap();
        assert_eq!(font.point_size, 9);
        assert_eq!(font.weight, 700);
        assert_eq!(font.charset, 255);
        assert_eq!(font.style, FontStyle::ITALIC | FontStyle::STRIKEOUT);
    }

    #[test]
    fn test_unknown_keyword_reports_line() {
        let src = "copyright C\n\nbogus 1\n";
        match parse_description(src, "font.txt") {
            Err(Error::UnknownKeyword { file, line, keyword }) => {
                assert_eq!(file, "font.txt");
                assert_eq!(line, 3);
                assert_eq!(keyword, "bogus");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_description("height eight\n", "t").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { directive: "height", line: 1, .. }));

        let err = parse_description("charset 256\n", "t").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { directive: "charset", .. }));
    }

    #[test]
    fn test_copyright_too_long() {
        let src = format!("copyright {}\n", "x".repeat(60));
        assert!(matches!(
            parse_description(&src, "t"),
            Err(Error::CopyrightTooLong(60))
        ));
    }

    #[test]
    fn test_char_out_of_range() {
        let src = "height 8\nchar 256\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 2, .. })));
        let src = "height 8\nchar -1\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_duplicate_char() {
        let src = "height 8\nchar 65\nwidth 8\nchar 65\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 4, .. })));
    }

    #[test]
    fn test_char_before_height() {
        let src = "char 0\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 1, .. })));
    }

    #[test]
    fn test_too_many_rows() {
        let src = "height 2\nchar 0\nwidth 2\n01\n10\n11\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 6, .. })));
    }

    #[test]
    fn test_row_outside_glyph() {
        let src = "height 2\n0101\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_width_range() {
        let mut src = String::from(HEADER);
        src.push_str(&format!("char 0\nwidth 72\n{}1\n", "0".repeat(71)));
        src.push_str(&description("", 8).replacen("char 0\nwidth 8\n", "", 1));
        let font = parse_description(&src, "t").unwrap();
        let g = font.glyph(0).unwrap();
        assert_eq!(g.width, 72);
        assert!(g.pixel(71, 0));
        assert_eq!(g.rows[0].len(), 9);

        let src = "height 2\nchar 0\nwidth 65536\n";
        assert!(matches!(
            parse_description(src, "t"),
            Err(Error::InvalidValue { directive: "width", .. })
        ));
    }

    #[test]
    fn test_width_outside_glyph() {
        let src = "height 2\nwidth 4\n";
        assert!(matches!(parse_description(src, "t"), Err(Error::Syntax { line: 2, .. })));
    }

    #[test]
    fn test_missing_fields_in_order() {
        assert!(matches!(parse_description("", "t"), Err(Error::MissingField("copyright"))));
        assert!(matches!(
            parse_description("copyright c\n", "t"),
            Err(Error::MissingField("height"))
        ));
        assert!(matches!(
            parse_description("copyright c\nheight 8\n", "t"),
            Err(Error::MissingField("ascent"))
        ));
        assert!(matches!(
            parse_description("copyright c\nheight 8\nascent 7\n", "t"),
            Err(Error::MissingField("face name"))
        ));
    }

    #[test]
    fn test_missing_glyph() {
        let src = description(HEADER, 8).replace("char 100\nwidth 8\n", "");
        assert!(matches!(parse_description(&src, "t"), Err(Error::MissingGlyph(100))));
    }

    #[test]
    fn test_directives_inside_glyph_keep_it_open() {
        let mut src = String::from("copyright c\nheight 3\nfacename F\nchar 0\nwidth 2\n11\n");
        src.push_str("ascent 2\n01\n");
        src.push_str(&description("", 2).replacen("char 0\nwidth 2\n", "", 1));
        let font = parse_description(&src, "t").unwrap();
        assert_eq!(font.ascent, 2);
        assert_eq!(font.glyph(0).unwrap().rows, vec![vec![0b1100_0000], vec![0b0100_0000]]);
    }
}
