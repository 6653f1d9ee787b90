//! Font description line lexer.
//!
//! Every line of a description is one of:
//! - blank or a `#` comment
//! - a directive: a keyword, a space, and an argument running to the end of
//!   the line
//! - a bitmap row: a word of binary digits (anything after it is ignored)
//!
//! Leading blanks and line terminators are not significant.

use nom::{
    bytes::complete::{take_till, take_while1},
    character::complete::{char, space0},
    combinator::{all_consuming, opt, rest},
    sequence::{pair, preceded},
    IResult,
};

/// Directive keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `copyright TEXT`
    Copyright,
    /// `height N`
    Height,
    /// `facename TEXT`
    FaceName,
    /// `ascent N`
    Ascent,
    /// `pointsize N`
    PointSize,
    /// `weight N`
    Weight,
    /// `charset N`
    Charset,
    /// `italic yes|no`
    Italic,
    /// `underline yes|no`
    Underline,
    /// `strikeout yes|no`
    Strikeout,
    /// `char N` starts a glyph
    Char,
    /// `width N` sets the current glyph's width
    Width,
}

impl Keyword {
    /// Look up a keyword by its spelling.
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "copyright" => Self::Copyright,
            "height" => Self::Height,
            "facename" => Self::FaceName,
            "ascent" => Self::Ascent,
            "pointsize" => Self::PointSize,
            "weight" => Self::Weight,
            "charset" => Self::Charset,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikeout" => Self::Strikeout,
            "char" => Self::Char,
            "width" => Self::Width,
            _ => return None,
        })
    }

    /// The keyword as written in a description.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Copyright => "copyright",
            Self::Height => "height",
            Self::FaceName => "facename",
            Self::Ascent => "ascent",
            Self::PointSize => "pointsize",
            Self::Weight => "weight",
            Self::Charset => "charset",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikeout => "strikeout",
            Self::Char => "char",
            Self::Width => "width",
        }
    }
}

/// A classified description line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Nothing to do
    Blank,
    /// Keyword and its argument
    Directive {
        /// Which directive
        keyword: Keyword,
        /// Everything after the first space
        argument: &'a str,
    },
    /// Binary digits of one bitmap row
    Row(&'a str),
    /// A word that is neither a keyword nor a row
    Unknown(&'a str),
}

/// Split a line into its first word and the text after the following space.
fn word_and_argument(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        space0,
        pair(take_till(|c: char| c == ' '), opt(preceded(char(' '), rest))),
    )(input)
    .map(|(remaining, (word, argument))| (remaining, (word, argument.unwrap_or(""))))
}

/// A word made only of binary digits.
fn binary_digits(input: &str) -> IResult<&str, &str> {
    all_consuming(take_while1(|c: char| c == '0' || c == '1'))(input)
}

/// Classify one line of a description.
pub fn lex_line(input: &str) -> Line<'_> {
    let line = input.trim_end_matches(&['\r', '\n'][..]);
    let (word, argument) = match word_and_argument(line) {
        Ok((_, parts)) => parts,
        Err(_) => return Line::Unknown(line),
    };

    if word.is_empty() || word.starts_with('#') {
        return Line::Blank;
    }
    if let Some(keyword) = Keyword::from_word(word) {
        return Line::Directive { keyword, argument };
    }
    match binary_digits(word) {
        Ok((_, digits)) => Line::Row(digits),
        Err(_) => Line::Unknown(word),
    }
}
