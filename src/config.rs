//! Encoder configuration.
//!
//! The defaults reproduce the classic font compiler output byte for byte;
//! changing them is only useful when targeting a particular device.

/// Configuration for FNT encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FntOptions {
    /// Vertical resolution the font was designed for (dots per inch)
    pub vertical_resolution: u16,
    /// Horizontal resolution the font was designed for (dots per inch)
    pub horizontal_resolution: u16,
    /// Character substituted for codes outside the font
    pub default_char: u8,
    /// Character used as the word break
    pub break_char: u8,
}

impl Default for FntOptions {
    fn default() -> Self {
        Self {
            vertical_resolution: 100,
            horizontal_resolution: 100,
            default_char: 0,
            break_char: b' ',
        }
    }
}

impl FntOptions {
    /// Set both design resolutions.
    pub fn with_resolution(mut self, vertical: u16, horizontal: u16) -> Self {
        self.vertical_resolution = vertical;
        self.horizontal_resolution = horizontal;
        self
    }

    /// Set the default character.
    pub fn with_default_char(mut self, ch: u8) -> Self {
        self.default_char = ch;
        self
    }

    /// Set the break character.
    pub fn with_break_char(mut self, ch: u8) -> Self {
        self.break_char = ch;
        self
    }
}

/// Configuration for FON library encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FonOptions {
    /// Aspect value written to the FONTRES descriptor
    pub fontres_aspect: u16,
    /// Logical horizontal dpi written to the FONTRES descriptor
    pub fontres_dpi_x: u16,
    /// Logical vertical dpi written to the FONTRES descriptor
    pub fontres_dpi_y: u16,
    /// Message printed by the DOS stub. Must not contain '$'.
    pub stub_message: String,
}

impl Default for FonOptions {
    fn default() -> Self {
        Self {
            fontres_aspect: 100,
            fontres_dpi_x: 96,
            fontres_dpi_y: 96,
            stub_message: format!(
                "This is not a program!\r\nFont library created by {}.\r\n",
                crate::NAME
            ),
        }
    }
}

impl FonOptions {
    /// Set the FONTRES aspect and logical resolution.
    pub fn with_fontres(mut self, aspect: u16, dpi_x: u16, dpi_y: u16) -> Self {
        self.fontres_aspect = aspect;
        self.fontres_dpi_x = dpi_x;
        self.fontres_dpi_y = dpi_y;
        self
    }

    /// Set the message printed when the library is run under DOS.
    pub fn with_stub_message(mut self, message: impl Into<String>) -> Self {
        self.stub_message = message.into();
        self
    }

    /// The non-resident module description for a library called `name`.
    pub fn fontres_descriptor(&self, name: &str) -> String {
        format!(
            "FONTRES {},{},{} : {}",
            self.fontres_aspect, self.fontres_dpi_x, self.fontres_dpi_y, name
        )
    }
}
