//! Token-to-color resolution.
//!
//! Renderers never pick colors directly: they tag segments with semantic
//! tokens (`heading.1`, `pattern.desc`, `table.border`, …) and the
//! [`TokenStyler`] in effect maps each token to a concrete color at paint
//! time. The shipped [`DefaultStyler`] resolves against a [`ThemeColors`]
//! palette; callers embedding the renderer provide their own implementation
//! to integrate with an application theme.

/// An RGB color.
pub type Color = [u8; 3];

/// Color palette for the default styler.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Default foreground color.
    pub fg: Color,
    /// Default background color.
    pub bg: Color,
    /// The 16 ANSI colors (indices 0–15).
    pub palette: [Color; 16],
}

impl Default for ThemeColors {
    /// Catppuccin Mocha-inspired palette for vibrant, readable output.
    fn default() -> Self {
        Self {
            fg: [205, 214, 244],
            bg: [30, 30, 46],
            palette: [
                [69, 71, 90],    // 0  Black (Surface0)
                [243, 139, 168], // 1  Red
                [166, 227, 161], // 2  Green
                [249, 226, 175], // 3  Yellow (warm gold)
                [137, 180, 250], // 4  Blue
                [203, 166, 247], // 5  Magenta (mauve)
                [148, 226, 213], // 6  Cyan (teal)
                [186, 194, 222], // 7  White (Subtext0)
                [108, 112, 134], // 8  Bright black (Overlay0)
                [235, 160, 172], // 9  Bright red (maroon)
                [166, 227, 161], // 10 Bright green
                [249, 226, 175], // 11 Bright yellow
                [116, 199, 236], // 12 Bright blue (sapphire)
                [245, 194, 231], // 13 Bright magenta (pink)
                [137, 220, 235], // 14 Bright cyan (sky)
                [205, 214, 244], // 15 Bright white (Text)
            ],
        }
    }
}

/// Resolves semantic style tokens to colors.
///
/// Implementations must be infallible: an unknown token resolves to `None`,
/// which the ANSI writer paints with the terminal's default foreground. The
/// `bold` and `italic` attributes never reach the styler — they are emitted
/// as ANSI attribute codes before it is consulted.
pub trait TokenStyler: Send + Sync {
    /// Resolve a token to a foreground color. `None` means default.
    fn resolve(&self, token: &str) -> Option<Color>;
}

/// The built-in styler: maps the crate's token vocabulary onto a
/// [`ThemeColors`] palette.
pub struct DefaultStyler {
    theme: ThemeColors,
}

impl DefaultStyler {
    pub fn new(theme: ThemeColors) -> Self {
        Self { theme }
    }
}

impl Default for DefaultStyler {
    fn default() -> Self {
        Self::new(ThemeColors::default())
    }
}

impl TokenStyler for DefaultStyler {
    fn resolve(&self, token: &str) -> Option<Color> {
        let p = &self.theme.palette;
        match token {
            "heading.1" => Some(p[14]),
            "heading.2" => Some(p[10]),
            "heading.3" => Some(p[11]),
            "heading.4" => Some(p[12]),
            "heading.5" => Some(p[13]),
            "heading.6" => Some(p[8]),
            "pattern.topic" => Some(p[14]),
            "pattern.desc" => Some(p[7]),
            "pattern.key" => Some(p[12]),
            "pattern.number" => Some(p[11]),
            "pattern.time" => Some(p[3]),
            "code.block" => Some(p[10]),
            "code.inline" => Some(p[9]),
            "fence" => Some(p[8]),
            "quote" => Some(p[6]),
            "list.marker" => Some(p[6]),
            "rule" => Some(p[8]),
            "table.border" => Some(p[8]),
            "table.header" => Some(p[11]),
            // "text" and anything unrecognized: default foreground.
            _ => None,
        }
    }
}
