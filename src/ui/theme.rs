//! Color themes and the ANSI escapes built from them.
//!
//! Four Catppuccin flavors ship inside the binary (`themes/*.toml`):
//! `catppuccin-mocha` (default), `catppuccin-macchiato`, `catppuccin-frappe`
//! and `catppuccin-latte`. A `theme_file` in the plugin configuration replaces
//! them with a user palette of the same shape:
//!
//! ```toml
//! name = "harbor"
//!
//! [colors]
//! header_fg = "#e0def4"
//! selection_fg = "#191724"
//! selection_bg = "#ebbcba"
//! text_normal = "#e0def4"
//! text_dim = "#6e6a86"
//! border = "#26233a"
//! form_border = "#ebbcba"
//! form_focus_fg = "#f6c177"
//! error_fg = "#eb6f92"
//! info_fg = "#9ccfd8"
//! empty_state_fg = "#31748f"
//! sync_fg = "#f6c177"
//! ```

use crate::domain::error::{EventboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Compiled-in themes, name and TOML source.
const BUILTIN_SOURCES: [(&str, &str); 4] = [
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("catppuccin-frappe", include_str!("../../themes/catppuccin-frappe.toml")),
    ("catppuccin-macchiato", include_str!("../../themes/catppuccin-macchiato.toml")),
];

/// A named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every styled part of the pane.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title bar text.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, column headers, events without an id.
    pub text_dim: String,

    /// Separator lines.
    pub border: String,

    /// Frame of the new-event form.
    pub form_border: String,
    /// Label of the field being edited.
    pub form_focus_fg: String,

    /// Status line after a failed operation.
    pub error_fg: String,
    /// Status line after a successful operation.
    pub info_fg: String,

    /// "No events yet" and friends.
    pub empty_state_fg: String,

    /// Header indicator while requests are in flight.
    pub sync_fg: String,
}

impl Theme {
    /// Names accepted by [`Theme::from_name`].
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_SOURCES.iter().map(|(name, _)| *name)
    }

    /// A compiled-in theme, or `None` for an unknown name.
    ///
    /// ```rust
    /// use eventboard::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("catppuccin-latte").map(|t| t.name).as_deref(), Some("catppuccin-latte"));
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, source) = BUILTIN_SOURCES.iter().find(|(builtin, _)| *builtin == name)?;
        toml::from_str(source).ok()
    }

    /// Reads a user palette.
    ///
    /// # Errors
    ///
    /// [`EventboardError::Theme`] when the file is unreadable or lacks a color.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| EventboardError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| EventboardError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Truecolor foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        truecolor(38, hex)
    }

    /// Truecolor background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        truecolor(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{1b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{1b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{1b}[0m"
    }
}

/// `ESC[<layer>;2;r;g;bm`. Malformed colors render as white.
fn truecolor(layer: u8, hex: &str) -> String {
    let digits = hex.trim().trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    let rgb = if digits.len() == 6 {
        channel(0).zip(channel(2)).zip(channel(4))
    } else {
        None
    };
    let ((r, g), b) = rgb.unwrap_or(((255, 255), 255));

    format!("\u{1b}[{layer};2;{r};{g};{b}m")
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// If the compiled-in mocha source does not parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").expect("built-in mocha theme parses")
    }
}
