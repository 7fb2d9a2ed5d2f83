//! ANSI styling for the locate visualization
//!
//! Color scheme follows the established diagnostic conventions downstream
//! tooling matches on:
//! - source lines = green
//! - underline and truncation glyphs = bold magenta
//! - annotation label words = bold yellow
//! - missing/empty location markers = red

use once_cell::sync::Lazy;
use owo_colors::{OwoColorize, Style};
use regex::Regex;

/// Maximal runs of label letters or underline glyphs. The two classes are
/// disjoint, so one segmentation pass suffices for both highlight rules.
static HIGHLIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z_]+|[~.]+").expect("highlight pattern is valid"));

/// Semantic styles for one rendering run
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub source: Style,
    pub underline: Style,
    pub label: Style,
    pub marker: Style,
}

impl Palette {
    /// The standard colored palette
    pub fn colored() -> Self {
        Self {
            source: Style::new().green(),
            underline: Style::new().magenta().bold(),
            label: Style::new().yellow().bold(),
            marker: Style::new().red(),
        }
    }

    /// No styling at all; output is the bare layout text
    pub fn plain() -> Self {
        Self {
            source: Style::new(),
            underline: Style::new(),
            label: Style::new(),
            marker: Style::new(),
        }
    }

    /// Recolors one annotation band: label words in the label style,
    /// tilde/ellipsis runs in the underline style
    pub fn highlight(&self, band: &str) -> String {
        let mut out = String::new();
        let mut last = 0;
        for run in HIGHLIGHT.find_iter(band) {
            out.push_str(&band[last..run.start()]);
            let style = if run.as_str().starts_with(|c| c == '~' || c == '.') {
                self.underline
            } else {
                self.label
            };
            out.push_str(&run.as_str().style(style).to_string());
            last = run.end();
        }
        out.push_str(&band[last..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlight_is_identity() {
        let palette = Palette::plain();
        assert_eq!(palette.highlight("~~~ keyword"), "~~~ keyword");
        assert_eq!(palette.highlight("  ~~~... expression  "), "  ~~~... expression  ");
    }

    #[test]
    fn test_colored_highlight_styles_both_classes() {
        let palette = Palette::colored();
        let band = "~~~ keyword";
        let expected = format!(
            "{} {}",
            "~~~".style(palette.underline),
            "keyword".style(palette.label)
        );
        assert_eq!(palette.highlight(band), expected);
    }

    #[test]
    fn test_highlight_keeps_surrounding_blanks() {
        let palette = Palette::colored();
        let band = "  ~ end ";
        let highlighted = palette.highlight(band);
        assert!(highlighted.starts_with("  "));
        assert!(highlighted.ends_with(' '));
    }

    #[test]
    fn test_ellipsis_joins_underline_run() {
        let palette = Palette::colored();
        let band = "~~... expression";
        let expected = format!(
            "{} {}",
            "~~...".style(palette.underline),
            "expression".style(palette.label)
        );
        assert_eq!(palette.highlight(band), expected);
    }
}
