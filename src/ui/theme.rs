//! # Theme System
//!
//! Colours used by the dashboard, grouped by role. The active theme is picked
//! by name from the `theme` field of the config file; unknown names fall back
//! to the default.
//!
//! Built-in themes:
//!
//! - **Catppuccin Mocha** (default)
//! - **Dracula**
//! - **Nord**
//! - **Gruvbox Dark**

use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    /// Background of panels and the add form.
    pub bg: Color,
    /// Regular text.
    pub fg: Color,
    /// Unfocused borders, hints and separators.
    pub fg_dim: Color,
    /// Focused border and selected-row background.
    pub accent: Color,
    /// Preview titles and the active form field.
    pub title: Color,
    /// Informational status messages.
    pub success: Color,
    /// Error status messages.
    pub error: Color,
}

impl Theme {
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Theme for an optional configured name.
    pub fn resolve(name: Option<&str>) -> &'static Theme {
        name.and_then(Self::by_name)
            .unwrap_or_else(Self::default_theme)
    }
}

static BUILT_IN_THEMES: [Theme; 4] = [
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),         // base
        fg: Color::Rgb(205, 214, 244),      // text
        fg_dim: Color::Rgb(108, 112, 134),  // overlay0
        accent: Color::Rgb(137, 180, 250),  // blue
        title: Color::Rgb(249, 226, 175),   // yellow
        success: Color::Rgb(166, 227, 161), // green
        error: Color::Rgb(243, 139, 168),   // red
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(189, 147, 249),
        title: Color::Rgb(241, 250, 140),
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),
        title: Color::Rgb(235, 203, 139),
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),
        title: Color::Rgb(250, 189, 47),
        success: Color::Rgb(184, 187, 38),
        error: Color::Rgb(251, 73, 52),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_mocha() {
        assert_eq!(Theme::default_theme().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        assert_eq!(Theme::resolve(None).name, "Catppuccin Mocha");
        assert_eq!(Theme::resolve(Some("missing")).name, "Catppuccin Mocha");
        assert_eq!(Theme::resolve(Some("dracula")).name, "Dracula");
    }

    #[test]
    fn test_catppuccin_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::default_theme();
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.fg_dim, ctp(mocha.overlay0));
        assert_eq!(theme.accent, ctp(mocha.blue));
        assert_eq!(theme.title, ctp(mocha.yellow));
        assert_eq!(theme.success, ctp(mocha.green));
        assert_eq!(theme.error, ctp(mocha.red));
    }

    #[test]
    fn test_all_themes_have_distinct_names() {
        let mut names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate theme names found");
    }
}
