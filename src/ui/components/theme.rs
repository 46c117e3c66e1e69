//! Color palettes and shared styles.

use ratatui::style::{Color, Modifier, Style};

/// Base palette (Tokyo Night derived).
pub mod colors {
    use ratatui::style::Color;

    pub const BG_DEEP: Color = Color::Rgb(26, 27, 38); // #1a1b26
    pub const BG_HIGHLIGHT: Color = Color::Rgb(41, 46, 66); // #292e42
    pub const BORDER: Color = Color::Rgb(59, 66, 97); // #3b4261

    pub const TEXT_PRIMARY: Color = Color::Rgb(192, 202, 245); // #c0caf5
    /// Lightened from #565f89 to meet WCAG AA-large contrast
    pub const TEXT_MUTED: Color = Color::Rgb(105, 114, 158); // #696e9e

    pub const ACCENT_PRIMARY: Color = Color::Rgb(122, 162, 247); // #7aa2f7
    pub const ACCENT_SECONDARY: Color = Color::Rgb(187, 154, 247); // #bb9af7

    pub const KIND_USER: Color = Color::Rgb(158, 206, 106); // #9ece6a
    pub const KIND_ORG: Color = Color::Rgb(224, 175, 104); // #e0af68

    pub const STATUS_ERROR: Color = Color::Rgb(247, 118, 142); // #f7768e
}

#[derive(Clone, Copy, Debug)]
pub struct ThemePalette {
    pub accent: Color,
    pub accent_alt: Color,
    pub fg: Color,
    pub hint: Color,
    pub border: Color,
    pub danger: Color,
    pub stripe_even: Color,
    pub stripe_odd: Color,
}

impl ThemePalette {
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(0, 122, 255),        // iOS blue
            accent_alt: Color::Rgb(124, 93, 198),   // Purple
            fg: Color::Rgb(36, 41, 46),             // Near-black
            hint: Color::Rgb(102, 102, 102),        // #666
            border: Color::Rgb(238, 238, 238),      // #eee
            danger: Color::Rgb(255, 59, 48),        // #FF3B30
            stripe_even: Color::Rgb(250, 250, 252), // Off-white
            stripe_odd: Color::Rgb(240, 241, 245),
        }
    }

    pub fn dark() -> Self {
        Self {
            accent: colors::ACCENT_PRIMARY,
            accent_alt: colors::ACCENT_SECONDARY,
            fg: colors::TEXT_PRIMARY,
            hint: colors::TEXT_MUTED,
            border: colors::BORDER,
            danger: colors::STATUS_ERROR,
            stripe_even: colors::BG_DEEP,
            stripe_odd: Color::Rgb(30, 32, 48), // #1e2030
        }
    }

    pub fn title(self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn border_style(self) -> Style {
        Style::default().fg(self.border)
    }

    /// Cursor row in the result list.
    pub fn highlight_style(self) -> Style {
        Style::default()
            .bg(colors::BG_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Checked rows in edit mode.
    pub fn selected_style(self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn danger_style(self) -> Style {
        Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
    }

    pub fn stripe(self, idx: usize) -> Style {
        let bg = if idx % 2 == 0 {
            self.stripe_even
        } else {
            self.stripe_odd
        };
        Style::default().bg(bg)
    }

    /// Color for the account classification tag.
    pub fn kind_style(self, kind: &str) -> Style {
        match kind {
            "User" => Style::default().fg(colors::KIND_USER),
            "Organization" => Style::default().fg(colors::KIND_ORG),
            _ => self.hint_style(),
        }
    }
}

/// Keyboard shortcut style for legends.
pub fn key_style(palette: ThemePalette) -> Style {
    Style::default()
        .fg(palette.accent_alt)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stripes_alternate_and_kinds_are_tagged() {
        for palette in [ThemePalette::dark(), ThemePalette::light()] {
            assert_eq!(palette.stripe(0), palette.stripe(2));
            assert_ne!(palette.stripe(0), palette.stripe(1));
            assert_eq!(palette.kind_style("Bot"), palette.hint_style());
        }
        let dark = ThemePalette::dark();
        assert_eq!(dark.kind_style("User").fg, Some(colors::KIND_USER));
        assert_eq!(dark.kind_style("Organization").fg, Some(colors::KIND_ORG));
    }
}
