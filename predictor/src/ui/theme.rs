use ratatui::style::{Color, Modifier, Style};

/// Dark slate theme with a teal accent.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(0x1e, 0x1e, 0x2e);
    pub const PANEL: Color = Color::Rgb(0x2a, 0x2a, 0x3d);
    pub const FG: Color = Color::Rgb(0xff, 0xff, 0xff);
    pub const FG_MUTED: Color = Color::Rgb(0x8a, 0x8a, 0xa3);

    pub const ACCENT: Color = Color::Rgb(0x00, 0xbf, 0xa5);
    pub const GOOD: Color = Color::Rgb(0x00, 0xc8, 0x53);
    pub const BAD: Color = Color::Rgb(0xd5, 0x00, 0x00);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn panel() -> Style {
        Style::default().fg(Self::FG).bg(Self::PANEL)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// The focused form row.
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// The predict button, inverted while focused.
    pub fn button(focused: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if focused {
            style.fg(Self::FG).bg(Self::ACCENT)
        } else {
            style.fg(Self::ACCENT)
        }
    }

    pub fn good() -> Style {
        Style::default().fg(Self::GOOD).add_modifier(Modifier::BOLD)
    }

    pub fn bad() -> Style {
        Style::default().fg(Self::BAD).add_modifier(Modifier::BOLD)
    }

    pub fn hint_key() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}
