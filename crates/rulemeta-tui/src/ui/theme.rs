// Centralized theme: every color and style the panel uses lives here

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// App background
pub const BG_APP: Color = Color::Rgb(0, 0, 0);

/// Selected/focused row background
pub const BG_SELECTED: Color = Color::Rgb(32, 32, 32);

/// Status bar background
pub const BG_SIDEBAR: Color = Color::Rgb(12, 12, 12);

/// Input field background
pub const BG_INPUT: Color = Color::Rgb(18, 18, 18);

// -----------------------------------------------------------------------------
// Text Colors
// -----------------------------------------------------------------------------

pub const TEXT_PRIMARY: Color = Color::Rgb(220, 220, 220);

pub const TEXT_MUTED: Color = Color::Rgb(128, 128, 128);

/// Hints, placeholders
pub const TEXT_DIM: Color = Color::Rgb(90, 90, 90);

// -----------------------------------------------------------------------------
// Accent Colors
// -----------------------------------------------------------------------------

/// Interactive elements, focus
pub const ACCENT_PRIMARY: Color = Color::Rgb(86, 156, 214);

pub const ACCENT_SUCCESS: Color = Color::Rgb(106, 153, 85);

pub const ACCENT_WARNING: Color = Color::Rgb(206, 145, 120);

pub const ACCENT_ERROR: Color = Color::Rgb(244, 112, 112);

/// System tags
pub const ACCENT_SPECIAL: Color = Color::Rgb(169, 154, 203);

// -----------------------------------------------------------------------------
// Border Colors
// -----------------------------------------------------------------------------

pub const BORDER_ACTIVE: Color = Color::Rgb(100, 100, 100);

pub const BORDER_INACTIVE: Color = Color::Rgb(60, 60, 60);

/// Color for a rule severity (BLOCKER .. INFO)
pub fn severity_color(severity: &str) -> Color {
    match severity {
        "BLOCKER" | "CRITICAL" => ACCENT_ERROR,
        "MAJOR" => ACCENT_WARNING,
        "MINOR" => ACCENT_SUCCESS,
        _ => TEXT_MUTED,
    }
}

// =============================================================================
// STYLE FUNCTIONS
// =============================================================================

pub fn text_primary() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn text_dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn text_bold() -> Style {
    Style::default()
        .fg(TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn border_active() -> Style {
    Style::default().fg(BORDER_ACTIVE)
}

pub fn border_inactive() -> Style {
    Style::default().fg(BORDER_INACTIVE)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT_PRIMARY)
}

pub fn interactive_selected() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .bg(BG_SELECTED)
        .add_modifier(Modifier::BOLD)
}

pub fn input_active() -> Style {
    Style::default().fg(TEXT_PRIMARY).bg(BG_INPUT)
}

pub fn input_placeholder() -> Style {
    Style::default().fg(TEXT_DIM).bg(BG_INPUT)
}

pub fn link() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn custom_tag() -> Style {
    Style::default().fg(ACCENT_PRIMARY)
}

pub fn system_tag() -> Style {
    Style::default()
        .fg(ACCENT_SPECIAL)
        .add_modifier(Modifier::ITALIC)
}

pub fn status_warning() -> Style {
    Style::default().fg(ACCENT_WARNING)
}
