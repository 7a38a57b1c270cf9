use ratatui::style::Color;

use crate::notify::ToastVariant;
use crate::panels::agents::BadgeVariant;
use crate::panels::dashboard::{ActivityKind, Trend};

pub const BG_PRIMARY: Color = Color::Rgb(9, 9, 11);
pub const BG_PANEL: Color = Color::Rgb(24, 24, 27);
pub const FG_PRIMARY: Color = Color::Rgb(228, 228, 231);
pub const FG_DIM: Color = Color::Rgb(113, 113, 122);

pub const BRAND: Color = Color::Rgb(129, 140, 248);
pub const BORDER_IDLE: Color = Color::Rgb(63, 63, 70);
pub const BORDER_FOCUS: Color = Color::Rgb(129, 140, 248);

pub const SIDEBAR_BG: Color = Color::Rgb(18, 18, 21);
pub const NAV_ACTIVE_BG: Color = Color::Rgb(49, 46, 129);
pub const NAV_ACTIVE_TEXT: Color = Color::Rgb(255, 255, 255);

pub const BAR_BG: Color = Color::Rgb(30, 27, 75);
pub const BAR_TEXT: Color = Color::Rgb(224, 231, 255);

pub const MENU_BG: Color = Color::Rgb(39, 39, 42);
pub const MENU_BORDER: Color = Color::Rgb(161, 161, 170);
pub const MENU_HIGHLIGHT_BG: Color = Color::Rgb(129, 140, 248);
pub const MENU_HIGHLIGHT_TEXT: Color = Color::Rgb(9, 9, 11);

pub const ROW_HIGHLIGHT_BG: Color = Color::Rgb(39, 39, 42);

pub const SUCCESS: Color = Color::Rgb(74, 222, 128);
pub const WARNING: Color = Color::Rgb(250, 204, 21);
pub const INFO: Color = Color::Rgb(96, 165, 250);
pub const DANGER: Color = Color::Rgb(248, 113, 113);

/// Foreground and background of a status badge.
pub fn badge_colors(variant: BadgeVariant) -> (Color, Color) {
    match variant {
        BadgeVariant::Default => (BG_PRIMARY, BRAND),
        BadgeVariant::Secondary => (FG_PRIMARY, BORDER_IDLE),
        BadgeVariant::Outline => (FG_DIM, BG_PRIMARY),
    }
}

pub fn trend_color(trend: Trend) -> Color {
    match trend {
        Trend::Up => SUCCESS,
        Trend::Down => DANGER,
    }
}

pub fn activity_color(kind: ActivityKind) -> Color {
    match kind {
        ActivityKind::Success => SUCCESS,
        ActivityKind::Warning => WARNING,
        ActivityKind::Info => INFO,
    }
}

pub fn toast_border(variant: ToastVariant) -> Color {
    match variant {
        ToastVariant::Default => BORDER_FOCUS,
        ToastVariant::Destructive => DANGER,
    }
}
