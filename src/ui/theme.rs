//! Theme constants for the Connect-N GUI

use egui::Color32;

use crate::board::Player;

// Board colors
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135);
pub const UNAVAILABLE_BG: Color32 = Color32::from_rgb(40, 42, 46);
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);
pub const UNOCCUPIED_DOT: Color32 = Color32::from_rgb(150, 115, 80);
pub const ORIGIN_MARKER: Color32 = Color32::from_rgb(50, 35, 20);

// Marks
pub const P1_MARK: Color32 = Color32::from_rgb(25, 25, 30);
pub const P1_MARK_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const P2_MARK: Color32 = Color32::from_rgb(250, 250, 252);
pub const P2_MARK_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

pub fn hover_color(player: Player) -> Color32 {
    match player {
        Player::P1 => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
        Player::P2 => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
    }
}

pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 100)
}

/// Swatch used for a player in the side panel
pub fn player_accent(player: Player) -> Color32 {
    match player {
        Player::P1 => Color32::from_rgb(70, 70, 75),
        Player::P2 => Color32::from_rgb(220, 220, 225),
    }
}

// Panel colors
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const CELL_SIZE: f32 = 28.0;
pub const MARK_RADIUS_RATIO: f32 = 0.42;
pub const UNOCCUPIED_DOT_RADIUS: f32 = 2.0;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
