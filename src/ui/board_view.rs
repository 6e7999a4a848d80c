//! Board rendering for the Connect-N GUI
//!
//! The grid has no edges, so the view draws a window of it through a
//! [`Camera`] that follows the latest move.

use egui::{Color32, CornerRadius, Key, Painter, Pos2, Sense, Stroke, Vec2};

use crate::board::{Board, Camera, Cell, Offset, Player};
use crate::Game;

use super::theme::*;

/// Board view handles rendering and input for the game board
pub struct BoardView {
    camera: Camera,
    /// Follow margin in percent of the smaller view dimension
    track_percent: u32,
    /// Screen position of the view's top-left cell corner
    origin: Pos2,
    /// Move count the camera last followed
    followed: Option<usize>,
}

impl BoardView {
    pub fn new(track_percent: u32) -> Self {
        Self {
            camera: Camera::new(Offset::new(1, 1), 0),
            track_percent,
            origin: Pos2::ZERO,
            followed: None,
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Render the board and return the clicked cell if any.
    ///
    /// Clicks are only reported when `interactive` is set and the cell is
    /// unoccupied.
    pub fn show(&mut self, ui: &mut egui::Ui, game: &Game, interactive: bool) -> Option<Offset> {
        let board = game.board();
        let available = ui.available_size();

        self.fit_camera(available);
        self.follow(game);
        self.handle_keys(ui, game);
        self.camera = self.camera.snap_into(board.bound());

        let (response, painter) = ui.allocate_painter(available, Sense::click());
        let rect = response.rect;
        let used = Vec2::new(self.camera.view.w as f32, self.camera.view.h as f32) * CELL_SIZE;
        self.origin = rect.center() - used / 2.0;

        painter.rect_filled(rect, CornerRadius::ZERO, UNAVAILABLE_BG);
        self.draw_cells(&painter, board);

        if let Some(last) = game.latest_move() {
            self.draw_last_move_marker(&painter, last.cell);
        }
        if let Some(strike) = game.winning_strike() {
            self.draw_winning_strike(&painter, strike);
        }

        let mut clicked = None;
        if interactive && !game.over() {
            if let Some(pos) = response.hover_pos().and_then(|p| self.screen_to_board(p)) {
                let valid = board.cell(pos) == Cell::Unoccupied;
                self.draw_hover_preview(&painter, pos, game.current_player(), valid);

                if response.clicked() && valid {
                    clicked = Some(pos);
                }
            }
        }

        clicked
    }

    /// Resize the camera to the number of whole cells that fit.
    fn fit_camera(&mut self, available: Vec2) {
        let cols = ((available.x / CELL_SIZE).floor() as i32).max(1);
        let rows = ((available.y / CELL_SIZE).floor() as i32).max(1);
        let size = Offset::new(cols, rows);

        if self.camera.view.dimensions() != size {
            self.camera = self.camera.resize(size);
            self.camera.track_depth = cols.min(rows) * self.track_percent as i32 / 100;
        }
    }

    /// Nudge the camera towards a move it has not seen yet.
    fn follow(&mut self, game: &Game) {
        let count = game.move_history().len();
        if self.followed == Some(count) {
            return;
        }
        self.followed = Some(count);

        if let Some(last) = game.latest_move() {
            self.camera = self.camera.nudge_to(last.cell);
        }
    }

    /// Arrow keys pan, C recenters on the latest move.
    fn handle_keys(&mut self, ui: &egui::Ui, game: &Game) {
        let (pan, recenter) = ui.input(|i| {
            let mut pan = Offset::ZERO;
            if i.key_pressed(Key::ArrowLeft) {
                pan = pan + Offset::new(-1, 0);
            }
            if i.key_pressed(Key::ArrowRight) {
                pan = pan + Offset::new(1, 0);
            }
            if i.key_pressed(Key::ArrowUp) {
                pan = pan + Offset::new(0, -1);
            }
            if i.key_pressed(Key::ArrowDown) {
                pan = pan + Offset::new(0, 1);
            }
            (pan, i.key_pressed(Key::C))
        });

        if !pan.is_zero() {
            self.camera = self.camera.translate(pan);
        }
        if recenter {
            let target = game.latest_move().map_or(Offset::ZERO, |m| m.cell);
            self.camera = self.camera.center_on(target);
        }
    }

    /// Draw every available cell in view with grid lines to its neighbours.
    fn draw_cells(&self, painter: &Painter, board: &Board) {
        let view = self.camera.view;
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let half = Vec2::splat(CELL_SIZE / 2.0);

        // Backgrounds first so lines are not painted over
        for ly in 0..view.h {
            for lx in 0..view.w {
                let pos = view.to_world(Offset::new(lx, ly));
                if board.cell(pos) != Cell::Unavailable {
                    let center = self.board_to_screen(pos);
                    painter.rect_filled(egui::Rect::from_min_max(center - half, center + half), CornerRadius::ZERO, BOARD_BG);
                }
            }
        }

        for ly in 0..view.h {
            for lx in 0..view.w {
                let pos = view.to_world(Offset::new(lx, ly));
                let cell = board.cell(pos);
                if cell == Cell::Unavailable {
                    continue;
                }

                let center = self.board_to_screen(pos);
                for next in [pos + Offset::new(1, 0), pos + Offset::new(0, 1)] {
                    if view.contains(next) && board.cell(next) != Cell::Unavailable {
                        painter.line_segment([center, self.board_to_screen(next)], stroke);
                    }
                }

                match cell {
                    Cell::Unoccupied if pos.is_zero() => {
                        painter.circle_filled(center, UNOCCUPIED_DOT_RADIUS * 2.0, ORIGIN_MARKER);
                    }
                    Cell::Unoccupied => {
                        painter.circle_filled(center, UNOCCUPIED_DOT_RADIUS, UNOCCUPIED_DOT);
                    }
                    Cell::Occupied(player) => self.draw_mark(painter, pos, player),
                    Cell::Unavailable => {}
                }
            }
        }
    }

    /// Draw a single mark with a little depth
    fn draw_mark(&self, painter: &Painter, pos: Offset, player: Player) {
        let center = self.board_to_screen(pos);
        let radius = CELL_SIZE * MARK_RADIUS_RATIO;
        let shadow = Color32::from_rgba_unmultiplied(0, 0, 0, 50);
        painter.circle_filled(center + Vec2::new(2.0, 2.0), radius, shadow);

        match player {
            Player::P1 => {
                painter.circle_filled(center, radius, P1_MARK);
                painter.circle_filled(center + Vec2::splat(-radius * 0.3), radius * 0.2, P1_MARK_HIGHLIGHT);
            }
            Player::P2 => {
                painter.circle_filled(center, radius, P2_MARK);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, P2_MARK_SHADOW));
            }
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Offset) {
        if self.camera.view.contains(pos) {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
    }

    /// Connect the winning strike and ring its cells
    fn draw_winning_strike(&self, painter: &Painter, strike: &[Offset]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in strike.windows(2) {
            painter.line_segment([self.board_to_screen(pair[0]), self.board_to_screen(pair[1])], stroke);
        }
        for &pos in strike {
            let radius = CELL_SIZE * MARK_RADIUS_RATIO + 3.0;
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Offset, player: Player, valid: bool) {
        let color = if valid { hover_color(player) } else { hover_invalid() };
        painter.circle_filled(self.board_to_screen(pos), CELL_SIZE * MARK_RADIUS_RATIO, color);
    }

    /// Convert screen coordinates to the cell under them, if it is in view
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Offset> {
        let relative = (screen_pos - self.origin) / CELL_SIZE;
        let local = Offset::new(relative.x.floor() as i32, relative.y.floor() as i32);
        let view = self.camera.view;

        let in_view = (0..view.w).contains(&local.x) && (0..view.h).contains(&local.y);
        in_view.then(|| view.to_world(local))
    }

    /// Convert a cell to the screen position of its center
    pub fn board_to_screen(&self, pos: Offset) -> Pos2 {
        let local = self.camera.view.to_local(pos);
        self.origin + Vec2::new(local.x as f32 + 0.5, local.y as f32 + 0.5) * CELL_SIZE
    }
}
