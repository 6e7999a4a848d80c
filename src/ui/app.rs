//! Main application for the Connect-N GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::board::Player;
use crate::config::GameOptions;
use crate::search::PlayerKind;
use crate::AIEngine;

use super::board_view::BoardView;
use super::game_state::GameState;
use super::theme::*;

const SEAT_CHOICES: [PlayerKind; 4] = [
    PlayerKind::Local,
    PlayerKind::Ai,
    PlayerKind::Random,
    PlayerKind::Obstructive,
];

/// Main Connect-N application
pub struct ConnectApp {
    state: GameState,
    board_view: BoardView,
    /// Seats for the next "New Game"
    pending_kinds: [PlayerKind; 2],
    show_debug: bool,
}

impl ConnectApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        options: GameOptions,
        kinds: [PlayerKind; 2],
        engine: AIEngine,
        track_percent: u32,
    ) -> Self {
        Self {
            state: GameState::new(options, kinds, engine),
            board_view: BoardView::new(track_percent),
            pending_kinds: kinds,
            show_debug: true,
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game").clicked() {
                        self.state.reset(Some(self.pending_kinds));
                        ui.close_menu();
                    }
                    ui.separator();
                    for (seat, kind) in Player::ALL.into_iter().zip(self.pending_kinds.iter_mut()) {
                        ui.menu_button(format!("{seat} seat: {kind}"), |ui| {
                            for choice in SEAT_CHOICES {
                                if ui.radio_value(kind, choice, choice.to_string()).clicked() {
                                    ui.close_menu();
                                }
                            }
                        });
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let options = self.state.game.options();
                    ui.label(format!(
                        "{} vs {} | connect {} | border {}",
                        self.state.kinds[0], self.state.kinds[1], options.strike_length, options.border
                    ));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);
                ui.add_space(10.0);

                self.render_replay_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(winner) = self.state.game.winner() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, winner);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    /// Clickable label styled as a button
    fn card_button(ui: &mut egui::Ui, text: &str) -> bool {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click()))
                    .clicked()
            })
            .inner
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("CONNECT").size(22.0).strong().color(TEXT_PRIMARY));
            ui.label(
                RichText::new(self.state.game.options().strike_length.to_string())
                    .size(22.0)
                    .strong()
                    .color(WIN_HIGHLIGHT),
            );
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("on a board without edges").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let player = self.state.game.current_player();
            let kind = self.state.kind_of(player);

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, player_accent(player));
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("{player} ({kind})")).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_replaying() {
                        ("Replaying", TEXT_SECONDARY)
                    } else if self.state.is_agent_thinking() {
                        ("Thinking...", TIMER_WARNING)
                    } else if self.state.game.over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else if kind.is_local() {
                        ("Your turn", TIMER_NORMAL)
                    } else {
                        ("Waiting", TEXT_SECONDARY)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });

            ui.add_space(8.0);
            let board = self.state.game.board();
            ui.label(
                RichText::new(format!(
                    "Move #{}  |  {} free cells",
                    self.state.game.move_number(),
                    board.unoccupied_count()
                ))
                .size(11.0)
                .color(TEXT_SECONDARY),
            );
        });
    }

    /// Render timer card
    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.agent_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.5 {
                    TIMER_NORMAL
                } else if secs < 2.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last agent move: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if Self::card_button(ui, "Undo (U)") {
                    self.state.undo();
                }
                ui.add_space(4.0);
                if Self::card_button(ui, "New (N)") {
                    self.state.reset(Some(self.pending_kinds));
                }
            });
        });
    }

    /// Render replay controls
    fn render_replay_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("REPLAY").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let Some(replay) = self.state.replay.as_mut() else {
                if Self::card_button(ui, "Start replay (R)") {
                    self.state.start_replay();
                }
                return;
            };

            ui.horizontal(|ui| {
                if Self::card_button(ui, "|<") {
                    replay.rewind();
                }
                if Self::card_button(ui, "<") {
                    replay.step_back();
                }
                if Self::card_button(ui, ">") {
                    replay.step_forward();
                }
                if Self::card_button(ui, ">|") {
                    replay.fast_forward();
                }
            });
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("Move {} of {}", replay.position(), replay.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(4.0);
            if Self::card_button(ui, "Back to game") {
                self.state.exit_replay();
            }
        });
    }

    /// Render debug card
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                if let Some(result) = &self.state.last_ai_result {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(format!("{:?}", result.search_type))
                                    .size(11.0)
                                    .strong()
                                    .color(TIMER_NORMAL),
                            );
                            ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                            ui.vertical(|ui| {
                                ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                                ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                            });
                        });
                    });

                    if let Some(pos) = result.best_move {
                        ui.add_space(4.0);
                        ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                    }
                } else {
                    ui.label(RichText::new("No AI move yet").size(10.0).color(TEXT_MUTED));
                }

                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("View {}", self.board_view.camera().view))
                        .size(10.0)
                        .color(TEXT_MUTED),
                );
            });
    }

    /// Render game over card
    fn render_game_over_card(&mut self, ui: &mut egui::Ui, winner: Player) {
        let kind = self.state.kind_of(winner);
        let length = self.state.game.winning_strike().map_or(0, <[_]>::len);

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(format!("{winner} ({kind}) WINS!")).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(
                        RichText::new(format!("{length} in a row after {} moves", self.state.game.move_history().len()))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );
                    ui.add_space(12.0);

                    if Self::card_button(ui, "New Game") {
                        self.state.reset(Some(self.pending_kinds));
                    }
                });
            });
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(Frame::new().fill(UNAVAILABLE_BG))
            .show(ctx, |ui| {
                let interactive = !self.state.is_replaying() && self.state.is_local_turn();
                let clicked = self.board_view.show(ui, self.state.displayed_game(), interactive);

                if let Some(pos) = clicked {
                    if let Err(msg) = self.state.try_mark(pos) {
                        self.state.message = Some(msg);
                    }
                }
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, undo, new_game, replay) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::R),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if undo {
            self.state.undo();
        }
        if new_game {
            self.state.reset(Some(self.pending_kinds));
        }
        if replay {
            if self.state.is_replaying() {
                self.state.exit_replay();
            } else {
                self.state.start_replay();
            }
        }
    }
}

impl eframe::App for ConnectApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_agent_result();
        if self.state.wants_agent_move() {
            self.state.start_agent_move();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_agent_thinking() || self.state.wants_agent_move() {
            ctx.request_repaint();
        } else if !self.state.game.over() {
            // Keep the move timer ticking
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
