use std::time::Instant;

use common::config::FileContentConfigProvider;
use common::games::puzzle2048::{Achievement, GameStatus};
use eframe::egui;

use super::board::render_board;
use crate::config::UiConfig;
use crate::input::{SwipeTracker, key_direction};
use crate::session::LocalSession;

pub struct Puzzle2048App {
    session: LocalSession<FileContentConfigProvider>,
    swipe: SwipeTracker,
    ui_config: UiConfig,
}

impl Puzzle2048App {
    pub fn new(session: LocalSession<FileContentConfigProvider>, ui_config: UiConfig) -> Self {
        Self {
            session,
            swipe: SwipeTracker::new(ui_config.swipe_threshold),
            ui_config,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context, now: Instant) {
        let (direction, new_game, undo, hint) = ctx.input(|i| {
            let direction = key_direction(i).or_else(|| self.swipe.update(i));
            (
                direction,
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::H),
            )
        });

        if let Some(direction) = direction {
            self.session.handle_direction(direction, now);
        }
        if new_game {
            self.session.new_game();
        }
        if undo {
            self.session.undo();
        }
        if hint {
            self.session.request_hint();
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        let game = self.session.game();
        ui.horizontal(|ui| {
            ui.heading(format!("Score: {}", game.score()));
            ui.add_space(20.0);
            ui.heading(format!("Best: {}", game.best_score()));
        });

        match game.status() {
            GameStatus::Won => {
                ui.label(
                    egui::RichText::new(format!(
                        "You reached {}! Keep going.",
                        game.settings().target_value
                    ))
                    .color(egui::Color32::GREEN)
                    .size(18.0),
                );
            }
            GameStatus::Lost => {
                ui.label(
                    egui::RichText::new("Game Over")
                        .color(egui::Color32::RED)
                        .size(18.0),
                );
            }
            GameStatus::InProgress => {
                ui.label("Use Arrow Keys, WASD or swipe to move tiles");
            }
        }

        let can_undo = game.can_undo();
        let can_hint = !game.is_lost();
        ui.horizontal(|ui| {
            if ui.button("New game (N)").clicked() {
                self.session.new_game();
            }
            if ui.add_enabled(can_undo, egui::Button::new("Undo (U)")).clicked() {
                self.session.undo();
            }
            if ui.add_enabled(can_hint, egui::Button::new("Hint (H)")).clicked() {
                self.session.request_hint();
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        let persisted = self.session.persisted();
        let stats = &persisted.statistics;
        ui.label(format!(
            "Games: {}  Wins: {}  Highest tile: {}  Moves: {}",
            stats.games_played, stats.games_won, stats.highest_tile, stats.total_moves
        ));

        let unlocked: Vec<&str> = persisted
            .achievements
            .unlocked()
            .map(Achievement::title)
            .collect();
        if !unlocked.is_empty() {
            ui.label(format!("Achievements: {}", unlocked.join(", ")));
        }

        ui.separator();
        for event in self.session.events() {
            ui.small(event);
        }
    }
}

impl eframe::App for Puzzle2048App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if ctx.input(|i| i.viewport().close_requested()) {
            self.session.save();
        }

        self.session.tick(now);
        self.handle_input(ctx, now);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.render_header(ui);
                ui.add_space(10.0);

                let tiles = self.session.tile_views();
                render_board(
                    ui,
                    self.session.game().grid().size(),
                    &tiles,
                    self.ui_config.tile_size,
                    self.session.animation_progress(now),
                    self.session.hint().map(|hint| hint.direction),
                );

                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });

        if self.session.is_animating() {
            ctx.request_repaint();
        }
    }
}
